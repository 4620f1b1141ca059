//! Use cases - User story orchestration.
//!
//! - `catalog` loads the session catalog from the spell data source
//! - `browse` owns the filter criteria and publishes filtered views

pub mod browse;
pub mod catalog;

pub use browse::{BrowseError, BrowseHandle, FilterView};
pub use catalog::{
    CatalogLoad, CatalogUseCases, DetailFailurePolicy, LoadCatalog, LoadClassIndex, LoadSpells,
};
