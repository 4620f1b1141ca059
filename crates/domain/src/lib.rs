//! Spelltome Domain - spell catalog types and the filter pipeline.
//!
//! Pure, synchronous code: no I/O and no async. Everything here operates
//! on data that has already been fetched into a [`CatalogSnapshot`].

pub mod catalog;
pub mod entities;
pub mod error;
pub mod filter;
pub mod value_objects;

pub use catalog::CatalogSnapshot;
pub use entities::{
    ClassMembershipIndex, MagicSchool, Spell, SpellComponent, SpellLevel, SpellcastingClass,
    NEUTRAL_SCHOOL_COLOR,
};
pub use error::DomainError;
pub use filter::{apply, SpellFilter};
pub use value_objects::{CriteriaChange, FilterCriteria, Selection, ALL_SENTINEL};
