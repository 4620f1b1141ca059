//! Value objects - Immutable objects defined by their attributes

mod filter_criteria;

pub use filter_criteria::{CriteriaChange, FilterCriteria, Selection, ALL_SENTINEL};
