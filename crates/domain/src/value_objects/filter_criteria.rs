//! Filter criteria for narrowing the spell catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Sentinel text that selects every value of a criterion.
pub const ALL_SENTINEL: &str = "all";

/// A criterion that is either unrestricted or pinned to one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }

    /// `true` when unrestricted, otherwise the result of `predicate`.
    pub fn permits(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(value) => predicate(value),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T>
where
    T::Err: fmt::Display,
{
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(Selection::All);
        }
        trimmed
            .parse::<T>()
            .map(Selection::Only)
            .map_err(|e| DomainError::parse(format!("invalid selection '{trimmed}': {e}")))
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL_SENTINEL),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

/// The active narrowing state of the catalog.
///
/// Starts with every criterion unrestricted. It is never persisted; the
/// presentation surface owns it and hands a copy to the filter pipeline on
/// every recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Free-text search; empty means no text filtering
    pub search_text: String,
    /// Exact spell level (0 = cantrip)
    pub level: Selection<u8>,
    /// School name, compared case-insensitively
    pub school: Selection<String>,
    /// Class identifier, looked up in the class membership index
    pub class_id: Selection<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Selection::Only(level);
        self
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Selection::Only(school.into());
        self
    }

    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = Selection::Only(class_id.into());
        self
    }

    /// True when no criterion narrows the catalog.
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_empty()
            && self.level.is_all()
            && self.school.is_all()
            && self.class_id.is_all()
    }

    /// Apply a single user-originated change.
    pub fn apply_change(&mut self, change: CriteriaChange) {
        match change {
            CriteriaChange::Search(text) => self.search_text = text,
            CriteriaChange::Level(level) => self.level = level,
            CriteriaChange::School(school) => self.school = school,
            CriteriaChange::Class(class_id) => self.class_id = class_id,
            CriteriaChange::Reset => *self = Self::default(),
        }
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "search=\"{}\" level={} school={} class={}",
            self.search_text, self.level, self.school, self.class_id
        )
    }
}

/// One change to the filter criteria, as produced by the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum CriteriaChange {
    Search(String),
    Level(Selection<u8>),
    School(Selection<String>),
    Class(Selection<String>),
    Reset,
}
