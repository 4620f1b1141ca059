//! Port traits for infrastructure boundaries.
//!
//! The spell data source is the only external dependency. The port keeps the
//! catalog use cases independent of the HTTP client so they can be driven by
//! mocks in tests.

use async_trait::async_trait;
use spelltome_domain::Spell;

pub use super::error::CatalogError;

/// Summary entry returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub index: String,
    pub name: Option<String>,
}

impl ResourceRef {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            name: None,
        }
    }

    pub fn named(index: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            name: Some(name.into()),
        }
    }
}

// =============================================================================
// Spell Data Source
// =============================================================================

/// Read-only access to spell, class and class spell-list data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpellDataPort: Send + Sync {
    /// List every spell summary.
    async fn list_spells(&self) -> Result<Vec<ResourceRef>, CatalogError>;

    /// Fetch one full spell record.
    async fn get_spell(&self, index: &str) -> Result<Spell, CatalogError>;

    /// List every class the data source knows about.
    async fn list_classes(&self) -> Result<Vec<ResourceRef>, CatalogError>;

    /// Identifiers of the spells a class can cast.
    async fn list_class_spells(&self, class_index: &str) -> Result<Vec<String>, CatalogError>;
}
