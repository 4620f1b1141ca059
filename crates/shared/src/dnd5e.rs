//! Type definitions for the D&D 5e REST API.
//!
//! These types mirror the API's JSON for the four endpoints the catalog
//! reads. They are only used for deserialization and are converted to
//! domain types by the engine's data-source adapter.
//!
//! Every field except `index` defaults when absent, so a single record with
//! a missing field still decodes and can degrade gracefully downstream.

use serde::{Deserialize, Serialize};

/// A named link to another resource, e.g.
/// `{ "index": "wizard", "name": "Wizard", "url": "/api/classes/wizard" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReference {
    pub index: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ApiReference {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            name: None,
            url: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// List envelope returned by `/spells`, `/classes` and `/classes/{index}/spells`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReferenceList {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub results: Vec<ApiReference>,
}

impl ApiReferenceList {
    pub fn new(results: Vec<ApiReference>) -> Self {
        Self {
            count: Some(results.len() as u64),
            results,
        }
    }

    /// Identifiers of every listed resource, in listing order.
    pub fn indices(&self) -> Vec<String> {
        self.results.iter().map(|r| r.index.clone()).collect()
    }
}

/// Full spell record from `/spells/{index}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRecord {
    pub index: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub school: Option<ApiReference>,
    #[serde(default)]
    pub casting_time: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub ritual: bool,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub desc: Vec<String>,
    #[serde(default)]
    pub higher_level: Vec<String>,
    #[serde(default)]
    pub classes: Vec<ApiReference>,
}

impl SpellRecord {
    /// School label as sent by the API (its `name`, falling back to `index`).
    pub fn school_label(&self) -> Option<&str> {
        self.school
            .as_ref()
            .map(|school| school.name.as_deref().unwrap_or(&school.index))
    }

    /// Class names listed on the record itself.
    pub fn class_names(&self) -> Vec<String> {
        self.classes
            .iter()
            .map(|class| class.name.clone().unwrap_or_else(|| class.index.clone()))
            .collect()
    }
}
