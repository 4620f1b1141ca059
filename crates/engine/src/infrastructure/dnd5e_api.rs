//! D&D 5e REST API client
//!
//! Implements the SpellDataPort trait over the public, read-only D&D 5e API.
//! Every path is resolved against a configurable base URL so tests can point
//! the client at a fixture server.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use spelltome_domain::{MagicSchool, Spell, SpellComponent, SpellLevel};
use spelltome_shared::{ApiReferenceList, SpellRecord};
use std::time::Duration;

use crate::infrastructure::ports::{CatalogError, ResourceRef, SpellDataPort};

/// Default base URL of the public API.
pub const DEFAULT_DND5E_API_URL: &str = "https://www.dnd5eapi.co/api";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the D&D 5e API
#[derive(Clone)]
pub struct Dnd5eApiClient {
    client: Client,
    base_url: String,
}

impl Dnd5eApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Some(DEFAULT_REQUEST_TIMEOUT))
    }

    /// Create client with a custom timeout; `None` waits indefinitely.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and return the body of a successful response.
    async fn get_text(&self, operation: &'static str, path: &str) -> Result<String, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(operation, %url, "Requesting data source");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::unavailable(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::unavailable(
                operation,
                format!("HTTP {status} from {url}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::unavailable(operation, e))
    }

    /// GET a listing envelope. An undecodable listing counts as unavailable data.
    async fn get_listing(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<ApiReferenceList, CatalogError> {
        let body = self.get_text(operation, path).await?;
        decode(&body).map_err(|e| CatalogError::unavailable(operation, e))
    }
}

impl Default for Dnd5eApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_DND5E_API_URL)
    }
}

#[async_trait]
impl SpellDataPort for Dnd5eApiClient {
    async fn list_spells(&self) -> Result<Vec<ResourceRef>, CatalogError> {
        let listing = self.get_listing("list_spells", "/spells").await?;
        Ok(into_resource_refs(listing))
    }

    async fn get_spell(&self, index: &str) -> Result<Spell, CatalogError> {
        let body = self
            .get_text("get_spell", &format!("/spells/{index}"))
            .await?;
        let record: SpellRecord = decode(&body).map_err(|e| CatalogError::malformed(index, e))?;
        spell_from_record(record)
    }

    async fn list_classes(&self) -> Result<Vec<ResourceRef>, CatalogError> {
        let listing = self.get_listing("list_classes", "/classes").await?;
        Ok(into_resource_refs(listing))
    }

    async fn list_class_spells(&self, class_index: &str) -> Result<Vec<String>, CatalogError> {
        let listing = self
            .get_listing("list_class_spells", &format!("/classes/{class_index}/spells"))
            .await?;
        Ok(listing.indices())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(body)
}

fn into_resource_refs(listing: ApiReferenceList) -> Vec<ResourceRef> {
    listing
        .results
        .into_iter()
        .map(|r| ResourceRef {
            index: r.index,
            name: r.name,
        })
        .collect()
}

/// Convert an API spell record into a domain spell.
///
/// A missing or unknown school lands in the neutral school bucket and unknown
/// component symbols are dropped. A missing or out-of-range level cannot be
/// represented and makes the record malformed.
pub fn spell_from_record(record: SpellRecord) -> Result<Spell, CatalogError> {
    let level = record
        .level
        .ok_or_else(|| CatalogError::malformed(&record.index, "missing level"))
        .and_then(|level| {
            u8::try_from(level)
                .map_err(|_| format!("spell level {level} is out of range"))
                .and_then(|level| SpellLevel::new(level).map_err(|e| e.to_string()))
                .map_err(|reason| CatalogError::malformed(&record.index, reason))
        })?;

    let school = match record.school_label() {
        Some(label) => MagicSchool::from_label(label),
        None => {
            tracing::warn!(index = %record.index, "Spell record has no school");
            MagicSchool::Unrecognized(String::new())
        }
    };
    if !school.is_recognized() {
        tracing::debug!(index = %record.index, school = %school, "Unrecognized school");
    }

    let components = record.components.iter().filter_map(|symbol| {
        symbol
            .parse::<SpellComponent>()
            .map_err(|e| {
                tracing::warn!(index = %record.index, error = %e, "Dropping spell component");
            })
            .ok()
    });

    let name = if record.name.is_empty() {
        record.index.clone()
    } else {
        record.name.clone()
    };

    let mut spell = Spell::new(record.index.clone(), name, level, school)
        .with_casting(
            record.casting_time.clone(),
            record.range.clone(),
            record.duration.clone(),
        )
        .with_components(components)
        .with_description(record.desc.iter().cloned())
        .with_higher_level(record.higher_level.iter().cloned())
        .with_classes(record.class_names());
    spell.material = record.material;
    spell.ritual = record.ritual;
    spell.concentration = record.concentration;

    Ok(spell)
}
