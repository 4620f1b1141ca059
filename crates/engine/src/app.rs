//! Application state and composition.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::infrastructure::dnd5e_api::Dnd5eApiClient;
use crate::infrastructure::ports::SpellDataPort;
use crate::use_cases::{CatalogUseCases, DetailFailurePolicy};

/// Main application state.
///
/// Holds the data source port and the use cases built on it.
pub struct App {
    pub data_source: Arc<dyn SpellDataPort>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub catalog: CatalogUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(data_source: Arc<dyn SpellDataPort>, policy: DetailFailurePolicy) -> Self {
        let catalog = CatalogUseCases::new(data_source.clone(), policy);

        Self {
            data_source,
            use_cases: UseCases { catalog },
        }
    }

    /// Wire the app against the HTTP data source described by `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        tracing::info!(
            api_url = %config.api_url,
            timeout = ?config.request_timeout,
            policy = ?config.detail_failure,
            "Configuring spell data source"
        );
        let client = Dnd5eApiClient::with_timeout(&config.api_url, config.request_timeout);
        Self::new(Arc::new(client), config.detail_failure)
    }
}
