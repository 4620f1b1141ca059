//! Spelltome Engine library.
//!
//! Loads the D&D 5e spell catalog and drives a terminal browsing session.
//!
//! ## Structure
//!
//! - `use_cases/` - Catalog loading and the criteria-owning browse session
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - Command-line and terminal entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
pub use config::EngineConfig;
