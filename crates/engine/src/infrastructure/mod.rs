//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod dnd5e_api;
pub mod error;
pub mod ports;

#[cfg(test)]
mod dnd5e_api_integration_tests;
