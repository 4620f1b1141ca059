//! Unified error types for the domain layer
//!
//! Provides a common error type for value construction and parsing, so
//! adapters can report invariant violations without resorting to String.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a value outside its allowed range)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects and filter selections)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for invariant violations.
    ///
    /// Use this when a value cannot exist in the domain at all:
    /// - Spell levels outside 0..=9
    /// - Required identifiers that are empty
    ///
    /// # Example
    /// ```ignore
    /// if level > SpellLevel::MAX {
    ///     return Err(DomainError::validation(format!("spell level {level} is above 9")));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
