//! Errors raised while loading the catalog from the data source.

use thiserror::Error;

/// Failure of a data-source operation.
///
/// An empty filter result is deliberately absent here: it is a normal
/// outcome, not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Transport failure or non-success response from the data source.
    #[error("Data source unavailable during {operation}: {message}")]
    DataSourceUnavailable {
        operation: &'static str,
        message: String,
    },

    /// A record that could not be decoded or violates a domain invariant.
    #[error("Malformed record {index}: {reason}")]
    MalformedRecord { index: String, reason: String },
}

impl CatalogError {
    /// Create a DataSourceUnavailable error with operation context.
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::DataSourceUnavailable {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a MalformedRecord error for the record with `index`.
    pub fn malformed(index: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            index: index.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::DataSourceUnavailable { .. })
    }
}
