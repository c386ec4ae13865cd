//! Error taxonomy surfaced by the facade's public operations.
//!
//! Lookups that match nothing are not errors: they produce empty cursors.

use thiserror::Error;

/// Errors returned by [`MediaFacade`](crate::MediaFacade) operations.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// The catalog or the deleted-media table could not be read or written.
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),

    /// An argument could not be interpreted, e.g. an unknown album id or a
    /// malformed MIME pattern.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<rusqlite::Error> for FacadeError {
    fn from(err: rusqlite::Error) -> Self {
        FacadeError::Storage(err.into())
    }
}

pub type FacadeResult<T> = std::result::Result<T, FacadeError>;

/// Converts an unsigned id or generation into SQLite's signed integer range.
pub(crate) fn to_sql_integer(value: u64, what: &str) -> FacadeResult<i64> {
    i64::try_from(value)
        .map_err(|_| FacadeError::InvalidArgument(format!("{} {} is out of range", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_keeps_context_chain() {
        let err: FacadeError = anyhow::anyhow!("disk I/O error")
            .context("Failed to add deleted media")
            .into();
        let message = err.to_string();
        assert!(message.starts_with("Storage error: Failed to add deleted media"));
        assert!(message.contains("disk I/O error"));
    }

    #[test]
    fn test_to_sql_integer_rejects_values_above_i64_max() {
        assert_eq!(to_sql_integer(42, "id").unwrap(), 42);
        match to_sql_integer(u64::MAX, "generation") {
            Err(FacadeError::InvalidArgument(msg)) => assert!(msg.contains("generation")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
