//! Errors for query execution.

use thiserror::Error;

/// Query execution errors.
///
/// Database failures are passed through unmodified: whether to roll back or retry
/// is the caller's decision.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    DB(#[from] sqlx::Error),
    #[error("statement on '{0}' does not return rows")]
    NotARowStatement(String),
}
