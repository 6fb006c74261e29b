//! Errors raised by table accessors.

use thiserror::Error;

use query_engine_execution::error as execution;
use query_engine_translation::translation::error as translation;

/// An error while translating or running an accessor operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Translation(#[from] translation::Error),
    #[error(transparent)]
    Execution(#[from] execution::Error),
    #[error("no row was returned by the insert into '{0}'")]
    NoRowReturned(String),
    #[error("table '{0}' is not part of this query")]
    UnknownJoin(String),
    #[error("table alias '{0}' is already used in this query")]
    DuplicateJoin(String),
    #[error("unexpected row shape for table '{table}': {error}")]
    RowShape {
        table: String,
        error: serde_json::Error,
    },
}

impl Error {
    /// The failure reported by the database, if any.
    pub fn database_error(&self) -> Option<&sqlx::Error> {
        match self {
            Error::Execution(execution::Error::DB(error)) => Some(error),
            _ => None,
        }
    }
}
