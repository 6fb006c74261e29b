//! Typed, catalog-driven access to the tables of a schema.
//!
//! A [`SchemaBridge`] owns a compiled catalog and a connection pool, and hands out one
//! [`TableAccessor`] per table. [`generate::generate_module`] emits typed wrappers around
//! those accessors for every table of a catalog.

pub mod accessor;
pub mod error;
pub mod generate;
pub mod query;
pub mod state;

pub use accessor::{SchemaBridge, TableAccessor};
pub use error::Error;
pub use query::{OrderByDirection, Query};
pub use query_engine_translation::translation::input::{Condition, Data, InputValue};
pub use query_engine_translation::translation::query::Selection;

/// Items used by generated accessor modules.
#[doc(hidden)]
pub mod __reexports {
    pub use query_engine_metadata;
    pub use query_engine_translation;
    pub use serde;
    pub use serde_json;
    pub use sqlx;
}
