//! Metadata information regarding the introspected schema and the tables it persists.

pub mod catalog;
pub mod database;

// re-export without modules
pub use catalog::*;
pub use database::*;
