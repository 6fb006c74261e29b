//! Query execution against a PostgreSQL database.

pub mod error;
pub mod query;
