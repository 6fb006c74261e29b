//! Translate conditions, payloads and field selections to SQL execution plans.

pub mod datetime;
pub mod error;
pub mod helpers;
pub mod input;
pub mod mutation;
pub mod query;
pub mod values;
