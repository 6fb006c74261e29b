//! Accessors generated at build time, compiled as part of this crate.

#[allow(non_camel_case_types, clippy::all, clippy::pedantic)]
pub mod schema {
    include!(concat!(env!("OUT_DIR"), "/schema.rs"));
}
