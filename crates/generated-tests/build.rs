//! Generate accessors for a catalog whose names collide with runtime and prelude items.

use std::{env, fs, io, path::PathBuf};

use query_engine_metadata::metadata::{Catalog, SemanticType, TypeInfo};

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let catalog = Catalog::new([
        TypeInfo::table(
            "Error",
            [("id", SemanticType::Id), ("message", SemanticType::String)],
        ),
        TypeInfo::table(
            "Option",
            [
                ("id", SemanticType::Id),
                ("_", SemanticType::String),
                ("_1", SemanticType::Number),
                ("createdAt", SemanticType::DateTime),
                ("created_at", SemanticType::String),
            ],
        ),
        TypeInfo::table(
            "Query",
            [
                ("id", SemanticType::Id),
                ("type", SemanticType::Enum),
                ("meta", SemanticType::Json),
            ],
        ),
        TypeInfo::table(
            "Result",
            [("id", SemanticType::Id), ("done", SemanticType::Boolean)],
        ),
        TypeInfo::table(
            "User",
            [
                ("id", SemanticType::Id),
                ("email", SemanticType::String),
                ("posts", SemanticType::Relation),
            ],
        ),
        TypeInfo::table("user", [("id", SemanticType::Id)]),
        TypeInfo::reference("UserWhereInput", [("email_contains", SemanticType::String)]),
    ]);

    let out_dir = PathBuf::from(env::var("OUT_DIR").map_err(io::Error::other)?);
    fs::write(
        out_dir.join("schema.rs"),
        schema_bridge::generate::generate_module(&catalog),
    )
}
