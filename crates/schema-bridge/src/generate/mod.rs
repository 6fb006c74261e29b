//! Generate typed accessor modules from a catalog.
//!
//! The generated module is meant to be included into a crate that depends on
//! `schema-bridge`, for example with `include!(concat!(env!("OUT_DIR"), "/schema.rs"))`.

mod accessors;
mod constants;
mod names;
mod rows;

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use query_engine_metadata::metadata::{Catalog, SemanticType, TypeInfo};

const HEADER: &str = "// @generated by schema-bridge from the schema catalog. Do not edit.\n";

/// Generate the source of an accessor module for every table of a catalog.
///
/// The module holds the `tables`, `fields` and `field_types` constants, a `catalog()`
/// function embedding the whole catalog, one `rows` struct per table and one typed
/// accessor per table.
#[must_use]
pub fn generate_module(catalog: &Catalog) -> String {
    let builder = ModuleBuilder::new(catalog);
    let tokens = builder.generate();
    tracing::debug!(tables = builder.tables.len(), "generated accessor module");

    format!("{HEADER}{tokens}\n")
}

///
/// ModuleBuilder
///

pub(crate) struct ModuleBuilder<'a> {
    pub(crate) catalog: &'a Catalog,
    pub(crate) tables: Vec<TableNames<'a>>,
}

impl<'a> ModuleBuilder<'a> {
    pub(crate) fn new(catalog: &'a Catalog) -> Self {
        let mut constants = names::Scope::default();
        let mut modules = names::Scope::default();
        let mut structs = names::Scope::default();

        let tables = catalog
            .tables()
            .map(|info| TableNames::new(info, &mut constants, &mut modules, &mut structs))
            .collect();

        Self { catalog, tables }
    }

    pub(crate) fn generate(&self) -> TokenStream {
        let mut tokens = quote!();

        tokens.extend(constants::generate(self));
        tokens.extend(rows::generate(self));
        tokens.extend(accessors::generate(self));

        tokens
    }
}

///
/// TableNames
///
/// The identifiers generated for one table, shared by every generated module.
///

pub(crate) struct TableNames<'a> {
    pub(crate) info: &'a TypeInfo,
    /// `tables::*` and `field_types::*`
    pub(crate) constant: Ident,
    /// `fields::*`
    pub(crate) module: Ident,
    /// `rows::*` and `accessors::*`
    pub(crate) pascal: Ident,
    /// every field, as constants of `fields::<module>`
    pub(crate) field_constants: Vec<(&'a str, Ident)>,
    /// stored fields, as members of the row struct
    pub(crate) row_fields: Vec<(&'a str, SemanticType, Ident)>,
}

impl<'a> TableNames<'a> {
    fn new(
        info: &'a TypeInfo,
        constants: &mut names::Scope,
        modules: &mut names::Scope,
        structs: &mut names::Scope,
    ) -> Self {
        let mut field_constants = names::Scope::default();
        let mut row_fields = names::Scope::default();

        TableNames {
            info,
            constant: constants.claim(names::constant(&info.name)),
            module: modules.claim(names::snake(&info.name)),
            pascal: structs.claim(names::pascal(&info.name)),
            field_constants: info
                .fields
                .keys()
                .map(|field| (field.as_str(), field_constants.claim(names::constant(field))))
                .collect(),
            row_fields: info
                .storable_fields()
                .map(|(field, semantic_type)| {
                    (field, semantic_type, row_fields.claim(names::snake(field)))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new([
            TypeInfo::table(
                "BlogPost",
                [
                    ("id", SemanticType::Id),
                    ("type", SemanticType::Enum),
                    ("createdAt", SemanticType::DateTime),
                    ("comments", SemanticType::Relation),
                ],
            ),
            TypeInfo::reference("BlogPostWhereInput", [("title_contains", SemanticType::String)]),
        ])
    }

    #[test]
    fn test_generated_module_parses() {
        let source = generate_module(&catalog());
        assert!(source.starts_with("// @generated"));
        let file = syn::parse_file(&source).unwrap();

        let modules: Vec<String> = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Mod(module) => Some(module.ident.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(
            modules,
            vec!["tables", "fields", "field_types", "rows", "accessors"]
        );
    }

    #[test]
    fn test_empty_catalog_still_generates() {
        let source = generate_module(&Catalog::empty());
        syn::parse_file(&source).unwrap();
    }

    #[test]
    fn test_underscore_field_names_generate() {
        let catalog = Catalog::new([TypeInfo::table(
            "User",
            [("id", SemanticType::Id), ("_", SemanticType::String)],
        )]);
        let file = syn::parse_file(&generate_module(&catalog)).unwrap();

        let rows = file
            .items
            .iter()
            .find_map(|item| match item {
                syn::Item::Mod(module) if module.ident == "rows" => module.content.as_ref(),
                _ => None,
            })
            .unwrap();
        let syn::Item::Struct(user) = &rows.1[0] else {
            panic!("rows holds structs");
        };
        let fields: Vec<String> = user
            .fields
            .iter()
            .filter_map(|field| field.ident.as_ref().map(ToString::to_string))
            .collect();
        assert_eq!(fields, vec!["id", "field_"]);
    }

    #[test]
    fn test_names_are_shared_across_modules() {
        let catalog = Catalog::new([
            TypeInfo::table("Post", [("id", SemanticType::Id)]),
            TypeInfo::table("post", [("id", SemanticType::Id)]),
        ]);
        let builder = ModuleBuilder::new(&catalog);
        let names: Vec<(String, String, String)> = builder
            .tables
            .iter()
            .map(|table| {
                (
                    table.constant.to_string(),
                    table.module.to_string(),
                    table.pascal.to_string(),
                )
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("POST".to_string(), "post".to_string(), "Post".to_string()),
                ("POST_2".to_string(), "post_2".to_string(), "Post_2".to_string()),
            ]
        );
    }
}
