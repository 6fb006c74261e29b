mod common;

use schema_bridge::generate::generate_module;

fn generated_file() -> syn::File {
    syn::parse_file(&generate_module(&common::catalog())).unwrap()
}

fn module<'a>(items: &'a [syn::Item], name: &str) -> &'a [syn::Item] {
    items
        .iter()
        .find_map(|item| match item {
            syn::Item::Mod(module) if module.ident == name => {
                module.content.as_ref().map(|(_, items)| items.as_slice())
            }
            _ => None,
        })
        .unwrap_or_else(|| panic!("no module {name}"))
}

fn idents(items: &[syn::Item]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Const(constant) => Some(constant.ident.to_string()),
            syn::Item::Struct(structure) => Some(structure.ident.to_string()),
            syn::Item::Mod(module) => Some(module.ident.to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn table_constants_follow_the_catalog() {
    let file = generated_file();
    assert_eq!(idents(module(&file.items, "tables")), vec!["POST", "USER"]);
    assert_eq!(idents(module(&file.items, "field_types")), vec!["POST", "USER"]);
    assert_eq!(idents(module(&file.items, "fields")), vec!["post", "user"]);
}

#[test]
fn field_constants_cover_every_field() {
    let file = generated_file();
    let user = module(module(&file.items, "fields"), "user");
    assert_eq!(idents(user), vec!["ID", "EMAIL", "CREATED_AT", "POSTS"]);
}

#[test]
fn rows_hold_only_stored_fields() {
    let file = generated_file();
    let rows = module(&file.items, "rows");
    let user = rows
        .iter()
        .find_map(|item| match item {
            syn::Item::Struct(structure) if structure.ident == "User" => Some(structure),
            _ => None,
        })
        .unwrap();

    let fields: Vec<String> = user
        .fields
        .iter()
        .filter_map(|field| field.ident.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(fields, vec!["id", "email", "created_at"]);
}

#[test]
fn one_accessor_per_table() {
    let file = generated_file();
    assert_eq!(idents(module(&file.items, "accessors")), vec!["Post", "User"]);

    let source = generate_module(&common::catalog());
    assert!(source.contains("fn query_one"));
    assert!(source.contains("fn query_many"));
    assert!(source.contains("fn update_one"));
}

#[test]
fn catalog_is_embedded() {
    let file = generated_file();
    assert!(file.items.iter().any(|item| matches!(
        item,
        syn::Item::Fn(function) if function.sig.ident == "catalog"
    )));
}
