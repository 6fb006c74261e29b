use proc_macro2::TokenStream;
use quote::quote;

use query_engine_metadata::metadata::SemanticType;

use super::ModuleBuilder;

/// One struct per table with every stored field. All fields are optional, so the same
/// struct reads partial selections and writes partial payloads.
///
/// Paths are absolute: a table may be named like any item of the prelude.
pub(crate) fn generate(builder: &ModuleBuilder) -> TokenStream {
    let structs = builder.tables.iter().map(|table| {
        let ident = &table.pascal;
        let fields = table.row_fields.iter().map(|(name, semantic_type, field)| {
            let rust_type = rust_type(*semantic_type);
            quote! {
                #[serde(
                    rename = #name,
                    default,
                    skip_serializing_if = "::core::option::Option::is_none"
                )]
                pub #field: ::core::option::Option<#rust_type>,
            }
        });

        quote! {
            #[derive(
                Debug,
                Clone,
                Default,
                PartialEq,
                ::schema_bridge::__reexports::serde::Serialize,
                ::schema_bridge::__reexports::serde::Deserialize,
            )]
            #[serde(crate = "::schema_bridge::__reexports::serde")]
            pub struct #ident {
                #(#fields)*
            }
        }
    });

    quote! {
        /// Rows as they are returned, and payloads as they are written.
        pub mod rows {
            #(#structs)*
        }
    }
}

fn rust_type(semantic_type: SemanticType) -> TokenStream {
    match semantic_type {
        SemanticType::Number => quote!(f64),
        SemanticType::Boolean => quote!(bool),
        SemanticType::Json
        | SemanticType::Relation
        | SemanticType::Unknown => quote!(::schema_bridge::__reexports::serde_json::Value),
        // dates are projected as formatted strings
        SemanticType::Id
        | SemanticType::String
        | SemanticType::DateTime
        | SemanticType::Enum => quote!(::std::string::String),
    }
}
