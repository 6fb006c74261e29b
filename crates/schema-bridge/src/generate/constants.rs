use proc_macro2::TokenStream;
use quote::quote;

use query_engine_metadata::metadata::{SemanticType, TypeInfo, TypeKind};

use super::ModuleBuilder;

pub(crate) fn generate(builder: &ModuleBuilder) -> TokenStream {
    let mut tokens = quote!();
    tokens.extend(tables(builder));
    tokens.extend(fields(builder));
    tokens.extend(field_types(builder));
    tokens.extend(catalog(builder));
    tokens
}

fn tables(builder: &ModuleBuilder) -> TokenStream {
    let constants = builder.tables.iter().map(|table| {
        let ident = &table.constant;
        let name = table.info.name.as_str();
        quote!(pub const #ident: &str = #name;)
    });

    quote! {
        /// Table names.
        pub mod tables {
            #(#constants)*
        }
    }
}

fn fields(builder: &ModuleBuilder) -> TokenStream {
    let modules = builder.tables.iter().map(|table| {
        let module = &table.module;
        let constants = table
            .field_constants
            .iter()
            .map(|(name, ident)| quote!(pub const #ident: &str = #name;));
        quote! {
            pub mod #module {
                #(#constants)*
            }
        }
    });

    quote! {
        /// Field names, per table.
        pub mod fields {
            #(#modules)*
        }
    }
}

fn field_types(builder: &ModuleBuilder) -> TokenStream {
    let constants = builder.tables.iter().map(|table| {
        let ident = &table.constant;
        let entries = field_entries(table.info.fields.iter().map(|(k, v)| (k.as_str(), *v)));
        quote!(pub const #ident: &[(&str, SemanticType)] = &[#entries];)
    });

    quote! {
        /// Semantic field types, per table.
        pub mod field_types {
            use ::schema_bridge::__reexports::query_engine_metadata::metadata::SemanticType;

            #(#constants)*
        }
    }
}

fn catalog(builder: &ModuleBuilder) -> TokenStream {
    let types = builder.catalog.types().map(|type_info| {
        let name = type_info.name.as_str();
        let kind = match type_info.kind {
            TypeKind::Table => quote!(TypeKind::Table),
            TypeKind::Reference => quote!(TypeKind::Reference),
        };
        let fields = field_entries(type_info.fields.iter().map(|(k, v)| (k.as_str(), *v)));
        let input_fields =
            field_entries(type_info.input_fields.iter().map(|(k, v)| (k.as_str(), *v)));
        quote! {
            TypeInfo {
                name: #name.to_string(),
                kind: #kind,
                fields: fields(&[#fields]),
                input_fields: fields(&[#input_fields]),
            }
        }
    });

    quote! {
        /// The catalog this module was generated from.
        pub fn catalog() -> ::schema_bridge::__reexports::query_engine_metadata::metadata::Catalog {
            use ::schema_bridge::__reexports::query_engine_metadata::metadata::{
                Catalog, FieldsInfo, SemanticType, TypeInfo, TypeKind,
            };

            fn fields(fields: &[(&str, SemanticType)]) -> FieldsInfo {
                fields
                    .iter()
                    .map(|(name, semantic_type)| ((*name).to_string(), *semantic_type))
                    .collect()
            }

            Catalog::new([#(#types),*])
        }
    }
}

fn field_entries<'a>(fields: impl Iterator<Item = (&'a str, SemanticType)>) -> TokenStream {
    let entries = fields.map(|(name, semantic_type)| {
        let semantic_type = semantic_type_variant(semantic_type);
        quote!((#name, SemanticType::#semantic_type))
    });
    quote!(#(#entries),*)
}

fn semantic_type_variant(semantic_type: SemanticType) -> TokenStream {
    match semantic_type {
        SemanticType::Id => quote!(Id),
        SemanticType::String => quote!(String),
        SemanticType::Number => quote!(Number),
        SemanticType::DateTime => quote!(DateTime),
        SemanticType::Enum => quote!(Enum),
        SemanticType::Boolean => quote!(Boolean),
        SemanticType::Relation => quote!(Relation),
        SemanticType::Json => quote!(Json),
        SemanticType::Unknown => quote!(Unknown),
    }
}
