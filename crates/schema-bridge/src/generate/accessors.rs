use proc_macro2::TokenStream;
use quote::quote;

use super::ModuleBuilder;

/// One accessor per table, reading and writing that table's row struct.
///
/// Nothing is imported into the generated module, so a table may share its name with any
/// runtime or prelude item.
pub(crate) fn generate(builder: &ModuleBuilder) -> TokenStream {
    let accessors = builder.tables.iter().map(|table| {
        let ident = &table.pascal;
        let table_const = &table.constant;
        let doc = format!(" CRUD operations on `{}`.", table.info.name);

        quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, Copy)]
            pub struct #ident<'a>(::schema_bridge::TableAccessor<'a>);

            impl<'a> #ident<'a> {
                pub fn new(
                    bridge: &'a ::schema_bridge::SchemaBridge,
                ) -> ::core::result::Result<Self, ::schema_bridge::Error> {
                    bridge.table(super::tables::#table_const).map(Self)
                }

                pub fn accessor(&self) -> &::schema_bridge::TableAccessor<'a> {
                    &self.0
                }

                pub async fn query_one(
                    &self,
                    condition: &::schema_bridge::Condition,
                    selection: &::schema_bridge::Selection,
                    tx: ::core::option::Option<&mut ::schema_bridge::__reexports::sqlx::postgres::PgConnection>,
                ) -> ::core::result::Result<::core::option::Option<super::rows::#ident>, ::schema_bridge::Error> {
                    self.0
                        .query_one(condition, selection, tx)
                        .await?
                        .map(|row| ::schema_bridge::accessor::decode_row(super::tables::#table_const, row))
                        .transpose()
                }

                pub fn query_many(
                    &self,
                    condition: &::schema_bridge::Condition,
                    selection: &::schema_bridge::Selection,
                ) -> ::core::result::Result<::schema_bridge::Query, ::schema_bridge::Error> {
                    self.0.query_many(condition, selection)
                }

                pub async fn insert(
                    &self,
                    input: &super::rows::#ident,
                    tx: ::core::option::Option<&mut ::schema_bridge::__reexports::sqlx::postgres::PgConnection>,
                    explicit_id: ::core::option::Option<&str>,
                ) -> ::core::result::Result<super::rows::#ident, ::schema_bridge::Error> {
                    let data = ::schema_bridge::accessor::encode_data(super::tables::#table_const, input)?;
                    let row = self.0.insert(&data, tx, explicit_id).await?;
                    ::schema_bridge::accessor::decode_row(super::tables::#table_const, row)
                }

                pub async fn update_one(
                    &self,
                    condition: &::schema_bridge::Condition,
                    data: &super::rows::#ident,
                    tx: ::core::option::Option<&mut ::schema_bridge::__reexports::sqlx::postgres::PgConnection>,
                ) -> ::core::result::Result<::core::option::Option<super::rows::#ident>, ::schema_bridge::Error> {
                    let data = ::schema_bridge::accessor::encode_data(super::tables::#table_const, data)?;
                    self.0
                        .update_one(condition, &data, tx)
                        .await?
                        .map(|row| ::schema_bridge::accessor::decode_row(super::tables::#table_const, row))
                        .transpose()
                }

                pub async fn delete(
                    &self,
                    condition: &::schema_bridge::Condition,
                    tx: ::core::option::Option<&mut ::schema_bridge::__reexports::sqlx::postgres::PgConnection>,
                ) -> ::core::result::Result<u64, ::schema_bridge::Error> {
                    self.0.delete(condition, tx).await
                }
            }
        }
    });

    quote! {
        /// Typed accessors, one per table.
        pub mod accessors {
            #(#accessors)*
        }
    }
}
