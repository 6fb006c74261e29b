//! A schema service backed by GraphQL introspection over HTTP.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::service::{IntrospectedType, IntrospectionError, SchemaService};

const TYPE_NAMES_QUERY: &str = "query TypeNames { __schema { types { name kind } } }";

const TYPE_QUERY: &str = "query Type($name: String!) { __type(name: $name) { name interfaces { name } fields { name type { kind name ofType { kind name ofType { kind name } } enumValues { name } } } inputFields { name type { kind name ofType { kind name } } } } }";

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SchemaData {
    #[serde(rename = "__schema")]
    schema: SchemaTypes,
}

#[derive(Debug, Deserialize)]
struct SchemaTypes {
    types: Vec<NamedType>,
}

#[derive(Debug, Deserialize)]
struct NamedType {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TypeData {
    #[serde(rename = "__type")]
    type_: Option<IntrospectedType>,
}

/// Introspects a GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlSchemaService {
    client: reqwest::Client,
    endpoint: url::Url,
    bearer_token: Option<String>,
}

impl GraphQlSchemaService {
    pub fn new(endpoint: &str, bearer_token: Option<String>) -> Result<Self, IntrospectionError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: url::Url::parse(endpoint)?,
            bearer_token,
        })
    }

    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, IntrospectionError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables });
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response: GraphQlResponse<T> = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.errors.is_empty() {
            return Err(IntrospectionError::GraphQl(
                response.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        response.data.ok_or(IntrospectionError::MissingData)
    }
}

#[async_trait]
impl SchemaService for GraphQlSchemaService {
    async fn type_names(&self) -> Result<Vec<String>, IntrospectionError> {
        let data: SchemaData = self
            .request(TYPE_NAMES_QUERY, serde_json::json!({}))
            .await?;
        Ok(data.schema.types.into_iter().map(|t| t.name).collect())
    }

    async fn type_definition(
        &self,
        name: &str,
    ) -> Result<Option<IntrospectedType>, IntrospectionError> {
        let data: TypeData = self
            .request(TYPE_QUERY, serde_json::json!({ "name": name }))
            .await?;
        Ok(data.type_)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_endpoints() {
        assert!(matches!(
            GraphQlSchemaService::new("not a url", None),
            Err(IntrospectionError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_parses_type_responses() {
        let response: GraphQlResponse<TypeData> = serde_json::from_value(serde_json::json!({
            "data": {
                "__type": {
                    "name": "Post",
                    "interfaces": [{ "name": "Node" }],
                    "fields": [],
                    "inputFields": null
                }
            }
        }))
        .unwrap();
        let introspected = response.data.unwrap().type_.unwrap();
        assert!(introspected.implements("Node"));
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_parses_error_responses() {
        let response: GraphQlResponse<SchemaData> = serde_json::from_value(serde_json::json!({
            "data": null,
            "errors": [{ "message": "introspection is disabled" }]
        }))
        .unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "introspection is disabled");
    }
}
