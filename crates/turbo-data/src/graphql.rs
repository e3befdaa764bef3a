//! GraphQL-over-HTTP request and response envelopes.

use serde::{Deserialize, Serialize};

/// A GraphQL operation ready to be posted as JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<V> {
    /// The query document.
    pub query: &'static str,
    /// Operation name inside the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<&'static str>,
    /// Operation variables.
    pub variables: V,
}

impl<V: Serialize> GraphqlRequest<V> {
    /// Create a request for a named operation.
    pub fn new(query: &'static str, operation_name: &'static str, variables: V) -> Self {
        Self {
            query,
            operation_name: Some(operation_name),
            variables,
        }
    }
}

/// One entry from a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

/// The `{data, errors}` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl<T> GraphqlResponse<T> {
    /// Collapse the envelope.
    ///
    /// Any reported error fails the whole operation, even when partial data
    /// came back alongside it.
    pub fn into_result(self) -> Result<Option<T>, Vec<GraphqlError>> {
        if self.errors.is_empty() {
            Ok(self.data)
        } else {
            Err(self.errors)
        }
    }
}

/// Join error messages for display.
pub fn join_errors(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let req = GraphqlRequest::new(
            "query Shop { shop { name } }",
            "Shop",
            serde_json::json!({"channel": "default-channel"}),
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["operationName"], "Shop");
        assert_eq!(json["variables"]["channel"], "default-channel");
    }

    #[test]
    fn test_response_with_errors() {
        let body = r#"{"data": null, "errors": [{"message": "Channel not found"}, {"message": "boom"}]}"#;
        let resp: GraphqlResponse<serde_json::Value> = serde_json::from_str(body).unwrap();
        let errors = resp.into_result().unwrap_err();
        assert_eq!(join_errors(&errors), "Channel not found; boom");
    }

    #[test]
    fn test_response_without_errors_field() {
        let body = r#"{"data": {"shop": {"name": "Demo"}}}"#;
        let resp: GraphqlResponse<serde_json::Value> = serde_json::from_str(body).unwrap();
        let data = resp.into_result().unwrap().unwrap();
        assert_eq!(data["shop"]["name"], "Demo");
    }
}
