use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::content::Content;
use super::parameter::Parameter;
use super::response::Response;

/// An operation's request body. `content` is `None` when the operation
/// declares no body at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody", default)]
    pub request_body: RequestBody,

    /// Status pattern (`200`, `default`, `4XX`) → response.
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,

    #[serde(rename = "x-middlewares", default, skip_serializing_if = "Vec::is_empty")]
    pub middlewares: Vec<String>,
}

/// A path item, containing operations keyed by HTTP method.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// Parameters shared by every operation under this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Declared operations as `(method, operation)`, methods in alphabetical
    /// order.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("delete", &self.delete),
            ("get", &self.get),
            ("head", &self.head),
            ("options", &self.options),
            ("patch", &self.patch),
            ("post", &self.post),
            ("put", &self.put),
            ("trace", &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }

    /// A copy of `op` whose parameter list starts with the path-level
    /// parameters it does not override.
    pub fn effective_operation(&self, op: &Operation) -> Operation {
        let mut merged = op.clone();
        let inherited = self.parameters.iter().filter(|shared| {
            !op.parameters
                .iter()
                .any(|own| own.name == shared.name && own.location == shared.location)
        });
        merged.parameters = inherited.chain(op.parameters.iter()).cloned().collect();
        merged
    }
}
