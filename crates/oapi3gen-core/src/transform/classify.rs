//! Facts derived from an operation's request body and response map.

use std::fmt;

use crate::parse::operation::Operation;
use crate::parse::response::Response;
use crate::parse::schema::Schema;

/// A response-map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusPattern {
    /// A concrete status code such as `200`, with the key it was written as.
    Literal { code: u16, key: String },
    /// The `default` keyword.
    Default,
    /// A class such as `4XX`, or anything else that is not a number.
    Wildcard(String),
}

impl StatusPattern {
    pub fn parse(key: &str) -> Self {
        if key == "default" {
            return StatusPattern::Default;
        }
        match key.parse::<u16>() {
            Ok(code) => StatusPattern::Literal {
                code,
                key: key.to_string(),
            },
            Err(_) => StatusPattern::Wildcard(key.to_string()),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, StatusPattern::Literal { .. })
    }

    /// The concrete code used when the handler does not pick one.
    pub fn default_code(&self) -> String {
        default_status_code(&self.to_string())
    }
}

impl fmt::Display for StatusPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusPattern::Literal { key, .. } => f.write_str(key),
            StatusPattern::Default => f.write_str("default"),
            StatusPattern::Wildcard(p) => f.write_str(p),
        }
    }
}

/// `default` → `200`, `4XX` → `400`, anything else unchanged.
pub fn default_status_code(pattern: &str) -> String {
    if pattern == "default" {
        "200".to_string()
    } else if pattern.contains('X') {
        pattern.replace('X', "0")
    } else {
        pattern.to_string()
    }
}

impl Operation {
    /// Whether a request body with content is declared.
    pub fn has_request_body(&self) -> bool {
        self.request_body.content.is_some()
    }

    /// Whether the body has a JSON or multipart schema with a shape.
    pub fn has_bindable_body(&self) -> bool {
        self.request_body
            .content
            .as_ref()
            .is_some_and(|c| c.has_bindable_schema())
    }

    /// Whether the body has a JSON or multipart entry, with or without schema.
    pub fn has_parametrized_body(&self) -> bool {
        self.request_body
            .content
            .as_ref()
            .is_some_and(|c| c.is_parametrized())
    }

    /// The bindable request-body schema, if any.
    pub fn body_schema(&self) -> Option<&Schema> {
        self.request_body
            .content
            .as_ref()
            .and_then(|c| c.bindable_schema())
    }

    /// Every response keyed by its parsed status pattern.
    pub fn status_patterns(&self) -> Vec<(StatusPattern, &Response)> {
        self.responses
            .iter()
            .map(|(key, response)| (StatusPattern::parse(key), response))
            .collect()
    }

    /// Responses that get a typed slot in the generated response envelope:
    /// literal codes carrying a reference or a bindable schema, by code.
    pub fn real_responses(&self) -> Vec<(u16, &Response)> {
        let mut real: Vec<_> = self
            .status_patterns()
            .into_iter()
            .filter_map(|(pattern, response)| match pattern {
                StatusPattern::Literal { code, .. } => Some((code, response)),
                _ => None,
            })
            .filter(|(_, response)| {
                response.reference.is_set() || response.content.has_bindable_schema()
            })
            .collect();
        real.sort_by_key(|(code, _)| *code);
        real
    }

    /// Whether no response carries a body. A `default` response pointing at
    /// the generic error does not count.
    pub fn is_all_empty_responses(&self) -> bool {
        self.responses.iter().all(|(key, response)| {
            (key == "default" && response.reference.is_generic_error()) || response.is_empty()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::content::Content;
    use crate::parse::operation::RequestBody;
    use crate::parse::reference::GENERIC_ERROR_REF;
    use crate::parse::schema::SchemaType;

    fn json(schema: Schema) -> Response {
        Response::with_content(Content::new().with("application/json", schema))
    }

    #[test]
    fn status_expansion() {
        assert_eq!(default_status_code("404"), "404");
        assert_eq!(default_status_code("default"), "200");
        assert_eq!(default_status_code("4XX"), "400");
        assert_eq!(default_status_code("5XX"), "500");
        assert_eq!(StatusPattern::parse("2XX").default_code(), "200");
    }

    #[test]
    fn status_parsing() {
        assert_eq!(
            StatusPattern::parse("201"),
            StatusPattern::Literal {
                code: 201,
                key: "201".into()
            }
        );
        assert_eq!(StatusPattern::parse("default"), StatusPattern::Default);
        assert_eq!(
            StatusPattern::parse("4XX"),
            StatusPattern::Wildcard("4XX".into())
        );
        assert!(!StatusPattern::parse("4XX").is_literal());
    }

    #[test]
    fn literal_keys_keep_their_text() {
        let padded = StatusPattern::parse("0200");
        assert!(padded.is_literal());
        assert_eq!(padded.to_string(), "0200");
        assert_eq!(padded.default_code(), "0200");

        let mut op = Operation::default();
        op.responses
            .insert("0200".into(), json(Schema::of_type(SchemaType::Object)));
        let keys: Vec<_> = op
            .status_patterns()
            .into_iter()
            .map(|(pattern, _)| pattern.to_string())
            .collect();
        assert!(keys.iter().all(|k| op.responses.contains_key(k)));
    }

    #[test]
    fn generic_error_default_is_ignored() {
        let mut op = Operation::default();
        op.responses
            .insert("default".into(), Response::reference(GENERIC_ERROR_REF));
        assert!(op.is_all_empty_responses());

        op.responses
            .insert("200".into(), json(Schema::of_type(SchemaType::Object)));
        assert!(!op.is_all_empty_responses());
    }

    #[test]
    fn other_default_references_count() {
        let mut op = Operation::default();
        op.responses.insert(
            "default".into(),
            Response::reference("#/components/responses/Problem"),
        );
        assert!(!op.is_all_empty_responses());
    }

    #[test]
    fn real_responses_skip_patterns_and_empty_bodies() {
        let mut op = Operation::default();
        op.responses
            .insert("404".into(), Response::reference("#/components/responses/NotFound"));
        op.responses
            .insert("200".into(), json(Schema::reference("#/components/schemas/Pet")));
        op.responses.insert("204".into(), Response::default());
        op.responses
            .insert("4XX".into(), json(Schema::of_type(SchemaType::Object)));
        op.responses
            .insert("default".into(), Response::reference(GENERIC_ERROR_REF));
        let codes: Vec<_> = op.real_responses().into_iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec![200, 404]);
    }

    #[test]
    fn request_body_facts() {
        let mut op = Operation::default();
        assert!(!op.has_request_body());
        assert!(!op.has_parametrized_body());

        op.request_body = RequestBody {
            required: true,
            content: Some(Content::new().with("multipart/form-data", Schema::default())),
        };
        assert!(op.has_request_body());
        assert!(op.has_parametrized_body());
        assert!(!op.has_bindable_body());

        op.request_body.content =
            Some(Content::new().with("application/json", Schema::of_type(SchemaType::Array)));
        assert!(op.has_bindable_body());

        op.request_body.content =
            Some(Content::new().with("application/octet-stream", Schema::of_type(SchemaType::String)));
        assert!(op.has_request_body());
        assert!(!op.has_parametrized_body());
        assert!(op.body_schema().is_none());
    }
}
