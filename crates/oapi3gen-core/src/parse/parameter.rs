use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub schema: Schema,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: ParameterLocation, schema: Schema) -> Self {
        Self {
            name: name.into(),
            location,
            required: false,
            description: None,
            schema,
        }
    }

    /// Path parameters are required whatever the flag says.
    pub fn is_required(&self) -> bool {
        self.required || self.location == ParameterLocation::Path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_parameters_are_always_required() {
        let p: Parameter =
            serde_yaml_ng::from_str("name: id\nin: path\nrequired: false\nschema: {type: integer}\n")
                .unwrap();
        assert!(!p.required);
        assert!(p.is_required());
    }

    #[test]
    fn query_parameters_follow_the_flag() {
        let mut p = Parameter::new("limit", ParameterLocation::Query, Schema::default());
        assert!(!p.is_required());
        p.required = true;
        assert!(p.is_required());
    }
}
