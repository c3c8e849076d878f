use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::components::Components;
use super::operation::{Operation, PathItem};
use super::ref_resolve::RefResolver;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub version: String,
}

/// Top-level API description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Specification {
    pub openapi: String,

    #[serde(default)]
    pub info: Info,

    #[serde(rename = "basePath", default)]
    pub base_path: String,

    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,

    #[serde(default)]
    pub components: Components,
}

/// One operation together with where it is mounted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountedOperation {
    pub path: String,
    pub method: &'static str,
    pub operation: Operation,
}

impl Specification {
    pub fn resolver(&self) -> RefResolver<'_> {
        RefResolver::new(&self.components)
    }

    /// Every operation, ordered by path then method, with path-level
    /// parameters merged in.
    pub fn operations(&self) -> Vec<MountedOperation> {
        self.paths
            .iter()
            .flat_map(|(path, item)| {
                item.operations().map(move |(method, op)| MountedOperation {
                    path: path.clone(),
                    method,
                    operation: item.effective_operation(op),
                })
            })
            .collect()
    }

    /// Go package name: `v<major>` of the API version, `v1` when the version
    /// is not semver.
    pub fn package_name(&self) -> String {
        match semver::Version::parse(self.info.version.trim_start_matches('v')) {
            Ok(v) => format!("v{}", v.major),
            Err(_) => "v1".to_string(),
        }
    }

    /// Whether `#/components/responses/Error` is declared.
    pub fn has_generic_error_response(&self) -> bool {
        self.components.responses.contains_key("Error")
    }

    /// Every `x-middlewares` name used by any operation, sorted and unique.
    pub fn middleware_names(&self) -> Vec<String> {
        self.paths
            .values()
            .flat_map(|item| item.operations().map(|(_, op)| op))
            .flat_map(|op| op.middlewares.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_version(version: &str) -> Specification {
        Specification {
            openapi: "3.0.0".into(),
            info: Info {
                version: version.into(),
                ..Info::default()
            },
            ..Specification::default()
        }
    }

    #[test]
    fn package_name_from_major_version() {
        assert_eq!(with_version("2.4.1").package_name(), "v2");
        assert_eq!(with_version("v3.0.0").package_name(), "v3");
        assert_eq!(with_version("latest").package_name(), "v1");
        assert_eq!(with_version("").package_name(), "v1");
    }

    #[test]
    fn middleware_names_are_sorted_and_unique() {
        let yaml = r#"
openapi: 3.0.0
paths:
  /a:
    get: {x-middlewares: [auth, ratelimit]}
    post: {x-middlewares: [auth]}
  /b:
    get: {x-middlewares: [audit]}
"#;
        let spec: Specification = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(spec.middleware_names(), vec!["audit", "auth", "ratelimit"]);
    }

    #[test]
    fn operations_are_ordered_by_path_then_method() {
        let yaml = r#"
openapi: 3.0.0
paths:
  /b: {get: {}}
  /a: {put: {}, get: {}}
"#;
        let spec: Specification = serde_yaml_ng::from_str(yaml).unwrap();
        let mounted: Vec<_> = spec
            .operations()
            .into_iter()
            .map(|m| format!("{} {}", m.method, m.path))
            .collect();
        assert_eq!(mounted, vec!["get /a", "put /a", "get /b"]);
    }
}
