use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.oapi3gen.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// API description to read (YAML or JSON).
    pub input: String,
    /// Go file to write. `-` writes to stdout.
    pub output: String,
    /// Server flavour: `default` or `echo`. Unknown names fall back to
    /// `default`.
    pub server: String,
    /// Skip `gofmt` and keep the raw template output.
    pub debug: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "api.go".to_string(),
            server: "default".to_string(),
            debug: false,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oapi3gen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GeneratorConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: GeneratorConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oapi3gen configuration
input: openapi.yaml
output: api.go        # "-" prints to stdout
server: default       # default | echo

# Skip gofmt and write the raw output (also enabled by the `debug` env var)
debug: false
"#
}
