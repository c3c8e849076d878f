use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::Schema;

pub const APPLICATION_JSON: &str = "application/json";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// A media type object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Schema,
}

/// Media type → schema, in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content(IndexMap<String, MediaType>);

/// JSON and multipart forms are the only bodies the generated code binds.
/// Parameters such as `; charset=utf-8` are ignored.
pub fn is_bindable_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case(APPLICATION_JSON)
        || essence.eq_ignore_ascii_case(MULTIPART_FORM_DATA)
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, media_type: impl Into<String>, schema: Schema) -> Self {
        self.0.insert(media_type.into(), MediaType { schema });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, media_type: &str) -> Option<&Schema> {
        self.0.get(media_type).map(|mt| &mt.schema)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.0.iter().map(|(k, mt)| (k, &mt.schema))
    }

    /// The schema of the first JSON or multipart entry.
    pub fn bindable_schema(&self) -> Option<&Schema> {
        self.iter()
            .find(|(media_type, _)| is_bindable_media_type(media_type))
            .map(|(_, schema)| schema)
    }

    /// Whether the bindable schema exists and carries a shape.
    pub fn has_bindable_schema(&self) -> bool {
        self.bindable_schema().is_some_and(Schema::is_set)
    }

    /// Whether a JSON or multipart entry exists at all, set or not.
    pub fn is_parametrized(&self) -> bool {
        self.0.keys().any(|k| is_bindable_media_type(k))
    }
}
