use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::response::Response;
use super::schema::Schema;

/// Components object holding the two resolvable namespaces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,

    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
}
