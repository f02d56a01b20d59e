use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User record as returned by the identity service.
///
/// Only `id` is guaranteed. `name` is also read from the legacy `nome` key;
/// every other attribute is kept verbatim so it can be passed through to
/// API consumers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    #[serde(default, alias = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl User {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            attributes: Map::new(),
        }
    }
}
