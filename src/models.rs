use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The single resource exposed by the API
///
/// Every field falls back to its default when missing from a create payload;
/// the handlers do not validate pets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Pet {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Pet {
    /// Parse a create payload, matching field names case-insensitively.
    ///
    /// `{"Id": 7}` and `{"ID": 7}` both bind to `id`.
    pub fn from_payload(body: &[u8]) -> serde_json::Result<Pet> {
        let value = match serde_json::from_slice::<JsonValue>(body)? {
            JsonValue::Object(fields) => JsonValue::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key.to_lowercase(), value))
                    .collect::<Map<String, JsonValue>>(),
            ),
            other => other,
        };

        serde_json::from_value(value)
    }
}

/// Authorization marker attached to each HTTP invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authorized,
    Unauthorized,
}
