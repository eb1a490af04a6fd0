//! Inbound report request payload.

use serde::{Deserialize, Deserializer, Serialize};

/// Caller-supplied values for a single report run.
///
/// Identifiers arrive as strings or bare JSON numbers depending on the
/// client; both are normalised to strings. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub client_number: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub date_from: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub date_to: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub invoice_number: Option<String>,
}

impl ReportRequest {
    /// Request carrying only a client number.
    pub fn for_client(client_number: impl Into<String>) -> Self {
        Self {
            client_number: Some(client_number.into()),
            ..Self::default()
        }
    }
}

/// Deserialize an optional identifier given as a string or a bare number.
///
/// Works with any self-describing format, so config files share it with the
/// request payload.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}
