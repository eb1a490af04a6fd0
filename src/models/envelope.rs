//! Outbound envelope sent to the reporting API.

use serde::Serialize;

use crate::config::RemoteSettings;

/// The exact JSON shape the remote API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedEnvelope {
    pub station: String,
    pub plugin: String,
    pub company: String,
    pub message: EnvelopeMessage,
    pub signature: String,
}

/// The `message` member of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeMessage {
    #[serde(rename = "netPassportID")]
    pub net_passport_id: String,
    /// The serialized, filled template, as text.
    #[serde(rename = "pluginData")]
    pub plugin_data: String,
}

impl SignedEnvelope {
    /// Wrap a serialized template and its signature with the configured
    /// identifiers.
    pub fn new(remote: &RemoteSettings, plugin_data: String, signature: String) -> Self {
        Self {
            station: remote.station.clone(),
            plugin: crate::constants::PLUGIN_NAME.to_string(),
            company: remote.company.clone(),
            message: EnvelopeMessage {
                net_passport_id: remote.net_passport_id.clone(),
                plugin_data,
            },
            signature,
        }
    }
}
