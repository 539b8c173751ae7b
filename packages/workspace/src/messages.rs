//! Wire messages exchanged with the property panel.
//!
//! Requests arrive from the panel as tagged JSON objects; updates flow back
//! as serialized [`ViewProjection`]s. The shapes here are the transport
//! contract and must stay stable.

use serde::Deserialize;
use thiserror::Error;

use propview_editor::ViewProjection;

/// Message pushed to the panel: a full update or a clear instruction.
pub type OutboundMessage = ViewProjection;

/// Request from the property panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    /// Change one property to a new value.
    #[serde(rename_all = "camelCase")]
    Edit {
        property_name: String,
        new_value: String,
        declared_type: String,
    },

    /// Restore one property to its class default.
    #[serde(rename_all = "camelCase")]
    Reset { property_name: String },

    /// Open the external reference page for a class.
    #[serde(rename_all = "camelCase")]
    OpenDocs { class_name: String },
}

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("malformed panel request: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode panel update: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decodes a raw panel request.
pub fn decode(raw: &str) -> Result<InboundMessage, MessageError> {
    serde_json::from_str(raw).map_err(MessageError::Decode)
}

/// Encodes an update for the panel.
pub fn encode(message: &OutboundMessage) -> Result<String, MessageError> {
    serde_json::to_string(message).map_err(MessageError::Encode)
}
