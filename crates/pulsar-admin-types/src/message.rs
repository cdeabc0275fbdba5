//! Messages reconstructed from admin API responses.

use crate::message_id::MessageId;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Property key holding the broker publish timestamp.
pub const PUBLISH_TIME_PROPERTY: &str = "publish-time";

/// A message read through the admin API.
///
/// Each message owns its payload and its property map, including the
/// messages unrolled from one batched entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Fully-qualified topic name
    pub topic: String,
    /// Identity of the message, batch index included
    #[serde(serialize_with = "serialize_id")]
    pub id: MessageId,
    /// Raw payload bytes
    #[serde(serialize_with = "serialize_payload")]
    pub payload: Vec<u8>,
    /// Message properties, merged from response headers and batch metadata
    pub properties: HashMap<String, String>,
}

impl Message {
    pub fn new(
        topic: impl Into<String>,
        id: MessageId,
        payload: Vec<u8>,
        properties: HashMap<String, String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            id,
            payload,
            properties,
        }
    }

    /// Raw publish time as sent by the broker.
    pub fn publish_time_raw(&self) -> Option<&str> {
        self.properties
            .get(PUBLISH_TIME_PROPERTY)
            .map(String::as_str)
    }

    /// Publish time, if the broker sent one in RFC 3339 form.
    pub fn publish_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.publish_time_raw()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn payload_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

fn serialize_id<S: Serializer>(id: &MessageId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

// Payloads are arbitrary bytes, so JSON output carries them base64-encoded.
fn serialize_payload<S: Serializer>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(payload))
}
