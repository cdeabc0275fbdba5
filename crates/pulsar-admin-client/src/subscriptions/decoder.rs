//! Decoding of peek / get-message responses.
//!
//! The broker answers both calls with the raw entry as body and the message
//! metadata as headers:
//!
//! | Header | Meaning |
//! |---|---|
//! | `X-Pulsar-Message-ID` | `ledger:entry:partition:batch`, required |
//! | `X-Pulsar-Publish-Time` | publish timestamp, copied to property `publish-time` |
//! | `X-Pulsar-Num-Batch-Message` | present when the body is a batch of N messages |
//! | `X-Pulsar-Property-<key>` | one message property each |
//!
//! Headers are classified in two passes over the header map: the batch header
//! is looked up first, then all property headers are applied, and only then
//! does decoding branch. The outcome therefore never depends on header
//! iteration order.

use crate::error::{Error, Result};
use crate::subscriptions::batch::decode_batch;
use crate::transport::RawResponse;
use pulsar_admin_types::{Message, MessageId, PUBLISH_TIME_PROPERTY};
use reqwest::header::HeaderMap;
use std::collections::HashMap;

pub const MESSAGE_ID_HEADER: &str = "X-Pulsar-Message-ID";
pub const PUBLISH_TIME_HEADER: &str = "X-Pulsar-Publish-Time";
pub const BATCH_HEADER: &str = "X-Pulsar-Num-Batch-Message";
pub const PROPERTY_PREFIX: &str = "X-Pulsar-Property-";

/// Decode every message carried by one response.
///
/// Either all messages decode or an error is returned; a partially decoded
/// batch is never handed out.
pub fn decode_response(topic: &str, response: &RawResponse) -> Result<Vec<Message>> {
    let id = message_id(&response.headers)?;

    let batch_count = response
        .headers
        .get(BATCH_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    let mut properties = base_properties(&response.headers);

    match batch_count {
        Some(count) => {
            tracing::debug!("Decoding batch of '{}' messages at {}", count, id);
            properties.insert(BATCH_HEADER.to_string(), count.clone());
            decode_batch(topic, id, &response.body, &properties, &count)
        }
        None => Ok(vec![Message::new(
            topic,
            id,
            response.body.to_vec(),
            properties,
        )]),
    }
}

fn message_id(headers: &HeaderMap) -> Result<MessageId> {
    let raw = headers
        .get(MESSAGE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(Error::MissingIdentity)?;
    Ok(MessageId::parse(raw)?)
}

/// Properties shared by every message of the response.
fn base_properties(headers: &HeaderMap) -> HashMap<String, String> {
    let mut properties = HashMap::new();

    if let Some(publish_time) = headers.get(PUBLISH_TIME_HEADER) {
        let value = String::from_utf8_lossy(publish_time.as_bytes());
        if !value.is_empty() {
            properties.insert(PUBLISH_TIME_PROPERTY.to_string(), value.into_owned());
        }
    }

    for (name, value) in headers {
        // HeaderName is always lower-case; the bare prefix names the empty key
        let name = name.as_str();
        if name.len() >= PROPERTY_PREFIX.len()
            && name[..PROPERTY_PREFIX.len()].eq_ignore_ascii_case(PROPERTY_PREFIX)
        {
            properties.insert(
                name[PROPERTY_PREFIX.len()..].to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
    }

    properties
}
