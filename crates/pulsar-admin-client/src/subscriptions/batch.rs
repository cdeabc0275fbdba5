//! Batched entry decoding.
//!
//! A batched entry packs `N` messages back to back:
//!
//! ```text
//! [u32 BE metadata length L][L bytes SingleMessageMetadata][payload_size bytes]   x N
//! ```
//!
//! The payload size is a field of the metadata record, not a separate length
//! prefix.

use crate::error::{Error, Result};
use bytes::Buf;
use pulsar_admin_types::{Message, MessageId, SingleMessageMetadata};
use std::collections::HashMap;

/// Unroll a batched entry into its messages.
///
/// Each message gets a fresh copy of `base_properties` with its own metadata
/// properties laid over it; a property set on one record never leaks into
/// the next.
pub fn decode_batch(
    topic: &str,
    id: MessageId,
    body: &[u8],
    base_properties: &HashMap<String, String>,
    batch_count: &str,
) -> Result<Vec<Message>> {
    let count: usize = batch_count
        .trim()
        .parse()
        .map_err(|_| Error::InvalidBatchCount(batch_count.to_string()))?;

    // Every record needs at least its 4-byte length prefix
    let mut messages = Vec::with_capacity(count.min(body.len() / 4));
    let mut buf = body;

    for index in 0..count {
        let metadata_len = take(&mut buf, 4)?.get_u32() as usize;
        let metadata = SingleMessageMetadata::decode(take(&mut buf, metadata_len)?)?;
        let payload = take(&mut buf, metadata.payload_size as usize)?;

        let batch_index = i32::try_from(index)
            .map_err(|_| Error::InvalidBatchCount(batch_count.to_string()))?;

        let mut properties = base_properties.clone();
        properties.extend(metadata.properties);

        tracing::trace!(
            "Batch record {} of {}: {} byte payload",
            index,
            id,
            payload.len()
        );

        messages.push(Message::new(
            topic,
            id.with_batch_index(batch_index),
            payload.to_vec(),
            properties,
        ));
    }

    if buf.has_remaining() {
        tracing::debug!(
            "{} trailing bytes after {} batch records at {}",
            buf.remaining(),
            count,
            id
        );
    }

    Ok(messages)
}

/// Split `n` bytes off the front of `buf`.
fn take<'a>(buf: &mut &'a [u8], n: usize) -> Result<&'a [u8]> {
    if buf.remaining() < n {
        return Err(Error::TruncatedBatch {
            needed: n,
            remaining: buf.remaining(),
        });
    }
    let (head, tail) = buf.split_at(n);
    *buf = tail;
    Ok(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    const TOPIC: &str = "persistent://public/default/t";

    fn record(body: &mut BytesMut, metadata: &SingleMessageMetadata, payload: &[u8]) {
        let encoded = metadata.encode().unwrap();
        body.put_u32(encoded.len() as u32);
        body.put_slice(&encoded);
        body.put_slice(payload);
    }

    fn base(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_decodes_all_records_in_order() {
        let payloads: [&[u8]; 3] = [b"first", b"", b"third payload"];
        let mut body = BytesMut::new();
        for payload in payloads {
            record(
                &mut body,
                &SingleMessageMetadata::new(payload.len() as u32),
                payload,
            );
        }

        let id = MessageId::new(3, 4);
        let messages = decode_batch(TOPIC, id, &body, &HashMap::new(), "3").unwrap();

        assert_eq!(messages.len(), 3);
        for (i, msg) in messages.iter().enumerate() {
            assert_eq!(msg.id, id.with_batch_index(i as i32));
            assert_eq!(msg.payload, payloads[i]);
            assert_eq!(msg.topic, TOPIC);
        }
    }

    #[test]
    fn test_message_properties_override_base() {
        let mut body = BytesMut::new();
        record(
            &mut body,
            &SingleMessageMetadata::new(1)
                .with_property("a", "2")
                .with_property("b", "3"),
            b"x",
        );
        record(&mut body, &SingleMessageMetadata::new(1), b"y");

        let messages =
            decode_batch(TOPIC, MessageId::new(1, 1), &body, &base(&[("a", "1")]), "2").unwrap();

        assert_eq!(messages[0].properties, base(&[("a", "2"), ("b", "3")]));
        // No carry-over: record 1 sees only the base properties
        assert_eq!(messages[1].properties, base(&[("a", "1")]));
    }

    #[test]
    fn test_zero_count_is_empty() {
        let messages = decode_batch(TOPIC, MessageId::new(1, 1), b"", &HashMap::new(), "0").unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_invalid_count() {
        for count in ["abc", "-1", "", "1.5"] {
            let err =
                decode_batch(TOPIC, MessageId::new(1, 1), b"", &HashMap::new(), count).unwrap_err();
            assert!(
                matches!(err, Error::InvalidBatchCount(ref v) if v == count),
                "{count}: {err}"
            );
        }
    }

    #[test]
    fn test_truncated_length_prefix() {
        let err = decode_batch(TOPIC, MessageId::new(1, 1), &[0, 0], &HashMap::new(), "1")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedBatch {
                needed: 4,
                remaining: 2
            }
        ));
    }

    #[test]
    fn test_metadata_length_exceeds_body() {
        let mut body = BytesMut::new();
        body.put_u32(100);
        body.put_slice(&[0x18, 0x01]);

        let err =
            decode_batch(TOPIC, MessageId::new(1, 1), &body, &HashMap::new(), "1").unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedBatch {
                needed: 100,
                remaining: 2
            }
        ));
    }

    #[test]
    fn test_payload_shorter_than_declared() {
        let mut body = BytesMut::new();
        record(&mut body, &SingleMessageMetadata::new(10), b"short");

        let err =
            decode_batch(TOPIC, MessageId::new(1, 1), &body, &HashMap::new(), "1").unwrap_err();
        assert!(matches!(err, Error::TruncatedBatch { needed: 10, .. }));
    }

    #[test]
    fn test_fewer_records_than_count_discards_partial_result() {
        let mut body = BytesMut::new();
        record(&mut body, &SingleMessageMetadata::new(1), b"a");

        let err =
            decode_batch(TOPIC, MessageId::new(1, 1), &body, &HashMap::new(), "2").unwrap_err();
        assert!(matches!(err, Error::TruncatedBatch { .. }));
    }

    #[test]
    fn test_bad_metadata() {
        let mut body = BytesMut::new();
        body.put_u32(2);
        body.put_slice(&[0x12, 0x05]); // partition_key declaring 5 bytes, none follow

        let err =
            decode_batch(TOPIC, MessageId::new(1, 1), &body, &HashMap::new(), "1").unwrap_err();
        assert!(matches!(err, Error::MetadataDecode(_)), "{err}");
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut body = BytesMut::new();
        record(&mut body, &SingleMessageMetadata::new(1), b"a");
        body.put_slice(b"junk");

        let messages = decode_batch(TOPIC, MessageId::new(1, 1), &body, &HashMap::new(), "1").unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].payload, b"a");
    }
}
