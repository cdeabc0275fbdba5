//! Per-message metadata inside a batched entry.
//!
//! Every message packed in a batch is preceded by a protobuf-encoded
//! `SingleMessageMetadata` record. The record is decoded directly off the
//! wire with `CodedInputStream` rather than through generated code, since
//! only a handful of fields matter here.
//!
//! Wire layout (proto2):
//!
//! ```text
//! message KeyValue { required string key = 1; required string value = 2; }
//!
//! message SingleMessageMetadata {
//!     repeated KeyValue properties           = 1;
//!     optional string   partition_key        = 2;
//!     required int32    payload_size         = 3;
//!     optional bool     compacted_out        = 4;
//!     optional uint64   event_time           = 5;
//!     optional bool     partition_key_b64_encoded = 6;
//!     optional bytes    ordering_key         = 7;
//!     optional uint64   sequence_id          = 8;
//!     optional bool     null_value           = 9;
//!     optional bool     null_partition_key   = 10;
//! }
//! ```

use crate::error::{PulsarTypesError, Result};
use protobuf::{CodedInputStream, CodedOutputStream};

const WIRE_VARINT: u32 = 0;
const WIRE_FIXED64: u32 = 1;
const WIRE_LENGTH_DELIMITED: u32 = 2;
const WIRE_FIXED32: u32 = 5;

/// Decoded `SingleMessageMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleMessageMetadata {
    /// Message properties in wire order
    pub properties: Vec<(String, String)>,
    pub partition_key: Option<String>,
    /// Size of the payload that follows the metadata record
    pub payload_size: u32,
    pub compacted_out: Option<bool>,
    pub event_time: Option<u64>,
    pub partition_key_b64_encoded: Option<bool>,
    pub ordering_key: Option<Vec<u8>>,
    pub sequence_id: Option<u64>,
    pub null_value: Option<bool>,
    pub null_partition_key: Option<bool>,
}

fn decode_err(e: impl std::fmt::Display) -> PulsarTypesError {
    PulsarTypesError::MetadataDecode(e.to_string())
}

fn encode_err(e: protobuf::Error) -> PulsarTypesError {
    PulsarTypesError::MetadataEncode(e.to_string())
}

impl SingleMessageMetadata {
    pub fn new(payload_size: u32) -> Self {
        Self {
            payload_size,
            ..Default::default()
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Decode a metadata record from its serialized bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut stream = CodedInputStream::from_bytes(data);
        let mut metadata = SingleMessageMetadata::default();
        let mut payload_size: Option<i32> = None;

        loop {
            if stream.eof().map_err(decode_err)? {
                break;
            }

            let tag = stream.read_raw_varint32().map_err(decode_err)?;
            if tag == 0 {
                return Err(decode_err("invalid field tag 0"));
            }
            let field_number = tag >> 3;
            let wire_type = tag & 0x7;

            match (field_number, wire_type) {
                (1, WIRE_LENGTH_DELIMITED) => {
                    let property = decode_key_value(&mut stream)?;
                    metadata.properties.push(property);
                }
                (2, WIRE_LENGTH_DELIMITED) => {
                    metadata.partition_key = Some(stream.read_string().map_err(decode_err)?);
                }
                (3, WIRE_VARINT) => {
                    payload_size = Some(stream.read_int32().map_err(decode_err)?);
                }
                (4, WIRE_VARINT) => {
                    metadata.compacted_out = Some(stream.read_bool().map_err(decode_err)?);
                }
                (5, WIRE_VARINT) => {
                    metadata.event_time = Some(stream.read_uint64().map_err(decode_err)?);
                }
                (6, WIRE_VARINT) => {
                    metadata.partition_key_b64_encoded =
                        Some(stream.read_bool().map_err(decode_err)?);
                }
                (7, WIRE_LENGTH_DELIMITED) => {
                    metadata.ordering_key = Some(stream.read_bytes().map_err(decode_err)?);
                }
                (8, WIRE_VARINT) => {
                    metadata.sequence_id = Some(stream.read_uint64().map_err(decode_err)?);
                }
                (9, WIRE_VARINT) => {
                    metadata.null_value = Some(stream.read_bool().map_err(decode_err)?);
                }
                (10, WIRE_VARINT) => {
                    metadata.null_partition_key = Some(stream.read_bool().map_err(decode_err)?);
                }
                (1..=10, _) => {
                    return Err(decode_err(format!(
                        "field {field_number} has unexpected wire type {wire_type}"
                    )));
                }
                _ => skip_field(&mut stream, wire_type)?,
            }
        }

        let payload_size =
            payload_size.ok_or_else(|| decode_err("required field payload_size is missing"))?;
        metadata.payload_size = u32::try_from(payload_size)
            .map_err(|_| decode_err(format!("negative payload_size {payload_size}")))?;

        Ok(metadata)
    }

    /// Serialize the metadata record.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut stream = CodedOutputStream::vec(&mut buffer);

            for (key, value) in &self.properties {
                // KeyValue is a nested message: encode it separately, then
                // write it as a length-delimited field
                let mut kv_bytes = Vec::new();
                {
                    let mut kv_stream = CodedOutputStream::vec(&mut kv_bytes);
                    kv_stream.write_string(1, key).map_err(encode_err)?;
                    kv_stream.write_string(2, value).map_err(encode_err)?;
                    kv_stream.flush().map_err(encode_err)?;
                }
                stream.write_bytes(1, &kv_bytes).map_err(encode_err)?;
            }
            if let Some(partition_key) = &self.partition_key {
                stream.write_string(2, partition_key).map_err(encode_err)?;
            }
            let payload_size = i32::try_from(self.payload_size).map_err(|_| {
                PulsarTypesError::MetadataEncode(format!(
                    "payload_size {} does not fit in int32",
                    self.payload_size
                ))
            })?;
            stream.write_int32(3, payload_size).map_err(encode_err)?;
            if let Some(v) = self.compacted_out {
                stream.write_bool(4, v).map_err(encode_err)?;
            }
            if let Some(v) = self.event_time {
                stream.write_uint64(5, v).map_err(encode_err)?;
            }
            if let Some(v) = self.partition_key_b64_encoded {
                stream.write_bool(6, v).map_err(encode_err)?;
            }
            if let Some(v) = &self.ordering_key {
                stream.write_bytes(7, v).map_err(encode_err)?;
            }
            if let Some(v) = self.sequence_id {
                stream.write_uint64(8, v).map_err(encode_err)?;
            }
            if let Some(v) = self.null_value {
                stream.write_bool(9, v).map_err(encode_err)?;
            }
            if let Some(v) = self.null_partition_key {
                stream.write_bool(10, v).map_err(encode_err)?;
            }

            stream.flush().map_err(encode_err)?;
        }

        Ok(buffer)
    }
}

fn decode_key_value(stream: &mut CodedInputStream) -> Result<(String, String)> {
    let len = stream.read_uint32().map_err(decode_err)?;
    let old_limit = stream.push_limit(len as u64).map_err(decode_err)?;

    let mut key = None;
    let mut value = None;
    loop {
        if stream.eof().map_err(decode_err)? {
            break;
        }
        let tag = stream.read_raw_varint32().map_err(decode_err)?;
        match (tag >> 3, tag & 0x7) {
            (1, WIRE_LENGTH_DELIMITED) => key = Some(stream.read_string().map_err(decode_err)?),
            (2, WIRE_LENGTH_DELIMITED) => value = Some(stream.read_string().map_err(decode_err)?),
            (0, _) => return Err(decode_err("invalid field tag 0 in KeyValue")),
            (_, wire_type) => skip_field(stream, wire_type)?,
        }
    }

    stream.pop_limit(old_limit);

    match (key, value) {
        (Some(key), Some(value)) => Ok((key, value)),
        (None, _) => Err(decode_err("KeyValue is missing required field key")),
        (_, None) => Err(decode_err("KeyValue is missing required field value")),
    }
}

fn skip_field(stream: &mut CodedInputStream, wire_type: u32) -> Result<()> {
    match wire_type {
        WIRE_VARINT => {
            stream.read_raw_varint64().map_err(decode_err)?;
        }
        WIRE_FIXED64 => {
            stream.read_raw_little_endian64().map_err(decode_err)?;
        }
        WIRE_LENGTH_DELIMITED => {
            stream.read_bytes().map_err(decode_err)?;
        }
        WIRE_FIXED32 => {
            stream.read_raw_little_endian32().map_err(decode_err)?;
        }
        other => return Err(decode_err(format!("unsupported wire type {other}"))),
    }
    Ok(())
}
