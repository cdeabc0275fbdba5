//! Error types for pulsar-admin-types crate.

use thiserror::Error;

/// Errors that can occur while parsing or decoding admin value types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PulsarTypesError {
    #[error("Malformed message id '{input}': {reason}")]
    MalformedIdentity { input: String, reason: String },

    #[error("Message metadata decode error: {0}")]
    MetadataDecode(String),

    #[error("Message metadata encode error: {0}")]
    MetadataEncode(String),

    #[error("Invalid topic name '{input}': {reason}")]
    InvalidTopicName { input: String, reason: String },

    #[error("Invalid subscription auth mode: {0}")]
    InvalidSubscriptionAuthMode(String),
}

/// Result type alias for pulsar-admin-types operations.
pub type Result<T> = std::result::Result<T, PulsarTypesError>;
