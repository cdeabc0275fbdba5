use pulsar_admin_types::PulsarTypesError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {reason}")]
    Http { status: StatusCode, reason: String },

    #[error("Failed to read response: {0}")]
    TransportRead(String),

    #[error("Response has no usable X-Pulsar-Message-ID header")]
    MissingIdentity,

    #[error("Malformed message id '{input}': {reason}")]
    MalformedIdentity { input: String, reason: String },

    #[error("Invalid batch message count '{0}'")]
    InvalidBatchCount(String),

    #[error("Truncated batch: needed {needed} bytes, {remaining} remaining")]
    TruncatedBatch { needed: usize, remaining: usize },

    #[error("Message metadata decode error: {0}")]
    MetadataDecode(String),

    #[error("Invalid topic name '{input}': {reason}")]
    InvalidTopicName { input: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Types(PulsarTypesError),
}

impl From<PulsarTypesError> for Error {
    fn from(e: PulsarTypesError) -> Self {
        match e {
            PulsarTypesError::MalformedIdentity { input, reason } => {
                Error::MalformedIdentity { input, reason }
            }
            PulsarTypesError::MetadataDecode(msg) => Error::MetadataDecode(msg),
            PulsarTypesError::InvalidTopicName { input, reason } => {
                Error::InvalidTopicName { input, reason }
            }
            other => Error::Types(other),
        }
    }
}

impl Error {
    /// Status code of a failed admin call, if the broker answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Request(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
