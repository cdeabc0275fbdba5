//! Value types for the pulsar-admin client.
//!
//! This crate holds everything that is data rather than transport: message
//! identities, decoded messages, topic names, the protobuf codec for the
//! per-message metadata of batched entries, and the JSON bodies of the admin
//! resources.
//!
//! # Modules
//!
//! - [`message_id`] - `ledger:entry:partition:batch` identities
//! - [`message`] - messages reconstructed from peek / get-message responses
//! - [`metadata`] - `SingleMessageMetadata` decode / encode
//! - [`topic`] - topic name parsing and REST path segments
//! - [`error`] - error types for parsing and decoding

pub mod auth_mode;
pub mod broker_stats;
pub mod error;
pub mod message;
pub mod message_id;
pub mod metadata;
pub mod resource_quota;
pub mod sink;
pub mod source;
pub mod tenant;
pub mod topic;

// Re-export main types for convenient access
pub use auth_mode::SubscriptionAuthMode;
pub use broker_stats::{AllocatorStats, LocalBrokerData, Metrics, ResourceUsage};
pub use error::{PulsarTypesError, Result};
pub use message::{Message, PUBLISH_TIME_PROPERTY};
pub use message_id::{MessageId, NO_INDEX};
pub use metadata::SingleMessageMetadata;
pub use resource_quota::{BundlesData, ResourceQuota};
pub use sink::{
    ConnectorDefinition, ExceptionInformation, Resources, SinkConfig, SinkInstanceStatus,
    SinkInstanceStatusData, SinkStatus, UpdateOptions, BUILTIN_ARCHIVE_PREFIX,
};
pub use source::{SourceConfig, SourceInstanceStatus, SourceInstanceStatusData, SourceStatus};
pub use tenant::TenantData;
pub use topic::{TopicDomain, TopicName};
