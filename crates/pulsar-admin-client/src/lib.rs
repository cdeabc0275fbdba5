//! Pulsar admin REST client.
//!
//! [`PulsarAdmin`] hands out one handle per admin resource. All of them go
//! through a [`RestTransport`], so tests can swap HTTP for an in-memory
//! implementation.
//!
//! The interesting part is [`subscriptions`]: peek and get-message answers
//! carry the message identity and properties in response headers and, for
//! batched entries, a binary body packing several messages that
//! [`subscriptions::batch`] splits back apart.
//!
//! # Modules
//!
//! - [`client`] - the [`PulsarAdmin`] entry point
//! - [`config`] - connection, TLS and API version settings
//! - [`endpoint`] - REST path building
//! - [`transport`] - the transport trait and its reqwest implementation
//! - [`subscriptions`] - subscription admin, peek and get-message decoding
//! - [`tenants`], [`resource_quotas`], [`broker_stats`], [`sinks`],
//!   [`sources`] - the remaining admin resources

pub mod broker_stats;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod resource_quotas;
pub mod sinks;
pub mod sources;
pub mod subscriptions;
pub mod tenants;
pub mod transport;

#[cfg(test)]
mod testing;

pub use broker_stats::BrokerStats;
pub use client::PulsarAdmin;
pub use config::{ApiProfile, ApiVersion, ClientConfig, TlsConfig};
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use resource_quotas::ResourceQuotas;
pub use sinks::Sinks;
pub use sources::Sources;
pub use subscriptions::Subscriptions;
pub use tenants::Tenants;
pub use transport::{HttpTransport, MultipartBody, RawResponse, RestClient, RestTransport};

pub use pulsar_admin_types as types;
