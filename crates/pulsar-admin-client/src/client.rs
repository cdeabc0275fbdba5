use crate::config::{ApiProfile, ClientConfig};
use crate::error::Result;
use crate::transport::{HttpTransport, RestClient, RestTransport};
use crate::{BrokerStats, ResourceQuotas, Sinks, Sources, Subscriptions, Tenants};
use std::sync::Arc;

/// Entry point of the admin client.
///
/// All resource handles share one transport and therefore one connection
/// pool.
#[derive(Clone)]
pub struct PulsarAdmin {
    rest: RestClient,
    profile: ApiProfile,
}

impl PulsarAdmin {
    /// Build a client talking HTTP to `config.web_service_url`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        tracing::info!("Pulsar admin client for {}", config.web_service_url);
        Ok(Self::with_transport(Arc::new(transport), config.api_profile))
    }

    pub fn with_transport(transport: Arc<dyn RestTransport>, profile: ApiProfile) -> Self {
        Self {
            rest: RestClient::new(transport),
            profile,
        }
    }

    pub fn subscriptions(&self) -> Subscriptions {
        Subscriptions::new(self.rest.clone(), self.profile.topics)
    }

    pub fn tenants(&self) -> Tenants {
        Tenants::new(self.rest.clone(), self.profile.tenants)
    }

    pub fn resource_quotas(&self) -> ResourceQuotas {
        ResourceQuotas::new(self.rest.clone(), self.profile.resource_quotas)
    }

    pub fn broker_stats(&self) -> BrokerStats {
        BrokerStats::new(self.rest.clone(), self.profile.broker_stats)
    }

    pub fn sinks(&self) -> Sinks {
        Sinks::new(self.rest.clone(), self.profile.sinks)
    }

    pub fn sources(&self) -> Sources {
        Sources::new(self.rest.clone(), self.profile.sources)
    }
}
