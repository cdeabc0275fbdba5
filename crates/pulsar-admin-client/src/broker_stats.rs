use crate::config::ApiVersion;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::transport::RestClient;
use pulsar_admin_types::{AllocatorStats, LocalBrokerData, Metrics};

const BASE_PATH: &str = "/broker-stats";

/// Admin interface for broker statistics.
#[derive(Clone)]
pub struct BrokerStats {
    rest: RestClient,
    version: ApiVersion,
}

impl BrokerStats {
    pub fn new(rest: RestClient, version: ApiVersion) -> Self {
        Self { rest, version }
    }

    fn endpoint(&self, stat: &str) -> Endpoint {
        Endpoint::new(self.version, BASE_PATH).segment(stat)
    }

    /// Monitoring metrics.
    pub async fn metrics(&self) -> Result<Vec<Metrics>> {
        self.rest.get(&self.endpoint("metrics")).await
    }

    /// JVM MBean dump.
    pub async fn mbeans(&self) -> Result<Vec<Metrics>> {
        self.rest.get(&self.endpoint("mbeans")).await
    }

    /// Per-topic stats, returned as the raw JSON document.
    pub async fn topics(&self) -> Result<String> {
        let body = self.rest.get_bytes(&self.endpoint("topics")).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    pub async fn load_report(&self) -> Result<LocalBrokerData> {
        self.rest.get(&self.endpoint("load-report")).await
    }

    pub async fn allocator_stats(&self, allocator: &str) -> Result<AllocatorStats> {
        self.rest
            .get(&self.endpoint("allocator-stats").segment(allocator))
            .await
    }
}
