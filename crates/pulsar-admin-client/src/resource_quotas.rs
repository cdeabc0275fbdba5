use crate::config::ApiVersion;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::transport::RestClient;
use pulsar_admin_types::ResourceQuota;

const BASE_PATH: &str = "/resource-quotas";

/// Admin interface for namespace bundle resource quotas.
#[derive(Clone)]
pub struct ResourceQuotas {
    rest: RestClient,
    version: ApiVersion,
}

impl ResourceQuotas {
    pub fn new(rest: RestClient, version: ApiVersion) -> Self {
        Self { rest, version }
    }

    /// `namespace` is `tenant/namespace`.
    fn bundle_endpoint(&self, namespace: &str, bundle: &str) -> Endpoint {
        Endpoint::new(self.version, BASE_PATH)
            .segments(namespace.split('/'))
            .segment(bundle)
    }

    /// Quota applied to new bundles.
    pub async fn get_default(&self) -> Result<ResourceQuota> {
        self.rest.get(&Endpoint::new(self.version, BASE_PATH)).await
    }

    pub async fn set_default(&self, quota: &ResourceQuota) -> Result<()> {
        self.rest
            .post(&Endpoint::new(self.version, BASE_PATH), quota)
            .await
    }

    pub async fn get_namespace_bundle(
        &self,
        namespace: &str,
        bundle: &str,
    ) -> Result<ResourceQuota> {
        self.rest.get(&self.bundle_endpoint(namespace, bundle)).await
    }

    pub async fn set_namespace_bundle(
        &self,
        namespace: &str,
        bundle: &str,
        quota: &ResourceQuota,
    ) -> Result<()> {
        self.rest
            .post(&self.bundle_endpoint(namespace, bundle), quota)
            .await
    }

    /// Drop the bundle's own quota so the default applies again.
    pub async fn reset_namespace_bundle(&self, namespace: &str, bundle: &str) -> Result<()> {
        self.rest
            .delete(&self.bundle_endpoint(namespace, bundle))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use reqwest::Method;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_bundle_quota_round_trip_through_endpoints() {
        let transport = Arc::new(MockTransport::new());
        let endpoint = "/admin/v2/resource-quotas/public/default/0x00000000_0xffffffff";
        transport.respond_json(
            endpoint,
            serde_json::to_value(ResourceQuota::default()).unwrap(),
        );
        let quotas = ResourceQuotas::new(RestClient::new(transport.clone()), ApiVersion::V2);

        let quota = quotas
            .get_namespace_bundle("public/default", "0x00000000_0xffffffff")
            .await
            .unwrap();
        assert_eq!(quota, ResourceQuota::default());

        quotas
            .set_namespace_bundle("public/default", "0x00000000_0xffffffff", &quota)
            .await
            .unwrap();
        quotas
            .reset_namespace_bundle("public/default", "0x00000000_0xffffffff")
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.endpoint == endpoint));
        assert_eq!(requests[1].method, Method::POST);
        assert_eq!(requests[2].method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_default_quota() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json(
            "/admin/v2/resource-quotas",
            serde_json::json!({
                "msgRateIn": 10.0, "msgRateOut": 20.0, "bandwidthIn": 1.0,
                "bandwidthOut": 2.0, "memory": 64.0, "dynamic": false
            }),
        );
        let quotas = ResourceQuotas::new(RestClient::new(transport.clone()), ApiVersion::V2);

        let quota = quotas.get_default().await.unwrap();
        assert_eq!(quota.memory, 64.0);
        assert!(!quota.dynamic);

        quotas.set_default(&quota).await.unwrap();
        assert_eq!(transport.requests()[1].method, Method::POST);
    }
}
