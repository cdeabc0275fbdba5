use crate::config::ApiVersion;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::transport::RestClient;
use pulsar_admin_types::TenantData;

const BASE_PATH: &str = "/tenants";

/// Admin interface for tenants.
#[derive(Clone)]
pub struct Tenants {
    rest: RestClient,
    version: ApiVersion,
}

impl Tenants {
    pub fn new(rest: RestClient, version: ApiVersion) -> Self {
        Self { rest, version }
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.version, BASE_PATH)
    }

    pub async fn create(&self, data: &TenantData) -> Result<()> {
        self.rest
            .put(&self.endpoint().segment(&data.name), data)
            .await
    }

    /// Replace the admin roles and allowed clusters of a tenant.
    pub async fn update(&self, data: &TenantData) -> Result<()> {
        self.rest
            .post(&self.endpoint().segment(&data.name), data)
            .await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.rest.delete(&self.endpoint().segment(name)).await
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        self.rest.get(&self.endpoint()).await
    }

    pub async fn get(&self, name: &str) -> Result<TenantData> {
        let mut data: TenantData = self.rest.get(&self.endpoint().segment(name)).await?;
        data.name = name.to_string();
        Ok(data)
    }
}
