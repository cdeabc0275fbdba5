//! Source connector administration.
//!
//! Mirrors [`crate::sinks`]: create and update send the definition as a JSON
//! `sourceConfig` part next to either an uploaded `data` archive or a `url`.

use crate::config::ApiVersion;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::transport::{MultipartBody, RestClient};
use pulsar_admin_types::{
    ConnectorDefinition, SourceConfig, SourceInstanceStatusData, SourceStatus, UpdateOptions,
};
use std::path::Path;

const BASE_PATH: &str = "/sources";

/// Admin interface for sources.
#[derive(Clone)]
pub struct Sources {
    rest: RestClient,
    version: ApiVersion,
}

impl Sources {
    pub fn new(rest: RestClient, version: ApiVersion) -> Self {
        Self { rest, version }
    }

    fn source_endpoint(&self, tenant: &str, namespace: &str, source: &str) -> Endpoint {
        Endpoint::new(self.version, BASE_PATH).segments([tenant, namespace, source])
    }

    fn config_endpoint(&self, config: &SourceConfig) -> Endpoint {
        self.source_endpoint(&config.tenant, &config.namespace, &config.name)
    }

    pub async fn list(&self, tenant: &str, namespace: &str) -> Result<Vec<String>> {
        let endpoint = Endpoint::new(self.version, BASE_PATH).segments([tenant, namespace]);
        self.rest.get(&endpoint).await
    }

    pub async fn get(&self, tenant: &str, namespace: &str, source: &str) -> Result<SourceConfig> {
        self.rest
            .get(&self.source_endpoint(tenant, namespace, source))
            .await
    }

    pub async fn create(&self, config: &SourceConfig, archive: Option<&Path>) -> Result<()> {
        let body = MultipartBody::new().json("sourceConfig", config)?;
        let body = body.archive(archive).await?;
        self.rest
            .post_multipart(&self.config_endpoint(config), body)
            .await
    }

    pub async fn create_with_url(&self, config: &SourceConfig, package_url: &str) -> Result<()> {
        let body = MultipartBody::new()
            .text("url", package_url)
            .json("sourceConfig", config)?;
        self.rest
            .post_multipart(&self.config_endpoint(config), body)
            .await
    }

    pub async fn update(
        &self,
        config: &SourceConfig,
        archive: Option<&Path>,
        options: Option<&UpdateOptions>,
    ) -> Result<()> {
        let mut body = MultipartBody::new().json("sourceConfig", config)?;
        if let Some(options) = options {
            body = body.json("updateOptions", options)?;
        }
        let body = body.archive(archive).await?;
        self.rest
            .put_multipart(&self.config_endpoint(config), body)
            .await
    }

    pub async fn update_with_url(
        &self,
        config: &SourceConfig,
        package_url: &str,
        options: Option<&UpdateOptions>,
    ) -> Result<()> {
        let mut body = MultipartBody::new()
            .text("url", package_url)
            .json("sourceConfig", config)?;
        if let Some(options) = options {
            body = body.json("updateOptions", options)?;
        }
        self.rest
            .put_multipart(&self.config_endpoint(config), body)
            .await
    }

    pub async fn delete(&self, tenant: &str, namespace: &str, source: &str) -> Result<()> {
        self.rest
            .delete(&self.source_endpoint(tenant, namespace, source))
            .await
    }

    pub async fn status(
        &self,
        tenant: &str,
        namespace: &str,
        source: &str,
    ) -> Result<SourceStatus> {
        let endpoint = self
            .source_endpoint(tenant, namespace, source)
            .segment("status");
        self.rest.get(&endpoint).await
    }

    pub async fn status_with_id(
        &self,
        tenant: &str,
        namespace: &str,
        source: &str,
        instance_id: i32,
    ) -> Result<SourceInstanceStatusData> {
        let endpoint = self
            .source_endpoint(tenant, namespace, source)
            .segment(instance_id)
            .segment("status");
        self.rest.get(&endpoint).await
    }

    async fn instance_action(
        &self,
        tenant: &str,
        namespace: &str,
        source: &str,
        instance_id: Option<i32>,
        action: &str,
    ) -> Result<()> {
        let mut endpoint = self.source_endpoint(tenant, namespace, source);
        if let Some(id) = instance_id {
            endpoint = endpoint.segment(id);
        }
        self.rest.post_empty(&endpoint.segment(action)).await
    }

    pub async fn restart(&self, tenant: &str, namespace: &str, source: &str) -> Result<()> {
        self.instance_action(tenant, namespace, source, None, "restart")
            .await
    }

    pub async fn restart_with_id(
        &self,
        tenant: &str,
        namespace: &str,
        source: &str,
        instance_id: i32,
    ) -> Result<()> {
        self.instance_action(tenant, namespace, source, Some(instance_id), "restart")
            .await
    }

    pub async fn stop(&self, tenant: &str, namespace: &str, source: &str) -> Result<()> {
        self.instance_action(tenant, namespace, source, None, "stop")
            .await
    }

    pub async fn stop_with_id(
        &self,
        tenant: &str,
        namespace: &str,
        source: &str,
        instance_id: i32,
    ) -> Result<()> {
        self.instance_action(tenant, namespace, source, Some(instance_id), "stop")
            .await
    }

    pub async fn start(&self, tenant: &str, namespace: &str, source: &str) -> Result<()> {
        self.instance_action(tenant, namespace, source, None, "start")
            .await
    }

    pub async fn start_with_id(
        &self,
        tenant: &str,
        namespace: &str,
        source: &str,
        instance_id: i32,
    ) -> Result<()> {
        self.instance_action(tenant, namespace, source, Some(instance_id), "start")
            .await
    }

    pub async fn builtin_sources(&self) -> Result<Vec<ConnectorDefinition>> {
        let endpoint = Endpoint::new(self.version, BASE_PATH).segment("builtinsources");
        self.rest.get(&endpoint).await
    }

    pub async fn reload_builtin_sources(&self) -> Result<()> {
        let endpoint = Endpoint::new(self.version, BASE_PATH).segment("reloadBuiltInSources");
        self.rest.post_empty(&endpoint).await
    }
}
