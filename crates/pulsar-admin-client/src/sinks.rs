//! Sink connector administration.
//!
//! Create and update calls are `multipart/form-data`: the sink definition
//! travels as a JSON `sinkConfig` part, the connector archive either as a
//! `data` file part or as a `url` text part the worker downloads itself.

use crate::config::ApiVersion;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::transport::{MultipartBody, RestClient};
use pulsar_admin_types::{
    ConnectorDefinition, SinkConfig, SinkInstanceStatusData, SinkStatus, UpdateOptions,
};
use std::path::Path;

const BASE_PATH: &str = "/sinks";

/// Admin interface for sinks.
#[derive(Clone)]
pub struct Sinks {
    rest: RestClient,
    version: ApiVersion,
}

impl Sinks {
    pub fn new(rest: RestClient, version: ApiVersion) -> Self {
        Self { rest, version }
    }

    fn sink_endpoint(&self, tenant: &str, namespace: &str, sink: &str) -> Endpoint {
        Endpoint::new(self.version, BASE_PATH).segments([tenant, namespace, sink])
    }

    fn config_endpoint(&self, config: &SinkConfig) -> Endpoint {
        self.sink_endpoint(&config.tenant, &config.namespace, &config.name)
    }

    pub async fn list(&self, tenant: &str, namespace: &str) -> Result<Vec<String>> {
        let endpoint = Endpoint::new(self.version, BASE_PATH).segments([tenant, namespace]);
        self.rest.get(&endpoint).await
    }

    pub async fn get(&self, tenant: &str, namespace: &str, sink: &str) -> Result<SinkConfig> {
        self.rest
            .get(&self.sink_endpoint(tenant, namespace, sink))
            .await
    }

    /// Create a sink, uploading the archive at `archive` unless it is a
    /// `builtin://` connector.
    pub async fn create(&self, config: &SinkConfig, archive: Option<&Path>) -> Result<()> {
        let body = MultipartBody::new().json("sinkConfig", config)?;
        let body = body.archive(archive).await?;
        self.rest
            .post_multipart(&self.config_endpoint(config), body)
            .await
    }

    /// Create a sink whose archive the worker fetches from `package_url`
    /// (`http://` or `file://`).
    pub async fn create_with_url(&self, config: &SinkConfig, package_url: &str) -> Result<()> {
        let body = MultipartBody::new()
            .text("url", package_url)
            .json("sinkConfig", config)?;
        self.rest
            .post_multipart(&self.config_endpoint(config), body)
            .await
    }

    pub async fn update(
        &self,
        config: &SinkConfig,
        archive: Option<&Path>,
        options: Option<&UpdateOptions>,
    ) -> Result<()> {
        let mut body = MultipartBody::new().json("sinkConfig", config)?;
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
        config: &SinkConfig,
        package_url: &str,
        options: Option<&UpdateOptions>,
    ) -> Result<()> {
        let mut body = MultipartBody::new()
            .text("url", package_url)
            .json("sinkConfig", config)?;
        if let Some(options) = options {
            body = body.json("updateOptions", options)?;
        }
        self.rest
            .put_multipart(&self.config_endpoint(config), body)
            .await
    }

    pub async fn delete(&self, tenant: &str, namespace: &str, sink: &str) -> Result<()> {
        self.rest
            .delete(&self.sink_endpoint(tenant, namespace, sink))
            .await
    }

    pub async fn status(&self, tenant: &str, namespace: &str, sink: &str) -> Result<SinkStatus> {
        let endpoint = self.sink_endpoint(tenant, namespace, sink).segment("status");
        self.rest.get(&endpoint).await
    }

    pub async fn status_with_id(
        &self,
        tenant: &str,
        namespace: &str,
        sink: &str,
        instance_id: i32,
    ) -> Result<SinkInstanceStatusData> {
        let endpoint = self
            .sink_endpoint(tenant, namespace, sink)
            .segment(instance_id)
            .segment("status");
        self.rest.get(&endpoint).await
    }

    async fn instance_action(
        &self,
        tenant: &str,
        namespace: &str,
        sink: &str,
        instance_id: Option<i32>,
        action: &str,
    ) -> Result<()> {
        let mut endpoint = self.sink_endpoint(tenant, namespace, sink);
        if let Some(id) = instance_id {
            endpoint = endpoint.segment(id);
        }
        self.rest.post_empty(&endpoint.segment(action)).await
    }

    pub async fn restart(&self, tenant: &str, namespace: &str, sink: &str) -> Result<()> {
        self.instance_action(tenant, namespace, sink, None, "restart")
            .await
    }

    pub async fn restart_with_id(
        &self,
        tenant: &str,
        namespace: &str,
        sink: &str,
        instance_id: i32,
    ) -> Result<()> {
        self.instance_action(tenant, namespace, sink, Some(instance_id), "restart")
            .await
    }

    pub async fn stop(&self, tenant: &str, namespace: &str, sink: &str) -> Result<()> {
        self.instance_action(tenant, namespace, sink, None, "stop")
            .await
    }

    pub async fn stop_with_id(
        &self,
        tenant: &str,
        namespace: &str,
        sink: &str,
        instance_id: i32,
    ) -> Result<()> {
        self.instance_action(tenant, namespace, sink, Some(instance_id), "stop")
            .await
    }

    pub async fn start(&self, tenant: &str, namespace: &str, sink: &str) -> Result<()> {
        self.instance_action(tenant, namespace, sink, None, "start")
            .await
    }

    pub async fn start_with_id(
        &self,
        tenant: &str,
        namespace: &str,
        sink: &str,
        instance_id: i32,
    ) -> Result<()> {
        self.instance_action(tenant, namespace, sink, Some(instance_id), "start")
            .await
    }

    /// Connectors bundled with the cluster.
    pub async fn builtin_sinks(&self) -> Result<Vec<ConnectorDefinition>> {
        let endpoint = Endpoint::new(self.version, BASE_PATH).segment("builtinsinks");
        self.rest.get(&endpoint).await
    }

    pub async fn reload_builtin_sinks(&self) -> Result<()> {
        let endpoint = Endpoint::new(self.version, BASE_PATH).segment("reloadBuiltInSinks");
        self.rest.post_empty(&endpoint).await
    }
}
