//! REST transport.
//!
//! [`RestTransport`] is the seam between the admin resources and HTTP. The
//! production implementation is [`HttpTransport`] on top of reqwest; tests
//! plug in an in-memory transport.
//!
//! Every implementation reads the response body to completion inside the
//! call, so no response is left open once a call returns, whichever way it
//! returns.

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use bytes::Bytes;
use pulsar_admin_types::BUILTIN_ARCHIVE_PREFIX;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A `multipart/form-data` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    pub parts: Vec<MultipartPart>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a JSON part.
    pub fn json<T: Serialize + ?Sized>(mut self, name: &str, value: &T) -> Result<Self> {
        self.parts.push(MultipartPart {
            name: name.to_string(),
            file_name: None,
            content_type: "application/json".to_string(),
            data: serde_json::to_vec(value)?,
        });
        Ok(self)
    }

    /// Add a plain-text part.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(MultipartPart {
            name: name.to_string(),
            file_name: None,
            content_type: "text/plain".to_string(),
            data: value.as_bytes().to_vec(),
        });
        self
    }

    /// Add a file part.
    pub fn file(mut self, name: &str, file_name: &str, data: Vec<u8>) -> Self {
        self.parts.push(MultipartPart {
            name: name.to_string(),
            file_name: Some(file_name.to_string()),
            content_type: "application/octet-stream".to_string(),
            data,
        });
        self
    }

    pub fn part(&self, name: &str) -> Option<&MultipartPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Add the connector archive at `archive` as the `data` file part.
    /// `builtin://` archives are already on the worker and add nothing.
    pub(crate) async fn archive(self, archive: Option<&Path>) -> Result<Self> {
        let Some(path) = archive else {
            return Ok(self);
        };
        if path.to_string_lossy().starts_with(BUILTIN_ARCHIVE_PREFIX) {
            return Ok(self);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::InvalidConfig(format!("archive path has no file name: {}", path.display()))
            })?;
        let data = tokio::fs::read(path).await?;
        tracing::debug!("Uploading {} ({} bytes)", path.display(), data.len());

        Ok(self.file("data", &file_name, data))
    }
}

/// Object-safe HTTP primitives used by every admin resource.
///
/// Implementations return `Error::Http` for non-2xx responses.
#[async_trait::async_trait]
pub trait RestTransport: Send + Sync {
    /// Send a request with an optional JSON body and return the response body.
    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<serde_json::Value>,
    ) -> Result<Bytes>;

    /// Send a `multipart/form-data` request.
    async fn send_multipart(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: MultipartBody,
    ) -> Result<()>;

    /// Send a bodiless request and return status, headers and body.
    async fn request_raw(&self, method: Method, endpoint: &Endpoint) -> Result<RawResponse>;
}

/// Typed JSON helpers over a shared [`RestTransport`].
#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn RestTransport>,
}

impl RestClient {
    pub fn new(transport: Arc<dyn RestTransport>) -> Self {
        Self { transport }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let body = self.transport.send(Method::GET, endpoint, None).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET returning the raw body.
    pub async fn get_bytes(&self, endpoint: &Endpoint) -> Result<Bytes> {
        self.transport.send(Method::GET, endpoint, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &Endpoint, body: &B) -> Result<()> {
        let body = serde_json::to_value(body)?;
        self.transport
            .send(Method::POST, endpoint, Some(body))
            .await?;
        Ok(())
    }

    /// POST without a body.
    pub async fn post_empty(&self, endpoint: &Endpoint) -> Result<()> {
        self.transport.send(Method::POST, endpoint, None).await?;
        Ok(())
    }

    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &Endpoint, body: &B) -> Result<()> {
        let body = serde_json::to_value(body)?;
        self.transport.send(Method::PUT, endpoint, Some(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, endpoint: &Endpoint) -> Result<()> {
        self.transport.send(Method::DELETE, endpoint, None).await?;
        Ok(())
    }

    pub async fn post_multipart(&self, endpoint: &Endpoint, body: MultipartBody) -> Result<()> {
        self.transport
            .send_multipart(Method::POST, endpoint, body)
            .await
    }

    pub async fn put_multipart(&self, endpoint: &Endpoint, body: MultipartBody) -> Result<()> {
        self.transport
            .send_multipart(Method::PUT, endpoint, body)
            .await
    }

    pub async fn get_raw(&self, endpoint: &Endpoint) -> Result<RawResponse> {
        self.transport.request_raw(Method::GET, endpoint).await
    }
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.web_service_url).map_err(|e| {
            Error::InvalidConfig(format!(
                "invalid web service URL '{}': {e}",
                config.web_service_url
            ))
        })?;

        let mut builder = reqwest::Client::builder().timeout(config.request_timeout);

        if let Some(path) = &config.tls.trust_certs_file_path {
            let pem = std::fs::read(path)?;
            let certs = reqwest::Certificate::from_pem_bundle(&pem)?;
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }
        if config.tls.allow_insecure_connection {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        } else if !config.tls.enable_hostname_verification {
            tracing::warn!(
                "Hostname verification can only be disabled together with allow_insecure_connection; keeping it enabled"
            );
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            auth_token: config.auth_token.clone(),
        })
    }

    fn request(&self, method: Method, endpoint: &Endpoint) -> Result<reqwest::RequestBuilder> {
        let url = endpoint.to_url(&self.base_url)?;
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<RawResponse> {
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::TransportRead(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Http {
                status,
                reason: error_reason(status, &body),
            });
        }

        tracing::debug!("Received {} bytes ({})", body.len(), status);

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait::async_trait]
impl RestTransport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<serde_json::Value>,
    ) -> Result<Bytes> {
        let mut builder = self.request(method, endpoint)?;
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        Ok(self.execute(builder).await?.body)
    }

    async fn send_multipart(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: MultipartBody,
    ) -> Result<()> {
        let mut form = reqwest::multipart::Form::new();
        for part in body.parts {
            let mut form_part =
                reqwest::multipart::Part::bytes(part.data).mime_str(&part.content_type)?;
            if let Some(file_name) = part.file_name {
                form_part = form_part.file_name(file_name);
            }
            form = form.part(part.name, form_part);
        }

        let builder = self.request(method, endpoint)?.multipart(form);
        self.execute(builder).await?;
        Ok(())
    }

    async fn request_raw(&self, method: Method, endpoint: &Endpoint) -> Result<RawResponse> {
        let builder = self.request(method, endpoint)?;
        self.execute(builder).await
    }
}

/// Error text for a failed call: the broker's JSON `reason` when present,
/// otherwise the body text, otherwise the canonical status reason.
pub fn error_reason(status: StatusCode, body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        reason: String,
    }

    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return parsed.reason;
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() {
        return text;
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
