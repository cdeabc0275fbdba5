//! In-memory transport for unit tests.

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::transport::{MultipartBody, RawResponse, RestTransport};
use bytes::{BufMut, Bytes, BytesMut};
use pulsar_admin_types::SingleMessageMetadata;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<serde_json::Value>,
    pub multipart: Option<MultipartBody>,
}

#[derive(Debug, Clone)]
enum Canned {
    Raw { headers: HeaderMap, body: Bytes },
    Json(serde_json::Value),
}

/// A batched entry body together with its record count.
pub struct BatchBody {
    pub count: usize,
    pub bytes: Vec<u8>,
}

/// Build a batch of `count` records with payloads `msg-<i>` and a property
/// `index=<i>` on each record.
pub fn batch_body(count: usize) -> BatchBody {
    let mut body = BytesMut::new();
    for i in 0..count {
        let payload = format!("msg-{i}");
        let metadata = SingleMessageMetadata::new(payload.len() as u32)
            .with_property("index", i.to_string())
            .encode()
            .expect("metadata encodes");
        body.put_u32(metadata.len() as u32);
        body.put_slice(&metadata);
        body.put_slice(payload.as_bytes());
    }
    BatchBody {
        count,
        bytes: body.to_vec(),
    }
}

/// Transport answering from canned responses keyed by endpoint path.
///
/// Unregistered GETs answer 404; other unregistered methods succeed with an
/// empty body.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, Canned>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn respond_json(&self, endpoint: &str, value: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Canned::Json(value));
    }

    pub fn respond_headers(&self, endpoint: &str, headers: &[(&str, &str)], body: &[u8]) {
        let mut map = HeaderMap::new();
        for (k, v) in headers {
            map.append(
                HeaderName::from_bytes(k.as_bytes()).unwrap(),
                HeaderValue::from_str(v).unwrap(),
            );
        }
        self.responses.lock().unwrap().insert(
            endpoint.to_string(),
            Canned::Raw {
                headers: map,
                body: Bytes::copy_from_slice(body),
            },
        );
    }

    pub fn respond_message(&self, endpoint: &str, id: &str, payload: &[u8]) {
        self.respond_headers(endpoint, &[("X-Pulsar-Message-ID", id)], payload);
    }

    pub fn respond_batch(&self, endpoint: &str, id: &str, batch: &BatchBody) {
        let count = batch.count.to_string();
        self.respond_headers(
            endpoint,
            &[
                ("X-Pulsar-Message-ID", id),
                ("X-Pulsar-Num-Batch-Message", &count),
            ],
            &batch.bytes,
        );
    }

    fn record(
        &self,
        method: &Method,
        endpoint: &Endpoint,
        body: Option<serde_json::Value>,
        multipart: Option<MultipartBody>,
    ) -> Option<Canned> {
        let key = endpoint.to_string();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            endpoint: key.clone(),
            body,
            multipart,
        });
        self.responses.lock().unwrap().get(&key).cloned()
    }
}

fn not_found(endpoint: &Endpoint) -> Error {
    Error::Http {
        status: StatusCode::NOT_FOUND,
        reason: format!("no canned response for {endpoint}"),
    }
}

#[async_trait::async_trait]
impl RestTransport for MockTransport {
    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<serde_json::Value>,
    ) -> Result<Bytes> {
        match self.record(&method, endpoint, body, None) {
            Some(Canned::Json(value)) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
            Some(Canned::Raw { body, .. }) => Ok(body),
            None if method == Method::GET => Err(not_found(endpoint)),
            None => Ok(Bytes::new()),
        }
    }

    async fn send_multipart(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: MultipartBody,
    ) -> Result<()> {
        self.record(&method, endpoint, None, Some(body));
        Ok(())
    }

    async fn request_raw(&self, method: Method, endpoint: &Endpoint) -> Result<RawResponse> {
        match self.record(&method, endpoint, None, None) {
            Some(Canned::Raw { headers, body }) => Ok(RawResponse {
                status: StatusCode::OK,
                headers,
                body,
            }),
            Some(Canned::Json(value)) => Ok(RawResponse {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: Bytes::from(serde_json::to_vec(&value)?),
            }),
            None => Err(not_found(endpoint)),
        }
    }
}
