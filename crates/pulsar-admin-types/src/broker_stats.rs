//! Broker statistics payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One metrics group with its dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub metrics: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub dimensions: HashMap<String, String>,
}

impl Metrics {
    pub fn new(dimensions: HashMap<String, String>) -> Self {
        Self {
            metrics: HashMap::new(),
            dimensions,
        }
    }
}

/// Resource usage figure reported by the load manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    #[serde(default)]
    pub usage: f64,
    #[serde(default)]
    pub limit: f64,
}

/// Load report of a broker.
///
/// Only commonly inspected fields are typed; everything else is kept in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalBrokerData {
    #[serde(default)]
    pub web_service_url: Option<String>,
    #[serde(default)]
    pub pulsar_service_url: Option<String>,
    #[serde(default)]
    pub cpu: ResourceUsage,
    #[serde(default)]
    pub memory: ResourceUsage,
    #[serde(default)]
    pub direct_memory: ResourceUsage,
    #[serde(default)]
    pub bandwidth_in: ResourceUsage,
    #[serde(default)]
    pub bandwidth_out: ResourceUsage,
    #[serde(default)]
    pub msg_rate_in: f64,
    #[serde(default)]
    pub msg_rate_out: f64,
    #[serde(default)]
    pub num_topics: i64,
    #[serde(default)]
    pub num_bundles: i64,
    #[serde(default)]
    pub num_consumers: i64,
    #[serde(default)]
    pub num_producers: i64,
    #[serde(default)]
    pub bundles: Vec<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Allocator statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocatorStats {
    #[serde(default)]
    pub num_direct_arenas: i64,
    #[serde(default)]
    pub num_heap_arenas: i64,
    #[serde(default)]
    pub num_thread_local_caches: i64,
    #[serde(default)]
    pub normal_cache_size: i64,
    #[serde(default)]
    pub small_cache_size: i64,
    #[serde(default)]
    pub direct_arenas: Vec<serde_json::Value>,
    #[serde(default)]
    pub heap_arenas: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}
