//! Sink connector configuration and status.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Archive prefix for connectors bundled with the cluster.
pub const BUILTIN_ARCHIVE_PREFIX: &str = "builtin://";

/// CPU, memory and disk requested per connector instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<i64>,
}

/// Sink definition as accepted by the functions worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkConfig {
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_subscription_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_to_serde_class_name: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_to_schema_type: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configs: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_guarantees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retain_ordering: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_ack: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_subscription: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_flags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_runtime_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
}

/// Options for updating a sink or source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOptions {
    pub update_auth_data: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionInformation {
    #[serde(default)]
    pub exception_string: String,
    #[serde(default)]
    pub timestamp_ms: i64,
}

/// Status of every instance of a sink.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkStatus {
    #[serde(default)]
    pub num_instances: i32,
    #[serde(default)]
    pub num_running: i32,
    #[serde(default)]
    pub instances: Vec<SinkInstanceStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkInstanceStatus {
    #[serde(rename = "instanceId", default)]
    pub instance_id: i32,
    #[serde(default)]
    pub status: SinkInstanceStatusData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkInstanceStatusData {
    #[serde(default)]
    pub running: bool,
    #[serde(rename = "error", default)]
    pub error: String,
    #[serde(default)]
    pub num_restarts: i64,
    #[serde(default)]
    pub num_read_from_pulsar: i64,
    #[serde(default)]
    pub num_system_exceptions: i64,
    #[serde(default)]
    pub latest_system_exceptions: Vec<ExceptionInformation>,
    #[serde(default)]
    pub num_sink_exceptions: i64,
    #[serde(default)]
    pub latest_sink_exceptions: Vec<ExceptionInformation>,
    #[serde(default)]
    pub num_written_to_sink: i64,
    #[serde(default)]
    pub last_received_time: i64,
    #[serde(rename = "workerId", default)]
    pub worker_id: String,
}

/// A connector bundled with the cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_config_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink_config_class: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_config_skips_unset_fields() {
        let config = SinkConfig {
            tenant: "public".to_string(),
            namespace: "default".to_string(),
            name: "es".to_string(),
            inputs: Some(vec!["events".to_string()]),
            parallelism: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tenant": "public",
                "namespace": "default",
                "name": "es",
                "inputs": ["events"],
                "parallelism": 2
            })
        );
    }

    #[test]
    fn test_sink_status_parse() {
        let json = r#"{
            "numInstances": 1,
            "numRunning": 1,
            "instances": [{
                "instanceId": 0,
                "status": {"running": true, "error": "", "numWrittenToSink": 10, "workerId": "w-1"}
            }]
        }"#;
        let status: SinkStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.num_running, 1);
        assert!(status.instances[0].status.running);
        assert_eq!(status.instances[0].status.num_written_to_sink, 10);
        assert_eq!(status.instances[0].status.worker_id, "w-1");
    }
}
