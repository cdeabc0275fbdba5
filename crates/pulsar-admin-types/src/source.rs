//! Source connector configuration and status.
//!
//! Resources, update options, exception records and connector definitions
//! are shared with sinks and live in [`crate::sink`].

use crate::sink::{ExceptionInformation, Resources};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Source definition as accepted by the functions worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Topic the source writes to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serde_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configs: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_guarantees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_flags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_runtime_options: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    #[serde(default)]
    pub num_instances: i32,
    #[serde(default)]
    pub num_running: i32,
    #[serde(default)]
    pub instances: Vec<SourceInstanceStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInstanceStatus {
    #[serde(default)]
    pub instance_id: i32,
    #[serde(default)]
    pub status: SourceInstanceStatusData,
}

/// Runtime status of one source instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInstanceStatusData {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub num_restarts: i64,
    #[serde(default)]
    pub num_received_from_source: i64,
    #[serde(default)]
    pub num_system_exceptions: i64,
    #[serde(default)]
    pub latest_system_exceptions: Vec<ExceptionInformation>,
    #[serde(default)]
    pub num_source_exceptions: i64,
    #[serde(default)]
    pub latest_source_exceptions: Vec<ExceptionInformation>,
    #[serde(default)]
    pub num_written: i64,
    #[serde(default)]
    pub last_received_time: i64,
    #[serde(default)]
    pub worker_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_config_skips_unset_fields() {
        let config = SourceConfig {
            tenant: "public".to_string(),
            namespace: "default".to_string(),
            name: "kafka-in".to_string(),
            topic_name: Some("events".to_string()),
            archive: Some("builtin://kafka".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tenant": "public",
                "namespace": "default",
                "name": "kafka-in",
                "topicName": "events",
                "archive": "builtin://kafka"
            })
        );
    }

    #[test]
    fn test_source_status_parse() {
        let json = r#"{
            "numInstances": 2,
            "numRunning": 1,
            "instances": [{
                "instanceId": 1,
                "status": {
                    "running": false,
                    "error": "connection refused",
                    "numReceivedFromSource": 42,
                    "latestSourceExceptions": [{"exceptionString": "boom", "timestampMs": 7}]
                }
            }]
        }"#;
        let status: SourceStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.num_instances, 2);
        let instance = &status.instances[0];
        assert_eq!(instance.instance_id, 1);
        assert!(!instance.status.running);
        assert_eq!(instance.status.error, "connection refused");
        assert_eq!(instance.status.num_received_from_source, 42);
        assert_eq!(instance.status.latest_source_exceptions[0].timestamp_ms, 7);
    }
}
