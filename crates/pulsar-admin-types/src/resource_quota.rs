//! Resource quotas and namespace bundles.

use serde::{Deserialize, Serialize};

pub const FIRST_BOUNDARY: &str = "0x00000000";
pub const LAST_BOUNDARY: &str = "0xffffffff";

/// Resource quota of a namespace bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuota {
    /// Incoming messages per second
    pub msg_rate_in: f64,
    /// Outgoing messages per second
    pub msg_rate_out: f64,
    /// Inbound bandwidth in bytes per second
    pub bandwidth_in: f64,
    /// Outbound bandwidth in bytes per second
    pub bandwidth_out: f64,
    /// Memory in megabytes
    pub memory: f64,
    /// Whether the quota may be adjusted by the load manager
    #[serde(default = "default_dynamic")]
    pub dynamic: bool,
}

fn default_dynamic() -> bool {
    true
}

impl Default for ResourceQuota {
    fn default() -> Self {
        Self {
            msg_rate_in: 40.0,
            msg_rate_out: 120.0,
            bandwidth_in: 100_000.0,
            bandwidth_out: 400_000.0,
            memory: 100.0,
            dynamic: true,
        }
    }
}

/// Bundle layout of a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlesData {
    #[serde(default)]
    pub boundaries: Vec<String>,
    pub num_bundles: usize,
}

impl BundlesData {
    pub fn new(boundaries: Vec<String>) -> Self {
        let num_bundles = boundaries.len().saturating_sub(1);
        Self {
            boundaries,
            num_bundles,
        }
    }

    pub fn with_num_bundles(num_bundles: usize) -> Self {
        Self {
            boundaries: Vec::new(),
            num_bundles,
        }
    }

    /// A single bundle covering the whole hash range.
    pub fn default_bundle() -> Self {
        Self {
            boundaries: vec![FIRST_BOUNDARY.to_string(), LAST_BOUNDARY.to_string()],
            num_bundles: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_json_field_names() {
        let json = serde_json::to_value(ResourceQuota::default()).unwrap();
        assert_eq!(json["msgRateIn"], 40.0);
        assert_eq!(json["bandwidthOut"], 400_000.0);
        assert_eq!(json["dynamic"], true);
    }

    #[test]
    fn test_bundles() {
        let bundles = BundlesData::new(vec![
            "0x00000000".to_string(),
            "0x80000000".to_string(),
            "0xffffffff".to_string(),
        ]);
        assert_eq!(bundles.num_bundles, 2);

        let default = BundlesData::default_bundle();
        assert_eq!(default.num_bundles, 1);
        assert_eq!(default.boundaries, vec![FIRST_BOUNDARY, LAST_BOUNDARY]);

        assert!(BundlesData::with_num_bundles(4).boundaries.is_empty());
    }
}
