//! Tenant configuration.

use serde::{Deserialize, Serialize};

/// Tenant name plus the admin roles and clusters it may use.
///
/// The name travels in the URL, never in the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantData {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub admin_roles: Vec<String>,
    #[serde(default)]
    pub allowed_clusters: Vec<String>,
}

impl TenantData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_not_serialized() {
        let tenant = TenantData {
            name: "acme".to_string(),
            admin_roles: vec!["admin".to_string()],
            allowed_clusters: vec!["standalone".to_string()],
        };
        let json = serde_json::to_value(&tenant).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"adminRoles": ["admin"], "allowedClusters": ["standalone"]})
        );
    }

    #[test]
    fn test_deserialize_missing_lists() {
        let tenant: TenantData = serde_json::from_str("{}").unwrap();
        assert!(tenant.admin_roles.is_empty());
        assert!(tenant.allowed_clusters.is_empty());
    }
}
