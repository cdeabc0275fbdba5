//! Topic names.

use crate::error::{PulsarTypesError, Result};
use std::fmt;
use std::str::FromStr;

const PUBLIC_TENANT: &str = "public";
const DEFAULT_NAMESPACE: &str = "default";
const PARTITIONED_TOPIC_SUFFIX: &str = "-partition-";

/// Topic persistence domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicDomain {
    Persistent,
    NonPersistent,
}

impl TopicDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicDomain::Persistent => "persistent",
            TopicDomain::NonPersistent => "non-persistent",
        }
    }
}

/// A fully-qualified topic name: `<domain>://<tenant>/<namespace>/<local>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicName {
    pub domain: TopicDomain,
    pub tenant: String,
    pub namespace: String,
    pub local_name: String,
}

impl TopicName {
    /// Parse a topic name.
    ///
    /// Accepts the fully-qualified form, `tenant/namespace/topic`, and a
    /// bare `topic` which lands in `public/default`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = |reason: &str| PulsarTypesError::InvalidTopicName {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (domain, rest) = if let Some(rest) = s.strip_prefix("persistent://") {
            (TopicDomain::Persistent, rest)
        } else if let Some(rest) = s.strip_prefix("non-persistent://") {
            (TopicDomain::NonPersistent, rest)
        } else if s.contains("://") {
            return Err(invalid("unknown domain"));
        } else {
            (TopicDomain::Persistent, s)
        };

        let parts: Vec<&str> = rest.split('/').collect();
        let (tenant, namespace, local_name) = match parts.as_slice() {
            [local] => (PUBLIC_TENANT, DEFAULT_NAMESPACE, *local),
            [tenant, namespace, local] => (*tenant, *namespace, *local),
            _ => {
                return Err(invalid(
                    "expected <topic> or <tenant>/<namespace>/<topic>",
                ))
            }
        };

        if tenant.is_empty() || namespace.is_empty() || local_name.is_empty() {
            return Err(invalid("tenant, namespace and topic must not be empty"));
        }

        Ok(Self {
            domain,
            tenant: tenant.to_string(),
            namespace: namespace.to_string(),
            local_name: local_name.to_string(),
        })
    }

    /// Path segments addressing this topic in the admin REST API.
    pub fn rest_path_segments(&self) -> [&str; 4] {
        [
            self.domain.as_str(),
            &self.tenant,
            &self.namespace,
            &self.local_name,
        ]
    }

    /// Name of partition `index` of this topic.
    pub fn partition(&self, index: u32) -> Self {
        Self {
            local_name: format!("{}{PARTITIONED_TOPIC_SUFFIX}{index}", self.local_name),
            ..self.clone()
        }
    }

    /// Partition index, if this is the name of a single partition.
    pub fn partition_index(&self) -> Option<u32> {
        let (_, index) = self.local_name.rsplit_once(PARTITIONED_TOPIC_SUFFIX)?;
        index.parse().ok()
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}/{}",
            self.domain.as_str(),
            self.tenant,
            self.namespace,
            self.local_name
        )
    }
}

impl FromStr for TopicName {
    type Err = PulsarTypesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_name() {
        let topic = TopicName::parse("my-topic").unwrap();
        assert_eq!(topic.to_string(), "persistent://public/default/my-topic");
    }

    #[test]
    fn test_parse_tenant_namespace_topic() {
        let topic = TopicName::parse("acme/orders/created").unwrap();
        assert_eq!(topic.domain, TopicDomain::Persistent);
        assert_eq!(topic.tenant, "acme");
        assert_eq!(topic.namespace, "orders");
        assert_eq!(topic.local_name, "created");
    }

    #[test]
    fn test_parse_fully_qualified() {
        let topic = TopicName::parse("non-persistent://acme/orders/created").unwrap();
        assert_eq!(topic.domain, TopicDomain::NonPersistent);
        assert_eq!(
            topic.rest_path_segments(),
            ["non-persistent", "acme", "orders", "created"]
        );
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for s in ["", "a/b", "a/b/c/d", "kafka://a/b/c", "persistent://a//c"] {
            assert!(TopicName::parse(s).is_err(), "{s} should not parse");
        }
    }

    #[test]
    fn test_partition() {
        let topic = TopicName::parse("acme/orders/created").unwrap();
        let partition = topic.partition(3);
        assert_eq!(
            partition.to_string(),
            "persistent://acme/orders/created-partition-3"
        );
        assert_eq!(partition.partition_index(), Some(3));
        assert_eq!(topic.partition_index(), None);
    }
}
