use crate::error::{PulsarTypesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How subscription names are authorized on a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionAuthMode {
    None,
    Prefix,
}

impl SubscriptionAuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionAuthMode::None => "None",
            SubscriptionAuthMode::Prefix => "Prefix",
        }
    }
}

impl FromStr for SubscriptionAuthMode {
    type Err = PulsarTypesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "None" => Ok(SubscriptionAuthMode::None),
            "Prefix" => Ok(SubscriptionAuthMode::Prefix),
            other => Err(PulsarTypesError::InvalidSubscriptionAuthMode(other.to_string())),
        }
    }
}

impl fmt::Display for SubscriptionAuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!(
            "Prefix".parse::<SubscriptionAuthMode>().unwrap(),
            SubscriptionAuthMode::Prefix
        );
        assert_eq!(SubscriptionAuthMode::None.to_string(), "None");
        assert!("prefix".parse::<SubscriptionAuthMode>().is_err());
    }
}
