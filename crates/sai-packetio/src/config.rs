//! Packet channel configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Which generic netlink family and multicast group packets go to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketIoConfig {
    #[serde(default = "default_family")]
    pub family: String,

    #[serde(default = "default_group")]
    pub group: String,
}

fn default_family() -> String {
    "genl_packet".to_string()
}

fn default_group() -> String {
    "packets".to_string()
}

impl Default for PacketIoConfig {
    fn default() -> Self {
        Self {
            family: default_family(),
            group: default_group(),
        }
    }
}

impl PacketIoConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = PacketIoConfig::from_json(r#"{"group": "sflow"}"#).unwrap();
        assert_eq!(
            config,
            PacketIoConfig {
                family: "genl_packet".to_string(),
                group: "sflow".to_string(),
            }
        );
        assert_eq!(PacketIoConfig::from_json("{}").unwrap(), PacketIoConfig::default());
    }

    #[test]
    fn test_bad_json_is_a_config_error() {
        assert!(matches!(
            PacketIoConfig::from_json("[1, 2]"),
            Err(crate::PacketIoError::Config(_))
        ));
    }
}
