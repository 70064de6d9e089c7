//! Packet pool sizing parameters.
//!
//! Fixed at pool construction; a pool never grows or shrinks afterwards.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// Packet pool configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of pre‑allocated packet buffers.
    #[serde(default = "default_capacity")]
    #[validate(range(min = 1, max = 1048576))]
    pub capacity: usize,

    /// Payload bytes per buffer. Lengths must fit in 16 bits.
    #[serde(default = "default_payload_size")]
    #[validate(range(min = 64, max = 65535))]
    pub payload_size: usize,

    /// Zero the whole buffer on release instead of only resetting its length.
    #[serde(default)]
    pub zero_on_release: bool,
}

fn default_capacity() -> usize {
    1000
}

fn default_payload_size() -> usize {
    10 * 1024
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            payload_size: default_payload_size(),
            zero_on_release: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_config_is_valid() {
        let config = PoolConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.payload_size, 10240);
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        let zero = PoolConfig {
            capacity: 0,
            ..PoolConfig::default()
        };
        assert!(zero.validate().is_err());

        let jumbo = PoolConfig {
            payload_size: 65536,
            ..PoolConfig::default()
        };
        let errors = jumbo.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("payload_size"));
    }
}
