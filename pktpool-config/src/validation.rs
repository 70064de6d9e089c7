// pktpool-config/src/validation.rs
//! Custom validation functions for configuration.

use validator::ValidationError;

/// Validate that a metric prefix is a legal Prometheus name fragment.
pub fn validate_metric_prefix(prefix: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^[a-z_][a-z0-9_]*$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(prefix) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_metric_prefix"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_prefixes() {
        assert!(validate_metric_prefix("pktpool").is_ok());
        assert!(validate_metric_prefix("edge_pool_2").is_ok());
        assert!(validate_metric_prefix("").is_err());
        assert!(validate_metric_prefix("2pool").is_err());
        assert!(validate_metric_prefix("pkt-pool").is_err());
    }
}
