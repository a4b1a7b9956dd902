//! Configuration validation
//!
//! Validation rules:
//! - flush_threshold_bytes >= 1
//! - transport name non-empty
//! - udp transport requires a parseable `addr` param
//! - numeric params parse as integers

use contracts::{BusConfig, BusError, TransportType};

/// Validate a BusConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &BusConfig) -> Result<(), BusError> {
    validate_writer(config)?;
    validate_transport(config)?;
    Ok(())
}

/// Validate writer settings
fn validate_writer(config: &BusConfig) -> Result<(), BusError> {
    if config.writer.flush_threshold_bytes == 0 {
        return Err(BusError::config_validation(
            "writer.flush_threshold_bytes",
            "must be >= 1",
        ));
    }
    Ok(())
}

/// Validate transport settings
fn validate_transport(config: &BusConfig) -> Result<(), BusError> {
    let transport = &config.transport;

    if transport.name.is_empty() {
        return Err(BusError::config_validation(
            "transport.name",
            "must be non-empty",
        ));
    }

    match transport.transport_type {
        TransportType::Udp => {
            let addr = transport.params.get("addr").ok_or_else(|| {
                BusError::config_validation("transport.params.addr", "required for udp transport")
            })?;
            addr.parse::<std::net::SocketAddr>().map_err(|e| {
                BusError::config_validation(
                    "transport.params.addr",
                    format!("invalid socket address '{addr}': {e}"),
                )
            })?;

            if let Some(size) = transport.params.get("max_datagram_size") {
                size.parse::<usize>().map_err(|e| {
                    BusError::config_validation(
                        "transport.params.max_datagram_size",
                        format!("not an integer: {e}"),
                    )
                })?;
            }
        }
        TransportType::Log | TransportType::Recording => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{TransportConfig, WriterSettings};
    use std::collections::HashMap;

    fn base_config(transport_type: TransportType) -> BusConfig {
        BusConfig {
            writer: WriterSettings {
                flush_threshold_bytes: 1024,
            },
            transport: TransportConfig {
                name: "t".to_string(),
                transport_type,
                params: HashMap::new(),
            },
        }
    }

    #[test]
    fn test_valid_log_config() {
        assert!(validate(&base_config(TransportType::Log)).is_ok());
    }

    #[test]
    fn test_zero_threshold() {
        let mut config = base_config(TransportType::Log);
        config.writer.flush_threshold_bytes = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_udp_requires_addr() {
        let config = base_config(TransportType::Udp);
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("addr"));
    }

    #[test]
    fn test_udp_invalid_addr() {
        let mut config = base_config(TransportType::Udp);
        config
            .transport
            .params
            .insert("addr".to_string(), "not-an-address".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_udp_valid() {
        let mut config = base_config(TransportType::Udp);
        config
            .transport
            .params
            .insert("addr".to_string(), "127.0.0.1:9100".to_string());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_transport_name() {
        let mut config = base_config(TransportType::Log);
        config.transport.name.clear();
        assert!(validate(&config).is_err());
    }
}
