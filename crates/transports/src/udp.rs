//! UdpTransport - one datagram per batch
//!
//! Send errors are propagated, not swallowed: the writer's
//! retention-on-failure semantics depend on seeing the publish fail so the
//! buffered bytes survive for a caller-driven retry.

use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use contracts::{BusError, BusTransport};
use tokio::net::UdpSocket;
use tracing::{debug, instrument};

/// Configuration for UdpTransport
#[derive(Debug, Clone)]
pub struct UdpTransportConfig {
    /// Target address
    pub addr: SocketAddr,
    /// Max datagram size (UDP typically 65507 for IPv4)
    pub max_datagram_size: usize,
}

impl UdpTransportConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let addr_str = params
            .get("addr")
            .ok_or_else(|| "missing 'addr' parameter".to_string())?;

        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|e| format!("invalid address '{}': {}", addr_str, e))?;

        let max_datagram_size = match params.get("max_datagram_size") {
            Some(s) => s
                .parse()
                .map_err(|e| format!("invalid max_datagram_size '{}': {}", s, e))?,
            None => 65000,
        };

        Ok(Self {
            addr,
            max_datagram_size,
        })
    }
}

/// Transport that sends one datagram per published batch
pub struct UdpTransport {
    name: String,
    config: UdpTransportConfig,
    socket: UdpSocket,
}

impl UdpTransport {
    /// Create a new UdpTransport connected to the target address
    #[instrument(name = "udp_transport_new", skip(name, config))]
    pub async fn new(name: impl Into<String>, config: UdpTransportConfig) -> std::io::Result<Self> {
        let name = name.into();
        // Bind to any available port
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(&config.addr).await?;

        debug!(
            transport = %name,
            target = %config.addr,
            "UdpTransport connected"
        );

        Ok(Self {
            name,
            config,
            socket,
        })
    }

    /// Create from params (for factory)
    #[instrument(name = "udp_transport_from_params", skip(name, params))]
    pub async fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, BusError> {
        let name = name.into();
        let config = UdpTransportConfig::from_params(params)
            .map_err(|e| BusError::config_validation("transport.params", e))?;

        Self::new(name.clone(), config)
            .await
            .map_err(|e| BusError::transport_connect(name, e.to_string()))
    }
}

impl BusTransport for UdpTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "udp_transport_publish",
        skip(self, payload),
        fields(transport = %self.name, bytes = payload.len())
    )]
    async fn publish(&self, payload: Bytes) -> Result<(), BusError> {
        if payload.len() > self.config.max_datagram_size {
            return Err(BusError::transport_publish(
                &self.name,
                format!(
                    "batch of {} bytes exceeds max datagram size {}",
                    payload.len(),
                    self.config.max_datagram_size
                ),
            ));
        }

        let sent = self
            .socket
            .send(&payload)
            .await
            .map_err(|e| BusError::transport_publish(&self.name, e.to_string()))?;

        debug!(transport = %self.name, bytes = sent, "datagram sent");
        Ok(())
    }
}
