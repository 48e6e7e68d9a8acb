// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Configuration for the Clara client SDK.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use clara_protocol::channel::ChannelConfig;

use crate::error::{ClaraError, Result};

/// Configuration shared by every Clara client façade.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address to connect to.
    pub server_addr: SocketAddr,
    /// Server name for TLS verification.
    pub server_name: String,
    /// Skip TLS certificate verification (development only).
    pub skip_cert_verification: bool,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Request timeout, applied to every RPC. A call that exceeds it fails
    /// with `ClaraError::Timeout`; there is no partial-result salvage.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:50051".parse().unwrap(),
            server_name: "localhost".to_string(),
            skip_cert_verification: false,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for localhost development.
    ///
    /// This enables certificate verification skipping.
    pub fn localhost() -> Self {
        Self {
            skip_cert_verification: true,
            ..Self::default()
        }
    }

    /// Create a configuration for a target host with an optional port,
    /// concatenated as `host:port`. The host is also used as the TLS
    /// server name.
    pub fn for_target(host: &str, port: Option<u16>) -> Result<Self> {
        let target = match port {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let server_addr = target
            .to_socket_addrs()
            .map_err(|e| ClaraError::Config(format!("invalid target {}: {}", target, e)))?
            .next()
            .ok_or_else(|| ClaraError::Config(format!("target {} did not resolve", target)))?;

        Ok(Self {
            server_addr,
            server_name: host.to_string(),
            ..Self::default()
        })
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLARA_SERVER_ADDR`: Server address (default: "127.0.0.1:50051")
    /// - `CLARA_SERVER_NAME`: Server name for TLS (default: "localhost")
    /// - `CLARA_SKIP_CERT_VERIFICATION`: Skip TLS verification (default: "false")
    /// - `CLARA_CONNECT_TIMEOUT_MS`: Connection timeout in milliseconds (default: 10000)
    /// - `CLARA_REQUEST_TIMEOUT_MS`: Request timeout in milliseconds (default: 30000)
    pub fn from_env() -> Result<Self> {
        let server_addr = std::env::var("CLARA_SERVER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:50051".to_string())
            .parse()
            .map_err(|e| ClaraError::Config(format!("invalid CLARA_SERVER_ADDR: {}", e)))?;

        let server_name =
            std::env::var("CLARA_SERVER_NAME").unwrap_or_else(|_| "localhost".to_string());

        let skip_cert_verification = std::env::var("CLARA_SKIP_CERT_VERIFICATION")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        let connect_timeout_ms: u64 = std::env::var("CLARA_CONNECT_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse()
            .map_err(|e| ClaraError::Config(format!("invalid CLARA_CONNECT_TIMEOUT_MS: {}", e)))?;

        let request_timeout_ms: u64 = std::env::var("CLARA_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse()
            .map_err(|e| ClaraError::Config(format!("invalid CLARA_REQUEST_TIMEOUT_MS: {}", e)))?;

        Ok(Self {
            server_addr,
            server_name,
            skip_cert_verification,
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }

    /// Set the server address.
    pub fn with_server_addr(mut self, addr: SocketAddr) -> Self {
        self.server_addr = addr;
        self
    }

    /// Set the server name for TLS.
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Enable or disable certificate verification skipping.
    pub fn with_skip_cert_verification(mut self, skip: bool) -> Self {
        self.skip_cert_verification = skip;
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the transport-level channel configuration.
    pub(crate) fn channel_config(&self) -> ChannelConfig {
        ChannelConfig {
            server_addr: self.server_addr,
            server_name: self.server_name.clone(),
            dangerous_skip_cert_verification: self.skip_cert_verification,
            connect_timeout_ms: self.connect_timeout.as_millis() as u64,
            ..ChannelConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.server_addr, "127.0.0.1:50051".parse().unwrap());
        assert_eq!(config.server_name, "localhost");
        assert!(!config.skip_cert_verification);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_localhost_config() {
        let config = ClientConfig::localhost();
        assert!(config.skip_cert_verification);
    }

    #[test]
    fn test_for_target_with_port() {
        let config = ClientConfig::for_target("127.0.0.1", Some(50052)).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:50052".parse().unwrap());
        assert_eq!(config.server_name, "127.0.0.1");
    }

    #[test]
    fn test_for_target_without_port() {
        let config = ClientConfig::for_target("10.0.0.1:50051", None).unwrap();
        assert_eq!(config.server_addr, "10.0.0.1:50051".parse().unwrap());
    }

    #[test]
    fn test_for_target_invalid() {
        let result = ClientConfig::for_target("not a host name", None);
        assert!(matches!(result, Err(ClaraError::Config(_))));
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new()
            .with_server_addr("192.168.1.100:9000".parse().unwrap())
            .with_server_name("myserver")
            .with_skip_cert_verification(true)
            .with_connect_timeout(Duration::from_secs(5))
            .with_request_timeout(Duration::from_secs(60));

        assert_eq!(config.server_addr, "192.168.1.100:9000".parse().unwrap());
        assert_eq!(config.server_name, "myserver");
        assert!(config.skip_cert_verification);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_channel_config_carries_settings() {
        let config = ClientConfig::localhost().with_connect_timeout(Duration::from_secs(2));
        let channel = config.channel_config();
        assert_eq!(channel.server_addr, config.server_addr);
        assert_eq!(channel.server_name, config.server_name);
        assert!(channel.dangerous_skip_cert_verification);
        assert_eq!(channel.connect_timeout_ms, 2000);
    }
}
