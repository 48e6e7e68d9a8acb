// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! QUIC channel for connecting to a Clara platform server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use quinn::{ClientConfig, Connection, Endpoint, TransportConfig};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::frame::{Frame, FrameError, FramedStream};

/// Errors that can occur on the QUIC channel
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("connection error: {0}")]
    Connection(#[from] quinn::ConnectionError),

    #[error("connect error: {0}")]
    Connect(#[from] quinn::ConnectError),

    #[error("write error: {0}")]
    Write(#[from] quinn::WriteError),

    #[error("read error: {0}")]
    Read(#[from] quinn::ReadExactError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stream closed: {0}")]
    ClosedStream(#[from] quinn::ClosedStream),

    #[error("no connection established")]
    NotConnected,

    #[error("invalid server address: {0}")]
    InvalidServerAddress(String),

    #[error("connection timed out after {0}ms")]
    Timeout(u64),
}

/// Configuration for the QUIC channel
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Server address to connect to
    pub server_addr: SocketAddr,
    /// Server name for TLS verification (use "localhost" for local dev)
    pub server_name: String,
    /// Skip certificate verification (for development only!)
    pub dangerous_skip_cert_verification: bool,
    /// Keep-alive interval in milliseconds (0 to disable)
    pub keep_alive_interval_ms: u64,
    /// Idle timeout in milliseconds
    pub idle_timeout_ms: u64,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:50051".parse().unwrap(),
            server_name: "localhost".to_string(),
            dangerous_skip_cert_verification: false,
            keep_alive_interval_ms: 10_000,
            idle_timeout_ms: 600_000, // 10 minutes, long enough for chunked transfers
            connect_timeout_ms: 10_000,
        }
    }
}

impl ChannelConfig {
    /// Build a configuration for `host:port`, resolving the host if needed.
    pub fn for_target(host: &str, port: Option<u16>) -> Result<Self, ChannelError> {
        use std::net::ToSocketAddrs;

        let target = match port {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let server_addr = target
            .to_socket_addrs()
            .map_err(|_| ChannelError::InvalidServerAddress(target.clone()))?
            .next()
            .ok_or_else(|| ChannelError::InvalidServerAddress(target))?;

        Ok(Self {
            server_addr,
            server_name: host.to_string(),
            ..Default::default()
        })
    }
}

/// QUIC channel to a Clara platform server.
///
/// Connects lazily on first use and reuses the connection for subsequent
/// calls; each RPC runs on its own bidirectional stream.
pub struct ClaraChannel {
    endpoint: Endpoint,
    connection: Mutex<Option<Connection>>,
    config: ChannelConfig,
}

impl ClaraChannel {
    /// Create a new channel with the given configuration
    pub fn new(config: ChannelConfig) -> Result<Self, ChannelError> {
        let mut endpoint = Endpoint::client("0.0.0.0:0".parse().unwrap())?;

        let client_config = Self::build_client_config(&config)?;
        endpoint.set_default_client_config(client_config);

        Ok(Self {
            endpoint,
            connection: Mutex::new(None),
            config,
        })
    }

    /// Create a channel with default configuration for local development
    pub fn localhost() -> Result<Self, ChannelError> {
        Self::new(ChannelConfig {
            dangerous_skip_cert_verification: true,
            ..Default::default()
        })
    }

    fn build_client_config(config: &ChannelConfig) -> Result<ClientConfig, ChannelError> {
        let crypto = if config.dangerous_skip_cert_verification {
            rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(SkipServerVerification))
                .with_no_client_auth()
        } else {
            let mut roots = rustls::RootCertStore::empty();
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            rustls::ClientConfig::builder()
                .with_root_certificates(roots)
                .with_no_client_auth()
        };

        let mut transport = TransportConfig::default();
        if config.keep_alive_interval_ms > 0 {
            transport.keep_alive_interval(Some(std::time::Duration::from_millis(
                config.keep_alive_interval_ms,
            )));
        }
        transport.max_idle_timeout(Some(
            std::time::Duration::from_millis(config.idle_timeout_ms)
                .try_into()
                .unwrap(),
        ));

        let mut client_config = ClientConfig::new(Arc::new(
            quinn::crypto::rustls::QuicClientConfig::try_from(crypto).unwrap(),
        ));
        client_config.transport_config(Arc::new(transport));

        Ok(client_config)
    }

    /// Connect to the server. A no-op when a healthy connection exists.
    #[instrument(skip(self))]
    pub async fn connect(&self) -> Result<(), ChannelError> {
        let mut conn_guard = self.connection.lock().await;

        if let Some(ref conn) = *conn_guard
            && conn.close_reason().is_none()
        {
            debug!("reusing existing connection");
            return Ok(());
        }

        info!(addr = %self.config.server_addr, "connecting to Clara platform");

        let timeout = Duration::from_millis(self.config.connect_timeout_ms);
        let connecting = self
            .endpoint
            .connect(self.config.server_addr, &self.config.server_name)?;

        let connection = tokio::time::timeout(timeout, connecting)
            .await
            .map_err(|_| ChannelError::Timeout(self.config.connect_timeout_ms))??;

        info!("connected to Clara platform");
        *conn_guard = Some(connection);
        Ok(())
    }

    /// Get the current connection, connecting if necessary
    async fn get_connection(&self) -> Result<Connection, ChannelError> {
        self.connect().await?;
        let conn_guard = self.connection.lock().await;
        conn_guard.clone().ok_or(ChannelError::NotConnected)
    }

    /// Open a new bidirectional stream for a request/response
    pub async fn open_stream(
        &self,
    ) -> Result<FramedStream<(quinn::SendStream, quinn::RecvStream)>, ChannelError> {
        let conn = self.get_connection().await?;
        let (send, recv) = conn.open_bi().await?;
        Ok(FramedStream::new((send, recv)))
    }

    /// Send a request and receive a response using a new stream
    #[instrument(skip(self, request))]
    pub async fn request<Req: prost::Message, Resp: prost::Message + Default>(
        &self,
        request: &Req,
    ) -> Result<Resp, ChannelError> {
        let conn = self.get_connection().await?;
        let (mut send, mut recv) = conn.open_bi().await?;

        // Send request
        let frame = Frame::request(request)?;
        crate::frame::write_frame(&mut send, &frame).await?;
        send.finish()?;

        // Read response
        let response_frame = crate::frame::read_frame(&mut recv).await?;
        Ok(response_frame.decode()?)
    }

    /// Open a raw bidirectional stream for streaming operations.
    ///
    /// Used for client- and server-streaming calls where more than one
    /// frame travels in either direction.
    pub async fn open_raw_stream(
        &self,
    ) -> Result<(quinn::SendStream, quinn::RecvStream), ChannelError> {
        let conn = self.get_connection().await?;
        Ok(conn.open_bi().await?)
    }

    /// Close the connection gracefully
    pub async fn close(&self) {
        let mut conn_guard = self.connection.lock().await;
        if let Some(conn) = conn_guard.take() {
            conn.close(0u32.into(), b"client closing");
        }
    }

    /// Check if the channel is currently connected
    pub async fn is_connected(&self) -> bool {
        let conn_guard = self.connection.lock().await;
        if let Some(ref conn) = *conn_guard {
            conn.close_reason().is_none()
        } else {
            false
        }
    }
}

impl Drop for ClaraChannel {
    fn drop(&mut self) {
        // Close connection on drop (non-async, best effort)
        if let Ok(mut guard) = self.connection.try_lock()
            && let Some(conn) = guard.take()
        {
            conn.close(0u32.into(), b"client dropped");
        }
    }
}

/// Certificate verifier that skips all verification (for development only!)
#[derive(Debug)]
struct SkipServerVerification;

impl rustls::client::danger::ServerCertVerifier for SkipServerVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::pki_types::CertificateDer<'_>,
        _intermediates: &[rustls::pki_types::CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        vec![
            rustls::SignatureScheme::RSA_PKCS1_SHA256,
            rustls::SignatureScheme::RSA_PKCS1_SHA384,
            rustls::SignatureScheme::RSA_PKCS1_SHA512,
            rustls::SignatureScheme::ECDSA_NISTP256_SHA256,
            rustls::SignatureScheme::ECDSA_NISTP384_SHA384,
            rustls::SignatureScheme::ECDSA_NISTP521_SHA512,
            rustls::SignatureScheme::RSA_PSS_SHA256,
            rustls::SignatureScheme::RSA_PSS_SHA384,
            rustls::SignatureScheme::RSA_PSS_SHA512,
            rustls::SignatureScheme::ED25519,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChannelConfig::default();
        assert_eq!(config.server_addr, "127.0.0.1:50051".parse().unwrap());
        assert_eq!(config.server_name, "localhost");
        assert!(!config.dangerous_skip_cert_verification);
        assert_eq!(config.keep_alive_interval_ms, 10_000);
        assert_eq!(config.idle_timeout_ms, 600_000);
        assert_eq!(config.connect_timeout_ms, 10_000);
    }

    #[test]
    fn test_for_target_with_port() {
        let config = ChannelConfig::for_target("127.0.0.1", Some(50052)).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:50052".parse().unwrap());
        assert_eq!(config.server_name, "127.0.0.1");
    }

    #[test]
    fn test_for_target_without_port() {
        let config = ChannelConfig::for_target("10.0.0.1:50051", None).unwrap();
        assert_eq!(config.server_addr, "10.0.0.1:50051".parse().unwrap());
    }

    #[test]
    fn test_for_target_invalid() {
        let result = ChannelConfig::for_target("not an address", None);
        assert!(matches!(
            result,
            Err(ChannelError::InvalidServerAddress(_))
        ));
    }

    #[test]
    fn test_config_clone() {
        let config = ChannelConfig {
            server_addr: "192.168.1.1:9000".parse().unwrap(),
            server_name: "custom".to_string(),
            dangerous_skip_cert_verification: true,
            keep_alive_interval_ms: 5000,
            idle_timeout_ms: 60000,
            connect_timeout_ms: 3000,
        };
        let cloned = config.clone();
        assert_eq!(config.server_addr, cloned.server_addr);
        assert_eq!(config.server_name, cloned.server_name);
        assert_eq!(
            config.dangerous_skip_cert_verification,
            cloned.dangerous_skip_cert_verification
        );
        assert_eq!(config.keep_alive_interval_ms, cloned.keep_alive_interval_ms);
        assert_eq!(config.idle_timeout_ms, cloned.idle_timeout_ms);
        assert_eq!(config.connect_timeout_ms, cloned.connect_timeout_ms);
    }

    #[tokio::test]
    async fn test_channel_creation() {
        let config = ChannelConfig {
            dangerous_skip_cert_verification: true,
            ..Default::default()
        };
        let channel = ClaraChannel::new(config);
        assert!(
            channel.is_ok(),
            "Failed to create channel: {:?}",
            channel.err()
        );
    }

    #[tokio::test]
    async fn test_channel_localhost() {
        let channel = ClaraChannel::localhost();
        assert!(channel.is_ok());
    }

    #[tokio::test]
    async fn test_channel_initial_not_connected() {
        let channel = ClaraChannel::localhost().unwrap();
        assert!(!channel.is_connected().await);
    }

    #[tokio::test]
    async fn test_channel_connect_timeout() {
        let config = ChannelConfig {
            server_addr: "127.0.0.1:59998".parse().unwrap(), // unlikely to have a server
            dangerous_skip_cert_verification: true,
            connect_timeout_ms: 100,
            ..Default::default()
        };
        let channel = ClaraChannel::new(config).unwrap();
        assert!(channel.connect().await.is_err());
    }

    #[tokio::test]
    async fn test_channel_close_without_connection() {
        let channel = ClaraChannel::localhost().unwrap();
        channel.close().await;
        assert!(!channel.is_connected().await);
    }

    #[tokio::test]
    async fn test_open_raw_stream_without_server() {
        let config = ChannelConfig {
            server_addr: "127.0.0.1:59995".parse().unwrap(),
            dangerous_skip_cert_verification: true,
            connect_timeout_ms: 100,
            ..Default::default()
        };
        let channel = ClaraChannel::new(config).unwrap();
        assert!(channel.open_raw_stream().await.is_err());
    }

    #[test]
    fn test_channel_error_display() {
        let err = ChannelError::NotConnected;
        assert_eq!(format!("{}", err), "no connection established");

        let err = ChannelError::Timeout(5000);
        assert_eq!(format!("{}", err), "connection timed out after 5000ms");

        let err = ChannelError::InvalidServerAddress("bad:addr".to_string());
        assert_eq!(format!("{}", err), "invalid server address: bad:addr");
    }

    #[test]
    fn test_skip_server_verification_schemes() {
        use rustls::client::danger::ServerCertVerifier;
        let verifier = SkipServerVerification;
        let schemes = verifier.supported_verify_schemes();
        assert!(!schemes.is_empty());
        assert!(schemes.contains(&rustls::SignatureScheme::ED25519));
    }

    #[test]
    fn test_build_client_config_with_verification() {
        let config = ChannelConfig::default();
        assert!(ClaraChannel::build_client_config(&config).is_ok());
    }

    #[test]
    fn test_build_client_config_skip_verification() {
        let config = ChannelConfig {
            dangerous_skip_cert_verification: true,
            ..Default::default()
        };
        assert!(ClaraChannel::build_client_config(&config).is_ok());
    }
}
