// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Shared connection plumbing behind the client façades.
//!
//! Every façade drives its RPCs through a [`ClientConnection`]: an open/closed
//! flag layered over the QUIC channel, a request timeout, and the three call
//! shapes the platform speaks (unary, client-streaming, server-streaming).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clara_protocol::ClaraChannel;
use clara_protocol::common_proto::{RequestHeader, ResponseHeader, Version};
use clara_protocol::frame::{self, Frame, FrameError};
use clara_protocol::rpc_proto::{RpcRequest, RpcResponse, rpc_request, rpc_response};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClaraError, Result};

/// User agent reported in every request header.
pub(crate) const USER_AGENT: &str = "Clara.Platform.Client";

/// API version reported in every request header.
const API_VERSION: Version = Version {
    major: 0,
    minor: 6,
    patch: 0,
};

/// Build the header attached to every request.
pub(crate) fn request_header() -> RequestHeader {
    RequestHeader {
        api_version: Some(API_VERSION),
        user_agent: USER_AGENT.to_string(),
    }
}

/// Validate a response header: a missing header is a protocol violation, a
/// negative code is a remote failure. Non-negative codes pass.
pub(crate) fn check_header(header: Option<&ResponseHeader>) -> Result<()> {
    let header = header
        .ok_or_else(|| ClaraError::Protocol("response is missing its header".to_string()))?;
    if header.code < 0 {
        return Err(ClaraError::remote(header.code, &header.messages));
    }
    Ok(())
}

/// Error for a response envelope carrying a variant other than the one the
/// call expects.
pub(crate) fn unexpected_variant(operation: &str) -> ClaraError {
    ClaraError::UnexpectedResponse(format!("mismatched response variant for {}", operation))
}

/// A façade's view of the transport: the shared channel plus an open flag.
///
/// Closing is local to the façade; the underlying channel is shared and shuts
/// down when the last façade holding it drops.
pub(crate) struct ClientConnection {
    channel: Arc<ClaraChannel>,
    open: AtomicBool,
    request_timeout: Duration,
}

impl ClientConnection {
    /// Build a connection from configuration, creating a fresh channel.
    pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
        let channel = Arc::new(ClaraChannel::new(config.channel_config())?);
        Ok(Self::with_channel(channel, config))
    }

    /// Build a connection over an existing channel. Used by the aggregate
    /// client to share one QUIC connection across façades, and by tests to
    /// point a façade at a local server.
    pub(crate) fn with_channel(channel: Arc<ClaraChannel>, config: &ClientConfig) -> Self {
        Self {
            channel,
            open: AtomicBool::new(true),
            request_timeout: config.request_timeout,
        }
    }

    /// The shared channel, for handing to sibling façades.
    pub(crate) fn channel(&self) -> Arc<ClaraChannel> {
        Arc::clone(&self.channel)
    }

    /// True when the façade has not been closed. Unlike
    /// [`is_connected`](Self::is_connected) this does not inspect the link.
    pub(crate) fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Fail with `InvalidOperation` when the façade has been closed.
    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.open.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(ClaraError::connection_closed())
        }
    }

    /// Close the façade. Idempotent; the channel itself is closed so a later
    /// [`reconnect`](Self::reconnect) dials a fresh connection.
    pub(crate) async fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            debug!("closing client connection");
            self.channel.close().await;
        }
    }

    /// Reopen a closed façade. A no-op when already open; the channel itself
    /// redials lazily on the next call.
    pub(crate) fn reconnect(&self) {
        self.open.store(true, Ordering::Release);
    }

    /// True when the façade is open and the channel currently holds a live
    /// QUIC connection.
    pub(crate) async fn is_connected(&self) -> bool {
        self.open.load(Ordering::Acquire) && self.channel.is_connected().await
    }

    async fn timed<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let ms = self.request_timeout.as_millis() as u64;
        tokio::time::timeout(self.request_timeout, fut)
            .await
            .map_err(|_| ClaraError::Timeout(ms))?
    }

    /// One request frame out, one response frame back.
    pub(crate) async fn unary(
        &self,
        request: rpc_request::Request,
    ) -> Result<rpc_response::Response> {
        self.ensure_open()?;
        self.timed(async {
            let envelope = RpcRequest {
                request: Some(request),
            };
            let response: RpcResponse = self.channel.request(&envelope).await?;
            response
                .response
                .ok_or_else(|| ClaraError::UnexpectedResponse("empty response envelope".to_string()))
        })
        .await
    }

    /// Client-streaming: several request frames out, one response frame back.
    pub(crate) async fn send_stream(
        &self,
        requests: Vec<rpc_request::Request>,
    ) -> Result<rpc_response::Response> {
        self.ensure_open()?;
        self.timed(async {
            let (mut send, mut recv) = self.channel.open_raw_stream().await?;
            for request in requests {
                let envelope = RpcRequest {
                    request: Some(request),
                };
                let frame = Frame::request(&envelope)?;
                frame::write_frame(&mut send, &frame).await?;
            }
            send.finish()?;

            let response_frame = frame::read_frame(&mut recv).await?;
            let envelope: RpcResponse = response_frame.decode()?;
            envelope
                .response
                .ok_or_else(|| ClaraError::UnexpectedResponse("empty response envelope".to_string()))
        })
        .await
    }

    /// Server-streaming: one request frame out, responses collected until the
    /// server finishes its side of the stream. An empty vector means the
    /// server had nothing to return.
    pub(crate) async fn collect_stream(
        &self,
        request: rpc_request::Request,
    ) -> Result<Vec<rpc_response::Response>> {
        self.ensure_open()?;
        self.timed(async {
            let (mut send, mut recv) = self.channel.open_raw_stream().await?;
            let envelope = RpcRequest {
                request: Some(request),
            };
            let frame = Frame::request(&envelope)?;
            frame::write_frame(&mut send, &frame).await?;
            send.finish()?;

            let mut responses = Vec::new();
            loop {
                match frame::read_frame(&mut recv).await {
                    Ok(frame) => {
                        let envelope: RpcResponse = frame.decode()?;
                        let inner = envelope.response.ok_or_else(|| {
                            ClaraError::UnexpectedResponse("empty response envelope".to_string())
                        })?;
                        responses.push(inner);
                    }
                    Err(FrameError::ConnectionClosed) => break,
                    Err(e) => return Err(e.into()),
                }
            }
            Ok(responses)
        })
        .await
    }

    /// Open a raw bidirectional stream for chunked transfers. The caller owns
    /// framing; the configured request timeout should be applied around the
    /// whole transfer via [`timed_transfer`](Self::timed_transfer).
    pub(crate) async fn open_raw(&self) -> Result<(quinn::SendStream, quinn::RecvStream)> {
        self.ensure_open()?;
        Ok(self.channel.open_raw_stream().await?)
    }

    /// Apply the configured request timeout to a whole chunked transfer.
    pub(crate) async fn timed_transfer<T>(
        &self,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        self.timed(fut).await
    }
}
