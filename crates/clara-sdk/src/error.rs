// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Error types for clara-sdk.

use thiserror::Error;

/// Result type using ClaraError.
pub type Result<T> = std::result::Result<T, ClaraError>;

/// Errors that can occur when using the Clara client SDK.
#[derive(Debug, Error)]
pub enum ClaraError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A method was invoked while the connection is closed.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A required argument was null, empty or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The platform returned a negative response code. `message` is the
    /// newline-joined peer-supplied text, or a generic fallback when the
    /// peer supplied none.
    #[error("remote error [{code}]: {message}")]
    Remote { code: i32, message: String },

    /// Connection to the platform failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Request timed out.
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// Unexpected response from the platform.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Protocol error.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl ClaraError {
    /// Build the error raised when a response header carries a negative
    /// code: the peer messages joined with newlines, or a generic message
    /// when the peer supplied none.
    pub fn remote(code: i32, messages: &[String]) -> Self {
        let message = if messages.is_empty() {
            format!("Internal Server Error {}", code)
        } else {
            messages.join("\n")
        };
        ClaraError::Remote { code, message }
    }

    /// Build the error raised when a method runs against a closed client.
    pub fn connection_closed() -> Self {
        ClaraError::InvalidOperation(
            "connection is currently closed; call reconnect() to reopen it".to_string(),
        )
    }
}

impl From<clara_protocol::channel::ChannelError> for ClaraError {
    fn from(err: clara_protocol::channel::ChannelError) -> Self {
        match err {
            clara_protocol::channel::ChannelError::Timeout(ms) => ClaraError::Timeout(ms),
            other => ClaraError::Connection(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClaraError {
    fn from(err: serde_json::Error) -> Self {
        ClaraError::Serialization(err.to_string())
    }
}

impl From<prost::DecodeError> for ClaraError {
    fn from(err: prost::DecodeError) -> Self {
        ClaraError::Protocol(err.to_string())
    }
}

impl From<clara_protocol::frame::FrameError> for ClaraError {
    fn from(err: clara_protocol::frame::FrameError) -> Self {
        ClaraError::Protocol(err.to_string())
    }
}

impl From<std::io::Error> for ClaraError {
    fn from(err: std::io::Error) -> Self {
        ClaraError::Connection(err.to_string())
    }
}

impl From<quinn::WriteError> for ClaraError {
    fn from(err: quinn::WriteError) -> Self {
        ClaraError::Connection(err.to_string())
    }
}

impl From<quinn::ClosedStream> for ClaraError {
    fn from(err: quinn::ClosedStream) -> Self {
        ClaraError::Connection(err.to_string())
    }
}
