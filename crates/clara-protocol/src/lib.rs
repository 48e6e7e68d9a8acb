// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Clara Protocol - QUIC + Protobuf communication layer
//!
//! This crate provides the wire protocol spoken between Clara clients and
//! the Clara platform server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     clara-protocol                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RPC Layer: Request/Response + Streaming frames             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Serialization: Protobuf (prost)                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Transport: QUIC (quinn)                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every frame payload is an [`rpc_proto::RpcRequest`] or
//! [`rpc_proto::RpcResponse`] envelope; the per-service message types live
//! in the `*_proto` modules. Unary calls exchange one frame each way;
//! streaming calls exchange several, with stream finish (not a sentinel
//! message) marking the end of a sequence.
//!
//! # Usage
//!
//! ```ignore
//! use clara_protocol::{ClaraChannel, rpc_proto, pipelines_proto};
//!
//! let channel = ClaraChannel::localhost()?;
//! channel.connect().await?;
//!
//! let request = rpc_proto::RpcRequest {
//!     request: Some(rpc_proto::rpc_request::Request::PipelinesList(
//!         pipelines_proto::PipelinesListRequest { header: None },
//!     )),
//! };
//! let response: rpc_proto::RpcResponse = channel.request(&request).await?;
//! ```

pub mod channel;
pub mod frame;
pub mod server;

// Protobuf message modules, maintained by hand (no build-time codegen)
pub mod common_proto;
pub mod jobs_proto;
pub mod models_proto;
pub mod payloads_proto;
pub mod pipelines_proto;
pub mod platform_proto;
pub mod rpc_proto;

// Re-export main types
pub use channel::{ChannelConfig, ChannelError, ClaraChannel};
pub use frame::{Frame, FrameError, FramedStream, MessageType};
pub use server::{ClaraServer, ClaraServerConfig, ConnectionHandler, ServerError, StreamHandler};
