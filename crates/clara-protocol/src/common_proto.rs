// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Message types shared by every Clara service.
//!
//! These are maintained by hand rather than generated at build time so the
//! crate builds without a protoc toolchain. Field numbers are part of the
//! wire contract and must never be reused.

/// Semantic version of the API speaking on the wire.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Version {
    #[prost(int32, tag = "1")]
    pub major: i32,
    #[prost(int32, tag = "2")]
    pub minor: i32,
    #[prost(int32, tag = "3")]
    pub patch: i32,
}

/// Header attached to every request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestHeader {
    #[prost(message, optional, tag = "1")]
    pub api_version: Option<Version>,
    #[prost(string, tag = "2")]
    pub user_agent: String,
}

/// Header attached to every response. A negative `code` denotes failure;
/// `messages` carries human-readable detail and may be empty.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseHeader {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, repeated, tag = "2")]
    pub messages: Vec<String>,
}

/// Opaque identifier of a server-side entity.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Identifier {
    #[prost(string, tag = "1")]
    pub value: String,
}
