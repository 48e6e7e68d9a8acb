// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Messages for the Payloads service.
//!
//! Upload is client-streaming and download is server-streaming; both move
//! file content in bounded chunks carried by the `data` field.

use std::collections::HashMap;

use crate::common_proto::{Identifier, RequestHeader, ResponseHeader};

/// Origin of a payload: created alongside a job or reusable across jobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PayloadType {
    Unknown = 0,
    Pipeline = 1,
    Reusable = 2,
}

/// Metadata of one blob within a payload. `name` is a slash-separated path
/// relative to the payload root and must not begin with `/`.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct PayloadFileDetails {
    #[prost(uint32, tag = "1")]
    pub mode: u32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(uint64, tag = "3")]
    pub size: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsCreateRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsCreateResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload_id: Option<Identifier>,
    #[prost(enumeration = "PayloadType", tag = "3")]
    pub payload_type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsDeleteRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload_id: Option<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsDeleteResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsDetailsRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload_id: Option<Identifier>,
}

/// Streamed details: the first response carries identifier, type and
/// metadata; each response may additionally carry one file entry.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsDetailsResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload_id: Option<Identifier>,
    #[prost(enumeration = "PayloadType", tag = "3")]
    pub payload_type: i32,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
    #[prost(message, optional, tag = "5")]
    pub file: Option<PayloadFileDetails>,
}

/// One chunk of an upload. The first request of the stream carries the
/// destination file details; every request carries up to one chunk of data.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsUploadRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload_id: Option<Identifier>,
    #[prost(message, optional, tag = "3")]
    pub details: Option<PayloadFileDetails>,
    #[prost(bytes = "vec", tag = "4")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsUploadResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub details: Option<PayloadFileDetails>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsDownloadRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload_id: Option<Identifier>,
    #[prost(string, tag = "3")]
    pub name: String,
}

/// One chunk of a download. The first response of the stream carries the
/// authoritative file details.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsDownloadResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub details: Option<PayloadFileDetails>,
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsRemoveRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload_id: Option<Identifier>,
    #[prost(string, tag = "3")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsRemoveResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsAddMetadataRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload_id: Option<Identifier>,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsAddMetadataResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsRemoveMetadataRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub payload_id: Option<Identifier>,
    #[prost(string, repeated, tag = "3")]
    pub keys: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PayloadsRemoveMetadataResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}
