// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Messages for the Pipelines service.
//!
//! Pipeline creation and update are client-streaming: the client sends one
//! request per definition file, then the server replies with a single
//! aggregate response.

use std::collections::HashMap;

use crate::common_proto::{Identifier, RequestHeader, ResponseHeader};

/// One pipeline definition file: a logical path plus its text content.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelineDefinitionFile {
    #[prost(string, tag = "1")]
    pub path: String,
    #[prost(string, tag = "2")]
    pub content: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesCreateRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub definition: Option<PipelineDefinitionFile>,
    /// Populated on the first request of the stream only.
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesCreateResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub pipeline_id: Option<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesListRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
}

/// One list result; the server streams one response per pipeline.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesListResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub pipeline_id: Option<Identifier>,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesDetailsRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub pipeline_id: Option<Identifier>,
}

/// Streamed details: the first response carries identifier, name and
/// metadata; each response may additionally carry one definition file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesDetailsResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub pipeline_id: Option<Identifier>,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: HashMap<String, String>,
    #[prost(message, optional, tag = "5")]
    pub definition: Option<PipelineDefinitionFile>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesRemoveRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub pipeline_id: Option<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesRemoveResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesUpdateRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub pipeline_id: Option<Identifier>,
    #[prost(message, optional, tag = "3")]
    pub definition: Option<PipelineDefinitionFile>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesUpdateResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesAddMetadataRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub pipeline_id: Option<Identifier>,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesAddMetadataResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesRemoveMetadataRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub pipeline_id: Option<Identifier>,
    #[prost(string, repeated, tag = "3")]
    pub keys: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PipelinesRemoveMetadataResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}
