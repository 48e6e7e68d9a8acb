// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Messages for the Models service.
//!
//! Models are uploaded and downloaded in chunks like payload blobs.
//! Catalogs and instances are ordered groupings of models; reading either
//! one streams the member model details.

use std::collections::HashMap;

use crate::common_proto::{Identifier, RequestHeader, ResponseHeader};

/// Inference framework a model targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ModelType {
    Unknown = 0,
    TensorFlow = 1,
    TensorRt = 2,
    PyTorch = 3,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelDetails {
    #[prost(message, optional, tag = "1")]
    pub model_id: Option<Identifier>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(enumeration = "ModelType", tag = "3")]
    pub model_type: i32,
    #[prost(map = "string, string", tag = "4")]
    pub tags: HashMap<String, String>,
    #[prost(map = "string, string", tag = "5")]
    pub metadata: HashMap<String, String>,
}

/// One chunk of a model upload. The first request of the stream carries
/// the model details; every request carries up to one chunk of data.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsUploadRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub details: Option<ModelDetails>,
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsUploadResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub details: Option<ModelDetails>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsDownloadRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub model_id: Option<Identifier>,
}

/// One chunk of a model download. The first response of the stream carries
/// the authoritative model details.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsDownloadResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub details: Option<ModelDetails>,
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsListRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
}

/// One list result; the server streams one response per model.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsListResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub details: Option<ModelDetails>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsDeleteRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub model_id: Option<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsDeleteResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsCreateCatalogRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsCreateCatalogResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub catalog_id: Option<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsDeleteCatalogRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub catalog_id: Option<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsDeleteCatalogResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsReadCatalogRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub catalog_id: Option<Identifier>,
}

/// One catalog member; the server streams members in catalog order.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsReadCatalogResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub details: Option<ModelDetails>,
}

/// Replaces the catalog's member list wholesale.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsUpdateCatalogRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub catalog_id: Option<Identifier>,
    #[prost(message, repeated, tag = "3")]
    pub model_ids: Vec<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsUpdateCatalogResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsCreateInstanceRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsCreateInstanceResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub instance_id: Option<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsDeleteInstanceRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub instance_id: Option<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsDeleteInstanceResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsReadInstanceRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub instance_id: Option<Identifier>,
}

/// One instance member; the server streams members in instance order.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsReadInstanceResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub details: Option<ModelDetails>,
}

/// Replaces the instance's member list wholesale.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsUpdateInstanceRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub instance_id: Option<Identifier>,
    #[prost(message, repeated, tag = "3")]
    pub model_ids: Vec<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsUpdateInstanceResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsAddMetadataRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub model_id: Option<Identifier>,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsAddMetadataResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsRemoveMetadataRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub model_id: Option<Identifier>,
    #[prost(string, repeated, tag = "3")]
    pub keys: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelsRemoveMetadataResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}
