// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Messages for platform-level operations: shutdown and GPU utilization.

use crate::common_proto::{Identifier, RequestHeader, ResponseHeader};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StopRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StopResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UtilizationRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    /// When true the server keeps streaming snapshots; when false it sends
    /// a single snapshot and finishes the stream.
    #[prost(bool, tag = "2")]
    pub watch: bool,
}

/// A process currently using a GPU, with the job it belongs to if any.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProcessDetails {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
}

/// Utilization figures for a single GPU at one sample instant.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GpuUtilization {
    #[prost(uint32, tag = "1")]
    pub node_id: u32,
    #[prost(string, tag = "2")]
    pub pcie_id: String,
    #[prost(float, tag = "3")]
    pub compute_utilization: f32,
    #[prost(uint64, tag = "4")]
    pub memory_free: u64,
    #[prost(uint64, tag = "5")]
    pub memory_used: u64,
    #[prost(float, tag = "6")]
    pub memory_utilization: f32,
    #[prost(string, tag = "7")]
    pub timestamp: String,
    #[prost(message, repeated, tag = "8")]
    pub process_details: Vec<ProcessDetails>,
}

/// One utilization snapshot covering every GPU the platform can see.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UtilizationResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, repeated, tag = "2")]
    pub gpu_metrics: Vec<GpuUtilization>,
}
