// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Messages for the Jobs service.

use std::collections::HashMap;

use crate::common_proto::{Identifier, RequestHeader, ResponseHeader};

/// Lifecycle state of a job, owned by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum JobState {
    Unknown = 0,
    Pending = 1,
    Running = 2,
    Stopped = 3,
}

/// Health status of a job, orthogonal to its lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum JobStatus {
    Unknown = 0,
    Healthy = 1,
    Faulted = 2,
    Canceled = 3,
    Evicted = 4,
    Terminated = 5,
}

/// Scheduling priority of a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum JobPriority {
    Unknown = 0,
    Lower = 1,
    Normal = 2,
    Higher = 3,
    Immediate = 4,
}

/// Execution status of a single pipeline operator within a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum JobOperatorStatus {
    Unknown = 0,
    Pending = 1,
    Running = 2,
    Completed = 3,
    Faulted = 4,
}

/// Name/value pair supplied to a job at start time.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NamedValue {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsCreateRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(message, optional, tag = "3")]
    pub pipeline_id: Option<Identifier>,
    #[prost(enumeration = "JobPriority", tag = "4")]
    pub priority: i32,
    #[prost(message, repeated, tag = "5")]
    pub input_payloads: Vec<Identifier>,
    #[prost(map = "string, string", tag = "6")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsCreateResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
    #[prost(message, optional, tag = "3")]
    pub payload_id: Option<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsStartRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
    #[prost(message, repeated, tag = "3")]
    pub named_values: Vec<NamedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsStartResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(enumeration = "JobPriority", tag = "2")]
    pub priority: i32,
    #[prost(enumeration = "JobState", tag = "3")]
    pub state: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsCancelRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
    #[prost(string, tag = "3")]
    pub reason: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsCancelResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
    #[prost(enumeration = "JobState", tag = "3")]
    pub job_state: i32,
    #[prost(enumeration = "JobStatus", tag = "4")]
    pub job_status: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsStatusRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
}

/// Per-operator execution record within a status response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobOperatorDetails {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub created: String,
    #[prost(string, tag = "3")]
    pub started: String,
    #[prost(string, tag = "4")]
    pub stopped: String,
    #[prost(enumeration = "JobOperatorStatus", tag = "5")]
    pub status: i32,
}

/// Timestamps are transported as strings: either decimal seconds since
/// year 1 or a pre-formatted `YYYY-MM-DD HH:MM:SSZ` literal, depending on
/// the server version.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsStatusResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(message, optional, tag = "3")]
    pub job_id: Option<Identifier>,
    #[prost(message, optional, tag = "4")]
    pub pipeline_id: Option<Identifier>,
    #[prost(message, optional, tag = "5")]
    pub payload_id: Option<Identifier>,
    #[prost(enumeration = "JobState", tag = "6")]
    pub state: i32,
    #[prost(enumeration = "JobStatus", tag = "7")]
    pub status: i32,
    #[prost(enumeration = "JobPriority", tag = "8")]
    pub priority: i32,
    #[prost(string, tag = "9")]
    pub created: String,
    #[prost(string, tag = "10")]
    pub started: String,
    #[prost(string, tag = "11")]
    pub stopped: String,
    #[prost(map = "string, string", tag = "12")]
    pub metadata: HashMap<String, String>,
    #[prost(message, repeated, tag = "13")]
    pub operator_details: Vec<JobOperatorDetails>,
    #[prost(string, repeated, tag = "14")]
    pub messages: Vec<String>,
}

/// Search criteria for a list request. Zero-valued timestamp fields mean
/// "no bound"; timestamps here are seconds since year 1.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobFilter {
    #[prost(int64, tag = "1")]
    pub completed_before: i64,
    #[prost(int64, tag = "2")]
    pub created_after: i64,
    #[prost(enumeration = "JobState", repeated, tag = "3")]
    pub has_job_state: Vec<i32>,
    #[prost(enumeration = "JobStatus", repeated, tag = "4")]
    pub has_job_status: Vec<i32>,
    #[prost(message, repeated, tag = "5")]
    pub pipeline_ids: Vec<Identifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsListRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub filter: Option<JobFilter>,
}

/// One list result; the server streams one response per matching job.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsListResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
    #[prost(message, optional, tag = "3")]
    pub pipeline_id: Option<Identifier>,
    #[prost(message, optional, tag = "4")]
    pub payload_id: Option<Identifier>,
    #[prost(string, tag = "5")]
    pub name: String,
    #[prost(enumeration = "JobState", tag = "6")]
    pub state: i32,
    #[prost(enumeration = "JobStatus", tag = "7")]
    pub status: i32,
    #[prost(enumeration = "JobPriority", tag = "8")]
    pub priority: i32,
    #[prost(string, tag = "9")]
    pub created: String,
    #[prost(string, tag = "10")]
    pub started: String,
    #[prost(string, tag = "11")]
    pub stopped: String,
    #[prost(map = "string, string", tag = "12")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsReadLogsRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
    #[prost(string, tag = "3")]
    pub operator_name: String,
}

/// One batch of log lines; the server streams batches in order.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsReadLogsResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(string, repeated, tag = "2")]
    pub logs: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsAddMetadataRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsAddMetadataResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsRemoveMetadataRequest {
    #[prost(message, optional, tag = "1")]
    pub header: Option<RequestHeader>,
    #[prost(message, optional, tag = "2")]
    pub job_id: Option<Identifier>,
    #[prost(string, repeated, tag = "3")]
    pub keys: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JobsRemoveMetadataResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: HashMap<String, String>,
}
