// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Domain types returned and accepted by the client façades.
//!
//! These mirror the wire messages but use strongly-typed identifiers,
//! decoded timestamps and real enums, so callers never handle raw `i32`
//! discriminants or year-one second counts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use clara_protocol::{jobs_proto, models_proto, payloads_proto, pipelines_proto, platform_proto};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{JobId, ModelId, PayloadId, PipelineId};
use crate::timestamp::{decode_timestamp, to_year_one_seconds};

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    Unknown,
    Pending,
    Running,
    Stopped,
}

impl From<i32> for JobState {
    fn from(value: i32) -> Self {
        match value {
            1 => JobState::Pending,
            2 => JobState::Running,
            3 => JobState::Stopped,
            _ => JobState::Unknown,
        }
    }
}

impl From<JobState> for i32 {
    fn from(value: JobState) -> Self {
        match value {
            JobState::Unknown => 0,
            JobState::Pending => 1,
            JobState::Running => 2,
            JobState::Stopped => 3,
        }
    }
}

/// Health status of a job, orthogonal to its lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Unknown,
    Healthy,
    Faulted,
    Canceled,
    Evicted,
    Terminated,
}

impl From<i32> for JobStatus {
    fn from(value: i32) -> Self {
        match value {
            1 => JobStatus::Healthy,
            2 => JobStatus::Faulted,
            3 => JobStatus::Canceled,
            4 => JobStatus::Evicted,
            5 => JobStatus::Terminated,
            _ => JobStatus::Unknown,
        }
    }
}

impl From<JobStatus> for i32 {
    fn from(value: JobStatus) -> Self {
        match value {
            JobStatus::Unknown => 0,
            JobStatus::Healthy => 1,
            JobStatus::Faulted => 2,
            JobStatus::Canceled => 3,
            JobStatus::Evicted => 4,
            JobStatus::Terminated => 5,
        }
    }
}

/// Scheduling priority of a job. `Unknown` is never a valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobPriority {
    Unknown,
    Lower,
    Normal,
    Higher,
    Immediate,
}

impl From<i32> for JobPriority {
    fn from(value: i32) -> Self {
        match value {
            1 => JobPriority::Lower,
            2 => JobPriority::Normal,
            3 => JobPriority::Higher,
            4 => JobPriority::Immediate,
            _ => JobPriority::Unknown,
        }
    }
}

impl From<JobPriority> for i32 {
    fn from(value: JobPriority) -> Self {
        match value {
            JobPriority::Unknown => 0,
            JobPriority::Lower => 1,
            JobPriority::Normal => 2,
            JobPriority::Higher => 3,
            JobPriority::Immediate => 4,
        }
    }
}

/// Execution status of a single pipeline operator within a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobOperatorStatus {
    Unknown,
    Pending,
    Running,
    Completed,
    Faulted,
}

impl From<i32> for JobOperatorStatus {
    fn from(value: i32) -> Self {
        match value {
            1 => JobOperatorStatus::Pending,
            2 => JobOperatorStatus::Running,
            3 => JobOperatorStatus::Completed,
            4 => JobOperatorStatus::Faulted,
            _ => JobOperatorStatus::Unknown,
        }
    }
}

/// Origin of a payload: created alongside a job or reusable across jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadType {
    Unknown,
    Pipeline,
    Reusable,
}

impl From<i32> for PayloadType {
    fn from(value: i32) -> Self {
        match value {
            1 => PayloadType::Pipeline,
            2 => PayloadType::Reusable,
            _ => PayloadType::Unknown,
        }
    }
}

/// Inference framework a model targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    Unknown,
    TensorFlow,
    TensorRt,
    PyTorch,
}

impl From<i32> for ModelType {
    fn from(value: i32) -> Self {
        match value {
            1 => ModelType::TensorFlow,
            2 => ModelType::TensorRt,
            3 => ModelType::PyTorch,
            _ => ModelType::Unknown,
        }
    }
}

impl From<ModelType> for i32 {
    fn from(value: ModelType) -> Self {
        match value {
            ModelType::Unknown => 0,
            ModelType::TensorFlow => 1,
            ModelType::TensorRt => 2,
            ModelType::PyTorch => 3,
        }
    }
}

/// Outcome of starting a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStartInfo {
    pub priority: JobPriority,
    pub state: JobState,
}

/// Outcome of cancelling a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobToken {
    pub job_id: JobId,
    pub state: JobState,
    pub status: JobStatus,
}

/// Per-operator execution record within a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOperatorDetails {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
    pub started: Option<DateTime<Utc>>,
    pub stopped: Option<DateTime<Utc>>,
    pub status: JobOperatorStatus,
}

impl JobOperatorDetails {
    pub(crate) fn from_wire(wire: jobs_proto::JobOperatorDetails) -> Self {
        Self {
            name: wire.name,
            created: decode_timestamp(&wire.created),
            started: decode_timestamp(&wire.started),
            stopped: decode_timestamp(&wire.stopped),
            status: wire.status.into(),
        }
    }
}

/// Full status of a job, including its per-operator breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    pub job_id: JobId,
    pub pipeline_id: PipelineId,
    pub payload_id: PayloadId,
    pub name: String,
    pub state: JobState,
    pub status: JobStatus,
    pub priority: JobPriority,
    pub created: Option<DateTime<Utc>>,
    pub started: Option<DateTime<Utc>>,
    pub stopped: Option<DateTime<Utc>>,
    pub metadata: HashMap<String, String>,
    pub operator_details: Vec<JobOperatorDetails>,
    pub messages: Vec<String>,
}

impl JobDetails {
    pub(crate) fn from_wire(wire: jobs_proto::JobsStatusResponse) -> Result<Self> {
        Ok(Self {
            job_id: JobId::from_wire(wire.job_id)?,
            pipeline_id: PipelineId::from_wire(wire.pipeline_id)?,
            payload_id: PayloadId::from_wire(wire.payload_id)?,
            name: wire.name,
            state: wire.state.into(),
            status: wire.status.into(),
            priority: wire.priority.into(),
            created: decode_timestamp(&wire.created),
            started: decode_timestamp(&wire.started),
            stopped: decode_timestamp(&wire.stopped),
            metadata: wire.metadata,
            operator_details: wire
                .operator_details
                .into_iter()
                .map(JobOperatorDetails::from_wire)
                .collect(),
            messages: wire.messages,
        })
    }
}

/// One entry of a job listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    pub job_id: JobId,
    pub pipeline_id: PipelineId,
    pub payload_id: PayloadId,
    pub name: String,
    pub state: JobState,
    pub status: JobStatus,
    pub priority: JobPriority,
    pub created: Option<DateTime<Utc>>,
    pub started: Option<DateTime<Utc>>,
    pub stopped: Option<DateTime<Utc>>,
    pub metadata: HashMap<String, String>,
}

impl JobInfo {
    pub(crate) fn from_wire(wire: jobs_proto::JobsListResponse) -> Result<Self> {
        Ok(Self {
            job_id: JobId::from_wire(wire.job_id)?,
            pipeline_id: PipelineId::from_wire(wire.pipeline_id)?,
            payload_id: PayloadId::from_wire(wire.payload_id)?,
            name: wire.name,
            state: wire.state.into(),
            status: wire.status.into(),
            priority: wire.priority.into(),
            created: decode_timestamp(&wire.created),
            started: decode_timestamp(&wire.started),
            stopped: decode_timestamp(&wire.stopped),
            metadata: wire.metadata,
        })
    }
}

/// Search criteria for listing jobs. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub completed_before: Option<DateTime<Utc>>,
    pub created_after: Option<DateTime<Utc>>,
    pub states: Vec<JobState>,
    pub statuses: Vec<JobStatus>,
    pub pipeline_ids: Vec<PipelineId>,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match only jobs that completed before the given instant.
    pub fn completed_before(mut self, instant: DateTime<Utc>) -> Self {
        self.completed_before = Some(instant);
        self
    }

    /// Match only jobs created after the given instant.
    pub fn created_after(mut self, instant: DateTime<Utc>) -> Self {
        self.created_after = Some(instant);
        self
    }

    /// Match only jobs in one of the given states.
    pub fn with_state(mut self, state: JobState) -> Self {
        self.states.push(state);
        self
    }

    /// Match only jobs with one of the given statuses.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.statuses.push(status);
        self
    }

    /// Match only jobs belonging to one of the given pipelines.
    pub fn with_pipeline(mut self, pipeline_id: PipelineId) -> Self {
        self.pipeline_ids.push(pipeline_id);
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.completed_before.is_none()
            && self.created_after.is_none()
            && self.states.is_empty()
            && self.statuses.is_empty()
            && self.pipeline_ids.is_empty()
    }

    pub(crate) fn to_wire(&self) -> jobs_proto::JobFilter {
        jobs_proto::JobFilter {
            completed_before: self.completed_before.map(to_year_one_seconds).unwrap_or(0),
            created_after: self.created_after.map(to_year_one_seconds).unwrap_or(0),
            has_job_state: self.states.iter().map(|s| i32::from(*s)).collect(),
            has_job_status: self.statuses.iter().map(|s| i32::from(*s)).collect(),
            pipeline_ids: self.pipeline_ids.iter().map(|id| id.to_wire()).collect(),
        }
    }
}

/// One pipeline definition file: a logical name plus its text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    pub name: String,
    pub content: String,
}

impl PipelineDefinition {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub(crate) fn to_wire(&self) -> pipelines_proto::PipelineDefinitionFile {
        pipelines_proto::PipelineDefinitionFile {
            path: self.name.clone(),
            content: self.content.clone(),
        }
    }

    pub(crate) fn from_wire(wire: pipelines_proto::PipelineDefinitionFile) -> Self {
        Self {
            name: wire.path,
            content: wire.content,
        }
    }
}

/// One entry of a pipeline listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub pipeline_id: PipelineId,
    pub name: String,
    pub metadata: HashMap<String, String>,
}

impl PipelineInfo {
    pub(crate) fn from_wire(wire: pipelines_proto::PipelinesListResponse) -> Result<Self> {
        Ok(Self {
            pipeline_id: PipelineId::from_wire(wire.pipeline_id)?,
            name: wire.name,
            metadata: wire.metadata,
        })
    }
}

/// Full details of a pipeline, including every definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDetails {
    pub pipeline_id: PipelineId,
    pub name: String,
    pub metadata: HashMap<String, String>,
    pub definitions: Vec<PipelineDefinition>,
}

/// Metadata of one blob within a payload. `name` is a slash-separated path
/// relative to the payload root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayloadFileDetails {
    pub mode: u32,
    pub name: String,
    pub size: u64,
}

impl PayloadFileDetails {
    pub(crate) fn to_wire(&self) -> payloads_proto::PayloadFileDetails {
        payloads_proto::PayloadFileDetails {
            mode: self.mode,
            name: self.name.clone(),
            size: self.size,
        }
    }

    pub(crate) fn from_wire(wire: payloads_proto::PayloadFileDetails) -> Self {
        Self {
            mode: wire.mode,
            name: wire.name,
            size: wire.size,
        }
    }
}

/// Full details of a payload, including its blob inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadDetails {
    pub payload_id: PayloadId,
    pub payload_type: PayloadType,
    pub metadata: HashMap<String, String>,
    pub files: Vec<PayloadFileDetails>,
}

/// Descriptive record of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    pub model_id: Option<ModelId>,
    pub name: String,
    pub model_type: ModelType,
    pub tags: HashMap<String, String>,
    pub metadata: HashMap<String, String>,
}

impl ModelDetails {
    pub(crate) fn to_wire(&self) -> models_proto::ModelDetails {
        models_proto::ModelDetails {
            model_id: self.model_id.as_ref().map(|id| id.to_wire()),
            name: self.name.clone(),
            model_type: i32::from(self.model_type),
            tags: self.tags.clone(),
            metadata: self.metadata.clone(),
        }
    }

    pub(crate) fn from_wire(wire: models_proto::ModelDetails) -> Self {
        Self {
            model_id: wire
                .model_id
                .and_then(|id| ModelId::new(id.value).ok()),
            name: wire.name,
            model_type: wire.model_type.into(),
            tags: wire.tags,
            metadata: wire.metadata,
        }
    }
}

/// A process currently using a GPU, with the job it belongs to if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDetails {
    pub name: String,
    pub job_id: Option<JobId>,
}

/// Utilization figures for a single GPU at one sample instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuUtilization {
    pub node_id: u32,
    pub pcie_id: String,
    pub compute_utilization: f32,
    pub memory_free: u64,
    pub memory_used: u64,
    pub memory_utilization: f32,
    pub timestamp: Option<DateTime<Utc>>,
    pub process_details: Vec<ProcessDetails>,
}

impl GpuUtilization {
    pub(crate) fn from_wire(wire: platform_proto::GpuUtilization) -> Self {
        Self {
            node_id: wire.node_id,
            pcie_id: wire.pcie_id,
            compute_utilization: wire.compute_utilization,
            memory_free: wire.memory_free,
            memory_used: wire.memory_used,
            memory_utilization: wire.memory_utilization,
            timestamp: decode_timestamp(&wire.timestamp),
            process_details: wire
                .process_details
                .into_iter()
                .map(|p| ProcessDetails {
                    name: p.name,
                    job_id: p.job_id.and_then(|id| JobId::new(id.value).ok()),
                })
                .collect(),
        }
    }
}
