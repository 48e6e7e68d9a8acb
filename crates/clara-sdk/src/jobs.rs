// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Client façade for the Jobs service.

use std::collections::HashMap;
use std::sync::Arc;

use clara_protocol::ClaraChannel;
use clara_protocol::jobs_proto;
use clara_protocol::rpc_proto::{rpc_request::Request, rpc_response::Response};
use tracing::instrument;

use crate::config::ClientConfig;
use crate::connection::{ClientConnection, check_header, request_header, unexpected_variant};
use crate::error::{ClaraError, Result};
use crate::ids::{JobId, PayloadId, PipelineId};
use crate::types::{
    JobDetails, JobFilter, JobInfo, JobPriority, JobStartInfo, JobState, JobStatus, JobToken,
};

/// Client for creating, starting, inspecting and cancelling jobs.
///
/// Cheap to create; the underlying QUIC connection is dialed lazily on the
/// first call and reused afterwards.
pub struct JobsClient {
    connection: ClientConnection,
}

impl JobsClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            connection: ClientConnection::new(config)?,
        })
    }

    /// Create a client over an existing channel, sharing its connection.
    pub fn with_channel(channel: Arc<ClaraChannel>, config: &ClientConfig) -> Self {
        Self {
            connection: ClientConnection::with_channel(channel, config),
        }
    }

    /// Close the client. Further calls fail with `InvalidOperation` until
    /// [`reconnect`](Self::reconnect). Idempotent.
    pub async fn close(&self) {
        self.connection.close().await;
    }

    /// Reopen a closed client. Idempotent.
    pub fn reconnect(&self) {
        self.connection.reconnect();
    }

    /// True when the client has not been closed.
    pub fn is_open(&self) -> bool {
        self.connection.is_open()
    }

    /// True when the client is open and holds a live connection.
    pub async fn is_connected(&self) -> bool {
        self.connection.is_connected().await
    }

    /// Create a new job from a pipeline.
    ///
    /// The platform provisions a payload for the job's inputs and outputs.
    /// The returned record carries both identifiers; a freshly created job
    /// is always `Pending` and `Healthy`, so those fields are filled in
    /// without another round trip.
    #[instrument(skip(self, metadata))]
    pub async fn create_job(
        &self,
        name: &str,
        pipeline_id: &PipelineId,
        priority: JobPriority,
        input_payloads: &[PayloadId],
        metadata: HashMap<String, String>,
    ) -> Result<JobInfo> {
        if name.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "job name must not be empty".to_string(),
            ));
        }
        if priority == JobPriority::Unknown {
            return Err(ClaraError::InvalidArgument(
                "job priority must not be Unknown".to_string(),
            ));
        }

        let request = jobs_proto::JobsCreateRequest {
            header: Some(request_header()),
            name: name.to_string(),
            pipeline_id: Some(pipeline_id.to_wire()),
            priority: priority.into(),
            input_payloads: input_payloads.iter().map(|id| id.to_wire()).collect(),
            metadata: metadata.clone(),
        };

        let response = match self.connection.unary(Request::JobsCreate(request)).await? {
            Response::JobsCreate(r) => r,
            _ => return Err(unexpected_variant("jobs create")),
        };
        check_header(response.header.as_ref())?;

        Ok(JobInfo {
            job_id: JobId::from_wire(response.job_id)?,
            pipeline_id: pipeline_id.clone(),
            payload_id: PayloadId::from_wire(response.payload_id)?,
            name: name.to_string(),
            state: JobState::Pending,
            status: JobStatus::Healthy,
            priority,
            created: None,
            started: None,
            stopped: None,
            metadata,
        })
    }

    /// Start a created job, optionally passing name/value variables to the
    /// pipeline.
    #[instrument(skip(self, named_values))]
    pub async fn start_job(
        &self,
        job_id: &JobId,
        named_values: &[(String, String)],
    ) -> Result<JobStartInfo> {
        let request = jobs_proto::JobsStartRequest {
            header: Some(request_header()),
            job_id: Some(job_id.to_wire()),
            named_values: named_values
                .iter()
                .map(|(name, value)| jobs_proto::NamedValue {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
        };

        let response = match self.connection.unary(Request::JobsStart(request)).await? {
            Response::JobsStart(r) => r,
            _ => return Err(unexpected_variant("jobs start")),
        };
        check_header(response.header.as_ref())?;

        Ok(JobStartInfo {
            priority: response.priority.into(),
            state: response.state.into(),
        })
    }

    /// Cancel a job, with an optional human-readable reason.
    #[instrument(skip(self))]
    pub async fn cancel_job(&self, job_id: &JobId, reason: Option<&str>) -> Result<JobToken> {
        let request = jobs_proto::JobsCancelRequest {
            header: Some(request_header()),
            job_id: Some(job_id.to_wire()),
            reason: reason.unwrap_or_default().to_string(),
        };

        let response = match self.connection.unary(Request::JobsCancel(request)).await? {
            Response::JobsCancel(r) => r,
            _ => return Err(unexpected_variant("jobs cancel")),
        };
        check_header(response.header.as_ref())?;

        Ok(JobToken {
            job_id: JobId::from_wire(response.job_id)?,
            state: response.job_state.into(),
            status: response.job_status.into(),
        })
    }

    /// Fetch the full status of a job, including per-operator details.
    #[instrument(skip(self))]
    pub async fn get_status(&self, job_id: &JobId) -> Result<JobDetails> {
        let request = jobs_proto::JobsStatusRequest {
            header: Some(request_header()),
            job_id: Some(job_id.to_wire()),
        };

        let response = match self.connection.unary(Request::JobsStatus(request)).await? {
            Response::JobsStatus(r) => r,
            _ => return Err(unexpected_variant("jobs status")),
        };
        check_header(response.header.as_ref())?;

        JobDetails::from_wire(response)
    }

    /// List jobs matching the filter; an empty filter matches everything.
    #[instrument(skip(self, filter))]
    pub async fn list_jobs(&self, filter: Option<JobFilter>) -> Result<Vec<JobInfo>> {
        let request = jobs_proto::JobsListRequest {
            header: Some(request_header()),
            filter: filter.map(|f| f.to_wire()),
        };

        let mut jobs = Vec::new();
        for inner in self.connection.collect_stream(Request::JobsList(request)).await? {
            let response = match inner {
                Response::JobsList(r) => r,
                _ => return Err(unexpected_variant("jobs list")),
            };
            check_header(response.header.as_ref())?;
            // Servers pad listings with placeholder entries; only entries
            // with a real job identifier are results.
            if response.job_id.as_ref().is_none_or(|id| id.value.is_empty()) {
                continue;
            }
            jobs.push(JobInfo::from_wire(response)?);
        }
        Ok(jobs)
    }

    /// Read the log lines an operator of the job has produced so far.
    #[instrument(skip(self))]
    pub async fn read_logs(&self, job_id: &JobId, operator_name: &str) -> Result<Vec<String>> {
        if operator_name.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "operator name must not be empty".to_string(),
            ));
        }

        let request = jobs_proto::JobsReadLogsRequest {
            header: Some(request_header()),
            job_id: Some(job_id.to_wire()),
            operator_name: operator_name.to_string(),
        };

        let mut logs = Vec::new();
        for inner in self
            .connection
            .collect_stream(Request::JobsReadLogs(request))
            .await?
        {
            let response = match inner {
                Response::JobsReadLogs(r) => r,
                _ => return Err(unexpected_variant("jobs read logs")),
            };
            check_header(response.header.as_ref())?;
            logs.extend(response.logs);
        }
        Ok(logs)
    }

    /// Add metadata to a job, returning the merged metadata set.
    #[instrument(skip(self, metadata))]
    pub async fn add_metadata(
        &self,
        job_id: &JobId,
        metadata: HashMap<String, String>,
    ) -> Result<HashMap<String, String>> {
        if metadata.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "metadata must not be empty".to_string(),
            ));
        }

        let request = jobs_proto::JobsAddMetadataRequest {
            header: Some(request_header()),
            job_id: Some(job_id.to_wire()),
            metadata,
        };

        let response = match self
            .connection
            .unary(Request::JobsAddMetadata(request))
            .await?
        {
            Response::JobsAddMetadata(r) => r,
            _ => return Err(unexpected_variant("jobs add metadata")),
        };
        check_header(response.header.as_ref())?;

        Ok(response.metadata)
    }

    /// Remove metadata keys from a job, returning the remaining metadata set.
    #[instrument(skip(self, keys))]
    pub async fn remove_metadata(
        &self,
        job_id: &JobId,
        keys: &[String],
    ) -> Result<HashMap<String, String>> {
        if keys.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "metadata keys must not be empty".to_string(),
            ));
        }

        let request = jobs_proto::JobsRemoveMetadataRequest {
            header: Some(request_header()),
            job_id: Some(job_id.to_wire()),
            keys: keys.to_vec(),
        };

        let response = match self
            .connection
            .unary(Request::JobsRemoveMetadata(request))
            .await?
        {
            Response::JobsRemoveMetadata(r) => r,
            _ => return Err(unexpected_variant("jobs remove metadata")),
        };
        check_header(response.header.as_ref())?;

        Ok(response.metadata)
    }
}
