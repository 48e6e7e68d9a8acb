// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Clara SDK - client library for the Clara pipeline-execution platform.
//!
//! The platform runs registered pipelines as jobs over payloads of input
//! data, with optional model catalogs for inference operators. This crate
//! wraps the QUIC wire protocol (see `clara-protocol`) behind four typed
//! resource façades plus an aggregate client:
//!
//! - [`JobsClient`]: create, start, inspect and cancel jobs
//! - [`PipelinesClient`]: register and manage pipeline definitions
//! - [`PayloadsClient`]: move blob content in and out of payloads
//! - [`ModelsClient`]: upload models, manage catalogs and instances
//! - [`ClaraClient`]: all four sharing one connection, plus platform
//!   operations (shutdown, GPU utilization)
//!
//! # Example
//!
//! ```ignore
//! use clara_sdk::{ClaraClient, ClientConfig, JobPriority};
//!
//! let config = ClientConfig::for_target("clara.example.com", Some(50051))?;
//! let client = ClaraClient::new(&config)?;
//!
//! let pipelines = client.pipelines().list_pipelines().await?;
//! let handle = client
//!     .jobs()
//!     .create_job(
//!         "liver segmentation",
//!         &pipelines[0].pipeline_id,
//!         JobPriority::Normal,
//!         &[],
//!         Default::default(),
//!     )
//!     .await?;
//! client.jobs().start_job(&handle.job_id, &[]).await?;
//! ```
//!
//! Clients connect lazily: the QUIC connection is dialed on the first call
//! and reused until [`close`](ClaraClient::close) or drop.

pub mod clara;
pub mod config;
pub mod error;
pub mod ids;
pub mod jobs;
pub mod models;
pub mod payloads;
pub mod pipelines;
pub mod timestamp;
pub mod transfer;
pub mod types;

mod connection;

pub use clara::ClaraClient;
pub use config::ClientConfig;
pub use error::{ClaraError, Result};
pub use ids::{CatalogId, InstanceId, JobId, ModelId, PayloadId, PipelineId};
pub use jobs::JobsClient;
pub use models::ModelsClient;
pub use payloads::PayloadsClient;
pub use pipelines::PipelinesClient;
pub use timestamp::decode_timestamp;
pub use transfer::CHUNK_SIZE;
pub use types::{
    GpuUtilization, JobDetails, JobFilter, JobInfo, JobOperatorDetails,
    JobOperatorStatus, JobPriority, JobStartInfo, JobState, JobStatus, JobToken, ModelDetails,
    ModelType, PayloadDetails, PayloadFileDetails, PayloadType, PipelineDefinition,
    PipelineDetails, PipelineInfo, ProcessDetails,
};
