// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Client façade for the Pipelines service.

use std::collections::HashMap;
use std::sync::Arc;

use clara_protocol::ClaraChannel;
use clara_protocol::pipelines_proto;
use clara_protocol::rpc_proto::{rpc_request::Request, rpc_response::Response};
use tracing::instrument;

use crate::config::ClientConfig;
use crate::connection::{ClientConnection, check_header, request_header, unexpected_variant};
use crate::error::{ClaraError, Result};
use crate::ids::PipelineId;
use crate::types::{PipelineDefinition, PipelineDetails, PipelineInfo};

/// Client for registering and managing pipelines.
pub struct PipelinesClient {
    connection: ClientConnection,
}

impl PipelinesClient {
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

    fn validate_definitions(definitions: &[PipelineDefinition]) -> Result<()> {
        if definitions.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "at least one pipeline definition is required".to_string(),
            ));
        }
        for definition in definitions {
            if definition.content.is_empty() {
                return Err(ClaraError::InvalidArgument(format!(
                    "pipeline definition {} has no content",
                    definition.name
                )));
            }
        }
        Ok(())
    }

    /// Register a new pipeline from its definition files.
    ///
    /// One request is streamed per definition file; metadata rides on the
    /// first request only.
    #[instrument(skip(self, definitions, metadata))]
    pub async fn create_pipeline(
        &self,
        definitions: &[PipelineDefinition],
        metadata: HashMap<String, String>,
    ) -> Result<PipelineId> {
        Self::validate_definitions(definitions)?;

        let mut metadata = Some(metadata);
        let requests = definitions
            .iter()
            .map(|definition| {
                Request::PipelinesCreate(pipelines_proto::PipelinesCreateRequest {
                    header: Some(request_header()),
                    definition: Some(definition.to_wire()),
                    metadata: metadata.take().unwrap_or_default(),
                })
            })
            .collect();

        let response = match self.connection.send_stream(requests).await? {
            Response::PipelinesCreate(r) => r,
            _ => return Err(unexpected_variant("pipelines create")),
        };
        check_header(response.header.as_ref())?;

        PipelineId::from_wire(response.pipeline_id)
    }

    /// List all registered pipelines.
    #[instrument(skip(self))]
    pub async fn list_pipelines(&self) -> Result<Vec<PipelineInfo>> {
        let request = pipelines_proto::PipelinesListRequest {
            header: Some(request_header()),
        };

        let mut pipelines = Vec::new();
        for inner in self
            .connection
            .collect_stream(Request::PipelinesList(request))
            .await?
        {
            let response = match inner {
                Response::PipelinesList(r) => r,
                _ => return Err(unexpected_variant("pipelines list")),
            };
            check_header(response.header.as_ref())?;
            pipelines.push(PipelineInfo::from_wire(response)?);
        }
        Ok(pipelines)
    }

    /// Fetch a pipeline's details, including its definition files.
    ///
    /// Returns `None` when the platform knows no such pipeline.
    #[instrument(skip(self))]
    pub async fn get_details(&self, pipeline_id: &PipelineId) -> Result<Option<PipelineDetails>> {
        let request = pipelines_proto::PipelinesDetailsRequest {
            header: Some(request_header()),
            pipeline_id: Some(pipeline_id.to_wire()),
        };

        let mut details: Option<PipelineDetails> = None;
        for inner in self
            .connection
            .collect_stream(Request::PipelinesDetails(request))
            .await?
        {
            let response = match inner {
                Response::PipelinesDetails(r) => r,
                _ => return Err(unexpected_variant("pipelines details")),
            };
            check_header(response.header.as_ref())?;

            if details.is_none() {
                details = Some(PipelineDetails {
                    pipeline_id: PipelineId::from_wire(response.pipeline_id.clone())?,
                    name: response.name.clone(),
                    metadata: response.metadata.clone(),
                    definitions: Vec::new(),
                });
            }
            if let Some(record) = details.as_mut()
                && let Some(definition) = response.definition
            {
                record.definitions.push(PipelineDefinition::from_wire(definition));
            }
        }
        Ok(details)
    }

    /// Replace a pipeline's definition files.
    #[instrument(skip(self, definitions))]
    pub async fn update_pipeline(
        &self,
        pipeline_id: &PipelineId,
        definitions: &[PipelineDefinition],
    ) -> Result<()> {
        Self::validate_definitions(definitions)?;

        let requests = definitions
            .iter()
            .map(|definition| {
                Request::PipelinesUpdate(pipelines_proto::PipelinesUpdateRequest {
                    header: Some(request_header()),
                    pipeline_id: Some(pipeline_id.to_wire()),
                    definition: Some(definition.to_wire()),
                })
            })
            .collect();

        let response = match self.connection.send_stream(requests).await? {
            Response::PipelinesUpdate(r) => r,
            _ => return Err(unexpected_variant("pipelines update")),
        };
        check_header(response.header.as_ref())
    }

    /// Remove a pipeline from the platform.
    #[instrument(skip(self))]
    pub async fn remove_pipeline(&self, pipeline_id: &PipelineId) -> Result<()> {
        let request = pipelines_proto::PipelinesRemoveRequest {
            header: Some(request_header()),
            pipeline_id: Some(pipeline_id.to_wire()),
        };

        let response = match self
            .connection
            .unary(Request::PipelinesRemove(request))
            .await?
        {
            Response::PipelinesRemove(r) => r,
            _ => return Err(unexpected_variant("pipelines remove")),
        };
        check_header(response.header.as_ref())
    }

    /// Add metadata to a pipeline, returning the merged metadata set.
    #[instrument(skip(self, metadata))]
    pub async fn add_metadata(
        &self,
        pipeline_id: &PipelineId,
        metadata: HashMap<String, String>,
    ) -> Result<HashMap<String, String>> {
        if metadata.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "metadata must not be empty".to_string(),
            ));
        }

        let request = pipelines_proto::PipelinesAddMetadataRequest {
            header: Some(request_header()),
            pipeline_id: Some(pipeline_id.to_wire()),
            metadata,
        };

        let response = match self
            .connection
            .unary(Request::PipelinesAddMetadata(request))
            .await?
        {
            Response::PipelinesAddMetadata(r) => r,
            _ => return Err(unexpected_variant("pipelines add metadata")),
        };
        check_header(response.header.as_ref())?;

        Ok(response.metadata)
    }

    /// Remove metadata keys from a pipeline, returning the remaining set.
    #[instrument(skip(self, keys))]
    pub async fn remove_metadata(
        &self,
        pipeline_id: &PipelineId,
        keys: &[String],
    ) -> Result<HashMap<String, String>> {
        if keys.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "metadata keys must not be empty".to_string(),
            ));
        }

        let request = pipelines_proto::PipelinesRemoveMetadataRequest {
            header: Some(request_header()),
            pipeline_id: Some(pipeline_id.to_wire()),
            keys: keys.to_vec(),
        };

        let response = match self
            .connection
            .unary(Request::PipelinesRemoveMetadata(request))
            .await?
        {
            Response::PipelinesRemoveMetadata(r) => r,
            _ => return Err(unexpected_variant("pipelines remove metadata")),
        };
        check_header(response.header.as_ref())?;

        Ok(response.metadata)
    }
}
