// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Client façade for the Models service.
//!
//! Model content moves in bounded chunks like payload blobs. Catalogs and
//! instances are ordered groupings of models; reading either streams the
//! member details back.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use clara_protocol::ClaraChannel;
use clara_protocol::frame::{self, Frame};
use clara_protocol::models_proto;
use clara_protocol::rpc_proto::{RpcRequest, RpcResponse, rpc_request::Request, rpc_response::Response};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::instrument;

use crate::config::ClientConfig;
use crate::connection::{ClientConnection, check_header, request_header, unexpected_variant};
use crate::error::{ClaraError, Result};
use crate::ids::{CatalogId, InstanceId, ModelId};
use crate::transfer;
use crate::types::{ModelDetails, ModelType};

/// Client for uploading models and managing catalogs and instances.
pub struct ModelsClient {
    connection: ClientConnection,
}

impl ModelsClient {
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

    /// Upload a model, reading its serialized content from `source`.
    ///
    /// The given details describe the model; the server assigns the
    /// identifier and returns the authoritative details.
    #[instrument(skip(self, details, source))]
    pub async fn upload_model<R>(
        &self,
        details: &ModelDetails,
        mut source: R,
    ) -> Result<ModelDetails>
    where
        R: AsyncRead + Unpin,
    {
        if details.name.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "model name must not be empty".to_string(),
            ));
        }
        if details.model_type == ModelType::Unknown {
            return Err(ClaraError::InvalidArgument(
                "model type must not be Unknown".to_string(),
            ));
        }

        let (mut send, mut recv) = self.connection.open_raw().await?;
        self.connection
            .timed_transfer(async {
                let mut first = true;
                let wire_details = details.to_wire();
                let (_bytes, _chunks) = transfer::send_chunks(&mut send, &mut source, |data| {
                    let message_details = if first {
                        first = false;
                        Some(wire_details.clone())
                    } else {
                        None
                    };
                    RpcRequest {
                        request: Some(Request::ModelsUpload(models_proto::ModelsUploadRequest {
                            header: Some(request_header()),
                            details: message_details,
                            data,
                        })),
                    }
                })
                .await?;

                // Details ride on the first chunk; an empty model still needs
                // one message to carry them.
                if first {
                    let request = RpcRequest {
                        request: Some(Request::ModelsUpload(models_proto::ModelsUploadRequest {
                            header: Some(request_header()),
                            details: Some(wire_details.clone()),
                            data: Vec::new(),
                        })),
                    };
                    let frame = Frame::request(&request)?;
                    frame::write_frame(&mut send, &frame).await?;
                }
                send.finish()?;

                let response_frame = frame::read_frame(&mut recv).await?;
                let envelope: RpcResponse = response_frame.decode()?;
                let response = match envelope.response {
                    Some(Response::ModelsUpload(r)) => r,
                    _ => return Err(unexpected_variant("models upload")),
                };
                check_header(response.header.as_ref())?;

                response.details.map(ModelDetails::from_wire).ok_or_else(|| {
                    ClaraError::UnexpectedResponse(
                        "upload response is missing the model details".to_string(),
                    )
                })
            })
            .await
    }

    /// Download a model's serialized content, writing it to `dest` in
    /// arrival order.
    ///
    /// Returns the model's details, or `None` when the platform knows no
    /// such model.
    #[instrument(skip(self, dest))]
    pub async fn download_model<W>(
        &self,
        model_id: &ModelId,
        dest: &mut W,
    ) -> Result<Option<ModelDetails>>
    where
        W: AsyncWrite + Unpin,
    {
        let (mut send, mut recv) = self.connection.open_raw().await?;
        self.connection
            .timed_transfer(async {
                let request = RpcRequest {
                    request: Some(Request::ModelsDownload(models_proto::ModelsDownloadRequest {
                        header: Some(request_header()),
                        model_id: Some(model_id.to_wire()),
                    })),
                };
                let frame = Frame::request(&request)?;
                frame::write_frame(&mut send, &frame).await?;
                send.finish()?;

                let details = transfer::recv_chunks(
                    &mut recv,
                    dest,
                    |envelope: RpcResponse, first| {
                        let response = match envelope.response {
                            Some(Response::ModelsDownload(r)) => r,
                            _ => return Err(unexpected_variant("models download")),
                        };
                        check_header(response.header.as_ref())?;
                        let meta = if first { response.details } else { None };
                        Ok((meta, response.data))
                    },
                )
                .await?;

                Ok(details.map(ModelDetails::from_wire))
            })
            .await
    }

    /// Upload a model from a local file.
    #[instrument(skip(self, details, path))]
    pub async fn upload_model_file(
        &self,
        details: &ModelDetails,
        path: impl AsRef<Path>,
    ) -> Result<ModelDetails> {
        let file = tokio::fs::File::open(path.as_ref()).await?;
        self.upload_model(details, file).await
    }

    /// Download a model's serialized content into a local file, streaming
    /// chunks to disk as they arrive.
    ///
    /// Returns the model's details, or `None` when the platform knows no
    /// such model (in which case the destination file is removed).
    #[instrument(skip(self, path))]
    pub async fn download_model_file(
        &self,
        model_id: &ModelId,
        path: impl AsRef<Path>,
    ) -> Result<Option<ModelDetails>> {
        let mut file = tokio::fs::File::create(path.as_ref()).await?;
        let details = self.download_model(model_id, &mut file).await?;
        if details.is_none() {
            drop(file);
            tokio::fs::remove_file(path.as_ref()).await?;
        }
        Ok(details)
    }

    /// List every model the platform knows.
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<Vec<ModelDetails>> {
        let request = models_proto::ModelsListRequest {
            header: Some(request_header()),
        };

        let mut models = Vec::new();
        for inner in self
            .connection
            .collect_stream(Request::ModelsList(request))
            .await?
        {
            let response = match inner {
                Response::ModelsList(r) => r,
                _ => return Err(unexpected_variant("models list")),
            };
            check_header(response.header.as_ref())?;
            if let Some(details) = response.details {
                models.push(ModelDetails::from_wire(details));
            }
        }
        Ok(models)
    }

    /// Delete a model from the platform.
    #[instrument(skip(self))]
    pub async fn delete_model(&self, model_id: &ModelId) -> Result<()> {
        let request = models_proto::ModelsDeleteRequest {
            header: Some(request_header()),
            model_id: Some(model_id.to_wire()),
        };

        let response = match self.connection.unary(Request::ModelsDelete(request)).await? {
            Response::ModelsDelete(r) => r,
            _ => return Err(unexpected_variant("models delete")),
        };
        check_header(response.header.as_ref())
    }

    /// Create a new, empty model catalog.
    #[instrument(skip(self))]
    pub async fn create_catalog(&self) -> Result<CatalogId> {
        let request = models_proto::ModelsCreateCatalogRequest {
            header: Some(request_header()),
        };

        let response = match self
            .connection
            .unary(Request::ModelsCreateCatalog(request))
            .await?
        {
            Response::ModelsCreateCatalog(r) => r,
            _ => return Err(unexpected_variant("models create catalog")),
        };
        check_header(response.header.as_ref())?;

        CatalogId::from_wire(response.catalog_id)
    }

    /// Delete a catalog. Member models are unaffected.
    #[instrument(skip(self))]
    pub async fn delete_catalog(&self, catalog_id: &CatalogId) -> Result<()> {
        let request = models_proto::ModelsDeleteCatalogRequest {
            header: Some(request_header()),
            catalog_id: Some(catalog_id.to_wire()),
        };

        let response = match self
            .connection
            .unary(Request::ModelsDeleteCatalog(request))
            .await?
        {
            Response::ModelsDeleteCatalog(r) => r,
            _ => return Err(unexpected_variant("models delete catalog")),
        };
        check_header(response.header.as_ref())
    }

    /// Read a catalog's member models in catalog order.
    #[instrument(skip(self))]
    pub async fn read_catalog(&self, catalog_id: &CatalogId) -> Result<Vec<ModelDetails>> {
        let request = models_proto::ModelsReadCatalogRequest {
            header: Some(request_header()),
            catalog_id: Some(catalog_id.to_wire()),
        };

        let mut members = Vec::new();
        for inner in self
            .connection
            .collect_stream(Request::ModelsReadCatalog(request))
            .await?
        {
            let response = match inner {
                Response::ModelsReadCatalog(r) => r,
                _ => return Err(unexpected_variant("models read catalog")),
            };
            check_header(response.header.as_ref())?;
            if let Some(details) = response.details {
                members.push(ModelDetails::from_wire(details));
            }
        }
        Ok(members)
    }

    /// Replace a catalog's member list wholesale.
    #[instrument(skip(self, model_ids))]
    pub async fn update_catalog(
        &self,
        catalog_id: &CatalogId,
        model_ids: &[ModelId],
    ) -> Result<()> {
        let request = models_proto::ModelsUpdateCatalogRequest {
            header: Some(request_header()),
            catalog_id: Some(catalog_id.to_wire()),
            model_ids: model_ids.iter().map(|id| id.to_wire()).collect(),
        };

        let response = match self
            .connection
            .unary(Request::ModelsUpdateCatalog(request))
            .await?
        {
            Response::ModelsUpdateCatalog(r) => r,
            _ => return Err(unexpected_variant("models update catalog")),
        };
        check_header(response.header.as_ref())
    }

    /// Create a new, empty inference-server instance.
    #[instrument(skip(self))]
    pub async fn create_instance(&self) -> Result<InstanceId> {
        let request = models_proto::ModelsCreateInstanceRequest {
            header: Some(request_header()),
        };

        let response = match self
            .connection
            .unary(Request::ModelsCreateInstance(request))
            .await?
        {
            Response::ModelsCreateInstance(r) => r,
            _ => return Err(unexpected_variant("models create instance")),
        };
        check_header(response.header.as_ref())?;

        InstanceId::from_wire(response.instance_id)
    }

    /// Delete an instance. Member models are unaffected.
    #[instrument(skip(self))]
    pub async fn delete_instance(&self, instance_id: &InstanceId) -> Result<()> {
        let request = models_proto::ModelsDeleteInstanceRequest {
            header: Some(request_header()),
            instance_id: Some(instance_id.to_wire()),
        };

        let response = match self
            .connection
            .unary(Request::ModelsDeleteInstance(request))
            .await?
        {
            Response::ModelsDeleteInstance(r) => r,
            _ => return Err(unexpected_variant("models delete instance")),
        };
        check_header(response.header.as_ref())
    }

    /// Read an instance's member models in instance order.
    #[instrument(skip(self))]
    pub async fn read_instance(&self, instance_id: &InstanceId) -> Result<Vec<ModelDetails>> {
        let request = models_proto::ModelsReadInstanceRequest {
            header: Some(request_header()),
            instance_id: Some(instance_id.to_wire()),
        };

        let mut members = Vec::new();
        for inner in self
            .connection
            .collect_stream(Request::ModelsReadInstance(request))
            .await?
        {
            let response = match inner {
                Response::ModelsReadInstance(r) => r,
                _ => return Err(unexpected_variant("models read instance")),
            };
            check_header(response.header.as_ref())?;
            if let Some(details) = response.details {
                members.push(ModelDetails::from_wire(details));
            }
        }
        Ok(members)
    }

    /// Replace an instance's member list wholesale.
    #[instrument(skip(self, model_ids))]
    pub async fn update_instance(
        &self,
        instance_id: &InstanceId,
        model_ids: &[ModelId],
    ) -> Result<()> {
        let request = models_proto::ModelsUpdateInstanceRequest {
            header: Some(request_header()),
            instance_id: Some(instance_id.to_wire()),
            model_ids: model_ids.iter().map(|id| id.to_wire()).collect(),
        };

        let response = match self
            .connection
            .unary(Request::ModelsUpdateInstance(request))
            .await?
        {
            Response::ModelsUpdateInstance(r) => r,
            _ => return Err(unexpected_variant("models update instance")),
        };
        check_header(response.header.as_ref())
    }

    /// Add metadata to a model, returning the merged metadata set.
    #[instrument(skip(self, metadata))]
    pub async fn add_metadata(
        &self,
        model_id: &ModelId,
        metadata: HashMap<String, String>,
    ) -> Result<HashMap<String, String>> {
        if metadata.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "metadata must not be empty".to_string(),
            ));
        }

        let request = models_proto::ModelsAddMetadataRequest {
            header: Some(request_header()),
            model_id: Some(model_id.to_wire()),
            metadata,
        };

        let response = match self
            .connection
            .unary(Request::ModelsAddMetadata(request))
            .await?
        {
            Response::ModelsAddMetadata(r) => r,
            _ => return Err(unexpected_variant("models add metadata")),
        };
        check_header(response.header.as_ref())?;

        Ok(response.metadata)
    }

    /// Remove metadata keys from a model, returning the remaining set.
    #[instrument(skip(self, keys))]
    pub async fn remove_metadata(
        &self,
        model_id: &ModelId,
        keys: &[String],
    ) -> Result<HashMap<String, String>> {
        if keys.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "metadata keys must not be empty".to_string(),
            ));
        }

        let request = models_proto::ModelsRemoveMetadataRequest {
            header: Some(request_header()),
            model_id: Some(model_id.to_wire()),
            keys: keys.to_vec(),
        };

        let response = match self
            .connection
            .unary(Request::ModelsRemoveMetadata(request))
            .await?
        {
            Response::ModelsRemoveMetadata(r) => r,
            _ => return Err(unexpected_variant("models remove metadata")),
        };
        check_header(response.header.as_ref())?;

        Ok(response.metadata)
    }
}
