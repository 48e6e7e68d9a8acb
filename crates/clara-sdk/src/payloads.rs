// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Client façade for the Payloads service.
//!
//! Payloads are named collections of blobs. Blob content moves in bounded
//! chunks (see [`crate::transfer`]); uploads stream chunks to the server,
//! downloads stream them back in order.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use clara_protocol::ClaraChannel;
use clara_protocol::frame::{self, Frame};
use clara_protocol::payloads_proto;
use clara_protocol::rpc_proto::{RpcRequest, RpcResponse, rpc_request::Request, rpc_response::Response};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::instrument;

use crate::config::ClientConfig;
use crate::connection::{ClientConnection, check_header, request_header, unexpected_variant};
use crate::error::{ClaraError, Result};
use crate::ids::PayloadId;
use crate::transfer;
use crate::types::{PayloadDetails, PayloadFileDetails, PayloadType};

/// Client for creating payloads and moving blob content in and out of them.
pub struct PayloadsClient {
    connection: ClientConnection,
}

fn validate_blob_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ClaraError::InvalidArgument(
            "blob name must not be empty".to_string(),
        ));
    }
    if name.starts_with('/') {
        return Err(ClaraError::InvalidArgument(format!(
            "blob name {:?} must be relative to the payload root, not absolute",
            name
        )));
    }
    Ok(())
}

impl PayloadsClient {
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

    /// Create a new reusable payload.
    #[instrument(skip(self, metadata))]
    pub async fn create_payload(
        &self,
        metadata: HashMap<String, String>,
    ) -> Result<(PayloadId, PayloadType)> {
        let request = payloads_proto::PayloadsCreateRequest {
            header: Some(request_header()),
            metadata,
        };

        let response = match self
            .connection
            .unary(Request::PayloadsCreate(request))
            .await?
        {
            Response::PayloadsCreate(r) => r,
            _ => return Err(unexpected_variant("payloads create")),
        };
        check_header(response.header.as_ref())?;

        Ok((
            PayloadId::from_wire(response.payload_id)?,
            response.payload_type.into(),
        ))
    }

    /// Delete a payload and every blob in it.
    #[instrument(skip(self))]
    pub async fn delete_payload(&self, payload_id: &PayloadId) -> Result<()> {
        let request = payloads_proto::PayloadsDeleteRequest {
            header: Some(request_header()),
            payload_id: Some(payload_id.to_wire()),
        };

        let response = match self
            .connection
            .unary(Request::PayloadsDelete(request))
            .await?
        {
            Response::PayloadsDelete(r) => r,
            _ => return Err(unexpected_variant("payloads delete")),
        };
        check_header(response.header.as_ref())
    }

    /// Fetch a payload's details, including its blob inventory.
    ///
    /// Returns `None` when the platform knows no such payload.
    #[instrument(skip(self))]
    pub async fn get_details(&self, payload_id: &PayloadId) -> Result<Option<PayloadDetails>> {
        let request = payloads_proto::PayloadsDetailsRequest {
            header: Some(request_header()),
            payload_id: Some(payload_id.to_wire()),
        };

        let mut details: Option<PayloadDetails> = None;
        for inner in self
            .connection
            .collect_stream(Request::PayloadsDetails(request))
            .await?
        {
            let response = match inner {
                Response::PayloadsDetails(r) => r,
                _ => return Err(unexpected_variant("payloads details")),
            };
            check_header(response.header.as_ref())?;

            if details.is_none() {
                details = Some(PayloadDetails {
                    payload_id: PayloadId::from_wire(response.payload_id.clone())?,
                    payload_type: response.payload_type.into(),
                    metadata: response.metadata.clone(),
                    files: Vec::new(),
                });
            }
            if let Some(record) = details.as_mut()
                && let Some(file) = response.file
            {
                record.files.push(PayloadFileDetails::from_wire(file));
            }
        }
        Ok(details)
    }

    /// Upload blob content into a payload, reading `source` to its end.
    ///
    /// `details.name` is the destination path inside the payload;
    /// `details.size` should be the total content size and is reported to
    /// the server on the first chunk. Returns the details the server
    /// recorded.
    #[instrument(skip(self, details, source))]
    pub async fn upload<R>(
        &self,
        payload_id: &PayloadId,
        details: &PayloadFileDetails,
        mut source: R,
    ) -> Result<PayloadFileDetails>
    where
        R: AsyncRead + Unpin,
    {
        validate_blob_name(&details.name)?;

        let (mut send, mut recv) = self.connection.open_raw().await?;
        self.connection
            .timed_transfer(async {
                let mut first = true;
                let make_request = |data: Vec<u8>, first: bool| {
                    let wire_details = payloads_proto::PayloadFileDetails {
                        mode: details.mode,
                        name: details.name.clone(),
                        size: if first { details.size } else { 0 },
                    };
                    RpcRequest {
                        request: Some(Request::PayloadsUpload(
                            payloads_proto::PayloadsUploadRequest {
                                header: Some(request_header()),
                                payload_id: Some(payload_id.to_wire()),
                                details: Some(wire_details),
                                data,
                            },
                        )),
                    }
                };

                let (_bytes, chunks) = transfer::send_chunks(&mut send, &mut source, |data| {
                    let request = make_request(data, first);
                    first = false;
                    request
                })
                .await?;

                // An empty source still needs one message so the server sees
                // the destination details and creates the empty blob.
                if chunks == 0 {
                    let frame = Frame::request(&make_request(Vec::new(), true))?;
                    frame::write_frame(&mut send, &frame).await?;
                }
                send.finish()?;

                let response_frame = frame::read_frame(&mut recv).await?;
                let envelope: RpcResponse = response_frame.decode()?;
                let response = match envelope.response {
                    Some(Response::PayloadsUpload(r)) => r,
                    _ => return Err(unexpected_variant("payloads upload")),
                };
                check_header(response.header.as_ref())?;

                response
                    .details
                    .map(PayloadFileDetails::from_wire)
                    .ok_or_else(|| {
                        ClaraError::UnexpectedResponse(
                            "upload response is missing the file details".to_string(),
                        )
                    })
            })
            .await
    }

    /// Upload a local file into a payload under the given blob name.
    #[instrument(skip(self, path))]
    pub async fn upload_file(
        &self,
        payload_id: &PayloadId,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<PayloadFileDetails> {
        validate_blob_name(name)?;

        let file = tokio::fs::File::open(path.as_ref()).await?;
        let file_metadata = file.metadata().await?;

        #[cfg(unix)]
        let mode = {
            use std::os::unix::fs::PermissionsExt;
            file_metadata.permissions().mode()
        };
        #[cfg(not(unix))]
        let mode = 0o644;

        let details = PayloadFileDetails {
            mode,
            name: name.to_string(),
            size: file_metadata.len(),
        };
        self.upload(payload_id, &details, file).await
    }

    /// Download a blob from a payload, writing its content to `dest` in
    /// arrival order.
    ///
    /// Returns the blob's details, or `None` when the payload holds no blob
    /// with that name.
    #[instrument(skip(self, dest))]
    pub async fn download_to<W>(
        &self,
        payload_id: &PayloadId,
        name: &str,
        dest: &mut W,
    ) -> Result<Option<PayloadFileDetails>>
    where
        W: AsyncWrite + Unpin,
    {
        validate_blob_name(name)?;

        let (mut send, mut recv) = self.connection.open_raw().await?;
        self.connection
            .timed_transfer(async {
                let request = RpcRequest {
                    request: Some(Request::PayloadsDownload(
                        payloads_proto::PayloadsDownloadRequest {
                            header: Some(request_header()),
                            payload_id: Some(payload_id.to_wire()),
                            name: name.to_string(),
                        },
                    )),
                };
                let frame = Frame::request(&request)?;
                frame::write_frame(&mut send, &frame).await?;
                send.finish()?;

                let details = transfer::recv_chunks(
                    &mut recv,
                    dest,
                    |envelope: RpcResponse, first| {
                        let response = match envelope.response {
                            Some(Response::PayloadsDownload(r)) => r,
                            _ => return Err(unexpected_variant("payloads download")),
                        };
                        check_header(response.header.as_ref())?;
                        let meta = if first { response.details } else { None };
                        Ok((meta, response.data))
                    },
                )
                .await?;

                Ok(details.map(PayloadFileDetails::from_wire))
            })
            .await
    }

    /// Download a blob from a payload into a local file, streaming chunks
    /// to disk as they arrive.
    ///
    /// Returns the blob's details, or `None` when the payload holds no blob
    /// with that name (in which case the destination file is removed).
    #[instrument(skip(self, path))]
    pub async fn download_file(
        &self,
        payload_id: &PayloadId,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<Option<PayloadFileDetails>> {
        validate_blob_name(name)?;

        let mut file = tokio::fs::File::create(path.as_ref()).await?;
        let details = self.download_to(payload_id, name, &mut file).await?;
        if details.is_none() {
            drop(file);
            tokio::fs::remove_file(path.as_ref()).await?;
        }
        Ok(details)
    }

    /// Remove one blob from a payload.
    #[instrument(skip(self))]
    pub async fn remove(&self, payload_id: &PayloadId, name: &str) -> Result<()> {
        validate_blob_name(name)?;

        let request = payloads_proto::PayloadsRemoveRequest {
            header: Some(request_header()),
            payload_id: Some(payload_id.to_wire()),
            name: name.to_string(),
        };

        let response = match self
            .connection
            .unary(Request::PayloadsRemove(request))
            .await?
        {
            Response::PayloadsRemove(r) => r,
            _ => return Err(unexpected_variant("payloads remove")),
        };
        check_header(response.header.as_ref())
    }

    /// Add metadata to a payload, returning the merged metadata set.
    #[instrument(skip(self, metadata))]
    pub async fn add_metadata(
        &self,
        payload_id: &PayloadId,
        metadata: HashMap<String, String>,
    ) -> Result<HashMap<String, String>> {
        if metadata.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "metadata must not be empty".to_string(),
            ));
        }

        let request = payloads_proto::PayloadsAddMetadataRequest {
            header: Some(request_header()),
            payload_id: Some(payload_id.to_wire()),
            metadata,
        };

        let response = match self
            .connection
            .unary(Request::PayloadsAddMetadata(request))
            .await?
        {
            Response::PayloadsAddMetadata(r) => r,
            _ => return Err(unexpected_variant("payloads add metadata")),
        };
        check_header(response.header.as_ref())?;

        Ok(response.metadata)
    }

    /// Remove metadata keys from a payload, returning the remaining set.
    #[instrument(skip(self, keys))]
    pub async fn remove_metadata(
        &self,
        payload_id: &PayloadId,
        keys: &[String],
    ) -> Result<HashMap<String, String>> {
        if keys.is_empty() {
            return Err(ClaraError::InvalidArgument(
                "metadata keys must not be empty".to_string(),
            ));
        }

        let request = payloads_proto::PayloadsRemoveMetadataRequest {
            header: Some(request_header()),
            payload_id: Some(payload_id.to_wire()),
            keys: keys.to_vec(),
        };

        let response = match self
            .connection
            .unary(Request::PayloadsRemoveMetadata(request))
            .await?
        {
            Response::PayloadsRemoveMetadata(r) => r,
            _ => return Err(unexpected_variant("payloads remove metadata")),
        };
        check_header(response.header.as_ref())?;

        Ok(response.metadata)
    }
}
