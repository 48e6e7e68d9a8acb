// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Aggregate client for the whole platform.

use std::sync::Arc;

use clara_protocol::ClaraChannel;
use clara_protocol::platform_proto;
use clara_protocol::rpc_proto::{rpc_request::Request, rpc_response::Response};
use tracing::instrument;

use crate::config::ClientConfig;
use crate::connection::{ClientConnection, check_header, request_header, unexpected_variant};
use crate::error::Result;
use crate::jobs::JobsClient;
use crate::models::ModelsClient;
use crate::payloads::PayloadsClient;
use crate::pipelines::PipelinesClient;
use crate::types::GpuUtilization;

/// One client for the whole platform: the four resource façades sharing a
/// single QUIC connection, plus the platform-level operations.
pub struct ClaraClient {
    connection: ClientConnection,
    jobs: JobsClient,
    pipelines: PipelinesClient,
    payloads: PayloadsClient,
    models: ModelsClient,
}

impl ClaraClient {
    /// Create a client from configuration. All façades share one channel.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let connection = ClientConnection::new(config)?;
        let channel = connection.channel();
        Ok(Self::assemble(connection, channel, config))
    }

    /// Create a client over an existing channel.
    pub fn with_channel(channel: Arc<ClaraChannel>, config: &ClientConfig) -> Self {
        let connection = ClientConnection::with_channel(Arc::clone(&channel), config);
        Self::assemble(connection, channel, config)
    }

    fn assemble(
        connection: ClientConnection,
        channel: Arc<ClaraChannel>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            connection,
            jobs: JobsClient::with_channel(Arc::clone(&channel), config),
            pipelines: PipelinesClient::with_channel(Arc::clone(&channel), config),
            payloads: PayloadsClient::with_channel(Arc::clone(&channel), config),
            models: ModelsClient::with_channel(channel, config),
        }
    }

    /// The jobs façade.
    pub fn jobs(&self) -> &JobsClient {
        &self.jobs
    }

    /// The pipelines façade.
    pub fn pipelines(&self) -> &PipelinesClient {
        &self.pipelines
    }

    /// The payloads façade.
    pub fn payloads(&self) -> &PayloadsClient {
        &self.payloads
    }

    /// The models façade.
    pub fn models(&self) -> &ModelsClient {
        &self.models
    }

    /// Close the client and every façade. Idempotent.
    pub async fn close(&self) {
        self.jobs.close().await;
        self.pipelines.close().await;
        self.payloads.close().await;
        self.models.close().await;
        self.connection.close().await;
    }

    /// Reopen a closed client and every façade. Idempotent.
    pub fn reconnect(&self) {
        self.jobs.reconnect();
        self.pipelines.reconnect();
        self.payloads.reconnect();
        self.models.reconnect();
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

    /// Ask the platform to shut down.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<()> {
        let request = platform_proto::StopRequest {
            header: Some(request_header()),
        };

        let response = match self.connection.unary(Request::Stop(request)).await? {
            Response::Stop(r) => r,
            _ => return Err(unexpected_variant("stop")),
        };
        check_header(response.header.as_ref())
    }

    /// Fetch one GPU utilization snapshot covering every GPU the platform
    /// can see. An empty vector means the platform sees no GPUs.
    #[instrument(skip(self))]
    pub async fn list_utilization(&self) -> Result<Vec<GpuUtilization>> {
        let request = platform_proto::UtilizationRequest {
            header: Some(request_header()),
            watch: false,
        };

        let mut metrics = Vec::new();
        for inner in self
            .connection
            .collect_stream(Request::Utilization(request))
            .await?
        {
            let response = match inner {
                Response::Utilization(r) => r,
                _ => return Err(unexpected_variant("utilization")),
            };
            check_header(response.header.as_ref())?;
            metrics.extend(response.gpu_metrics.into_iter().map(GpuUtilization::from_wire));
        }
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClaraError;

    #[tokio::test]
    async fn test_facades_close_independently() {
        let client = ClaraClient::new(&ClientConfig::localhost()).unwrap();
        client.jobs().close().await;
        assert!(!client.jobs().is_open());
        // Closing one façade does not close its siblings.
        assert!(client.pipelines().is_open());
        assert!(client.is_open());
    }

    #[tokio::test]
    async fn test_close_then_reconnect() {
        let client = ClaraClient::new(&ClientConfig::localhost()).unwrap();
        client.close().await;
        assert!(!client.is_open());
        assert!(!client.jobs().is_open());
        let result = client.stop().await;
        assert!(matches!(result, Err(ClaraError::InvalidOperation(_))));

        client.reconnect();
        assert!(client.is_open());
        assert!(client.models().is_open());
        assert!(!client.is_connected().await);
    }
}
