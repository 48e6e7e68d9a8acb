// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Envelope messages carried inside frames.
//!
//! Every frame payload on a Clara stream is an [`RpcRequest`] or an
//! [`RpcResponse`]; the oneof discriminates the operation so a single
//! server endpoint can dispatch all services.

/// Envelope for every client-to-server message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcRequest {
    #[prost(
        oneof = "rpc_request::Request",
        tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39"
    )]
    pub request: Option<rpc_request::Request>,
}

pub mod rpc_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Request {
        #[prost(message, tag = "1")]
        JobsCreate(crate::jobs_proto::JobsCreateRequest),
        #[prost(message, tag = "2")]
        JobsStart(crate::jobs_proto::JobsStartRequest),
        #[prost(message, tag = "3")]
        JobsCancel(crate::jobs_proto::JobsCancelRequest),
        #[prost(message, tag = "4")]
        JobsStatus(crate::jobs_proto::JobsStatusRequest),
        #[prost(message, tag = "5")]
        JobsList(crate::jobs_proto::JobsListRequest),
        #[prost(message, tag = "6")]
        JobsReadLogs(crate::jobs_proto::JobsReadLogsRequest),
        #[prost(message, tag = "7")]
        JobsAddMetadata(crate::jobs_proto::JobsAddMetadataRequest),
        #[prost(message, tag = "8")]
        JobsRemoveMetadata(crate::jobs_proto::JobsRemoveMetadataRequest),
        #[prost(message, tag = "9")]
        PipelinesCreate(crate::pipelines_proto::PipelinesCreateRequest),
        #[prost(message, tag = "10")]
        PipelinesList(crate::pipelines_proto::PipelinesListRequest),
        #[prost(message, tag = "11")]
        PipelinesDetails(crate::pipelines_proto::PipelinesDetailsRequest),
        #[prost(message, tag = "12")]
        PipelinesRemove(crate::pipelines_proto::PipelinesRemoveRequest),
        #[prost(message, tag = "13")]
        PipelinesUpdate(crate::pipelines_proto::PipelinesUpdateRequest),
        #[prost(message, tag = "14")]
        PipelinesAddMetadata(crate::pipelines_proto::PipelinesAddMetadataRequest),
        #[prost(message, tag = "15")]
        PipelinesRemoveMetadata(crate::pipelines_proto::PipelinesRemoveMetadataRequest),
        #[prost(message, tag = "16")]
        PayloadsCreate(crate::payloads_proto::PayloadsCreateRequest),
        #[prost(message, tag = "17")]
        PayloadsDelete(crate::payloads_proto::PayloadsDeleteRequest),
        #[prost(message, tag = "18")]
        PayloadsDetails(crate::payloads_proto::PayloadsDetailsRequest),
        #[prost(message, tag = "19")]
        PayloadsUpload(crate::payloads_proto::PayloadsUploadRequest),
        #[prost(message, tag = "20")]
        PayloadsDownload(crate::payloads_proto::PayloadsDownloadRequest),
        #[prost(message, tag = "21")]
        PayloadsRemove(crate::payloads_proto::PayloadsRemoveRequest),
        #[prost(message, tag = "22")]
        PayloadsAddMetadata(crate::payloads_proto::PayloadsAddMetadataRequest),
        #[prost(message, tag = "23")]
        PayloadsRemoveMetadata(crate::payloads_proto::PayloadsRemoveMetadataRequest),
        #[prost(message, tag = "24")]
        ModelsUpload(crate::models_proto::ModelsUploadRequest),
        #[prost(message, tag = "25")]
        ModelsDownload(crate::models_proto::ModelsDownloadRequest),
        #[prost(message, tag = "26")]
        ModelsList(crate::models_proto::ModelsListRequest),
        #[prost(message, tag = "27")]
        ModelsDelete(crate::models_proto::ModelsDeleteRequest),
        #[prost(message, tag = "28")]
        ModelsCreateCatalog(crate::models_proto::ModelsCreateCatalogRequest),
        #[prost(message, tag = "29")]
        ModelsDeleteCatalog(crate::models_proto::ModelsDeleteCatalogRequest),
        #[prost(message, tag = "30")]
        ModelsReadCatalog(crate::models_proto::ModelsReadCatalogRequest),
        #[prost(message, tag = "31")]
        ModelsUpdateCatalog(crate::models_proto::ModelsUpdateCatalogRequest),
        #[prost(message, tag = "32")]
        ModelsCreateInstance(crate::models_proto::ModelsCreateInstanceRequest),
        #[prost(message, tag = "33")]
        ModelsDeleteInstance(crate::models_proto::ModelsDeleteInstanceRequest),
        #[prost(message, tag = "34")]
        ModelsReadInstance(crate::models_proto::ModelsReadInstanceRequest),
        #[prost(message, tag = "35")]
        ModelsUpdateInstance(crate::models_proto::ModelsUpdateInstanceRequest),
        #[prost(message, tag = "36")]
        ModelsAddMetadata(crate::models_proto::ModelsAddMetadataRequest),
        #[prost(message, tag = "37")]
        ModelsRemoveMetadata(crate::models_proto::ModelsRemoveMetadataRequest),
        #[prost(message, tag = "38")]
        Stop(crate::platform_proto::StopRequest),
        #[prost(message, tag = "39")]
        Utilization(crate::platform_proto::UtilizationRequest),
    }
}

/// Envelope for every server-to-client message, unary or streamed.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcResponse {
    #[prost(
        oneof = "rpc_response::Response",
        tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39"
    )]
    pub response: Option<rpc_response::Response>,
}

pub mod rpc_response {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "1")]
        JobsCreate(crate::jobs_proto::JobsCreateResponse),
        #[prost(message, tag = "2")]
        JobsStart(crate::jobs_proto::JobsStartResponse),
        #[prost(message, tag = "3")]
        JobsCancel(crate::jobs_proto::JobsCancelResponse),
        #[prost(message, tag = "4")]
        JobsStatus(crate::jobs_proto::JobsStatusResponse),
        #[prost(message, tag = "5")]
        JobsList(crate::jobs_proto::JobsListResponse),
        #[prost(message, tag = "6")]
        JobsReadLogs(crate::jobs_proto::JobsReadLogsResponse),
        #[prost(message, tag = "7")]
        JobsAddMetadata(crate::jobs_proto::JobsAddMetadataResponse),
        #[prost(message, tag = "8")]
        JobsRemoveMetadata(crate::jobs_proto::JobsRemoveMetadataResponse),
        #[prost(message, tag = "9")]
        PipelinesCreate(crate::pipelines_proto::PipelinesCreateResponse),
        #[prost(message, tag = "10")]
        PipelinesList(crate::pipelines_proto::PipelinesListResponse),
        #[prost(message, tag = "11")]
        PipelinesDetails(crate::pipelines_proto::PipelinesDetailsResponse),
        #[prost(message, tag = "12")]
        PipelinesRemove(crate::pipelines_proto::PipelinesRemoveResponse),
        #[prost(message, tag = "13")]
        PipelinesUpdate(crate::pipelines_proto::PipelinesUpdateResponse),
        #[prost(message, tag = "14")]
        PipelinesAddMetadata(crate::pipelines_proto::PipelinesAddMetadataResponse),
        #[prost(message, tag = "15")]
        PipelinesRemoveMetadata(crate::pipelines_proto::PipelinesRemoveMetadataResponse),
        #[prost(message, tag = "16")]
        PayloadsCreate(crate::payloads_proto::PayloadsCreateResponse),
        #[prost(message, tag = "17")]
        PayloadsDelete(crate::payloads_proto::PayloadsDeleteResponse),
        #[prost(message, tag = "18")]
        PayloadsDetails(crate::payloads_proto::PayloadsDetailsResponse),
        #[prost(message, tag = "19")]
        PayloadsUpload(crate::payloads_proto::PayloadsUploadResponse),
        #[prost(message, tag = "20")]
        PayloadsDownload(crate::payloads_proto::PayloadsDownloadResponse),
        #[prost(message, tag = "21")]
        PayloadsRemove(crate::payloads_proto::PayloadsRemoveResponse),
        #[prost(message, tag = "22")]
        PayloadsAddMetadata(crate::payloads_proto::PayloadsAddMetadataResponse),
        #[prost(message, tag = "23")]
        PayloadsRemoveMetadata(crate::payloads_proto::PayloadsRemoveMetadataResponse),
        #[prost(message, tag = "24")]
        ModelsUpload(crate::models_proto::ModelsUploadResponse),
        #[prost(message, tag = "25")]
        ModelsDownload(crate::models_proto::ModelsDownloadResponse),
        #[prost(message, tag = "26")]
        ModelsList(crate::models_proto::ModelsListResponse),
        #[prost(message, tag = "27")]
        ModelsDelete(crate::models_proto::ModelsDeleteResponse),
        #[prost(message, tag = "28")]
        ModelsCreateCatalog(crate::models_proto::ModelsCreateCatalogResponse),
        #[prost(message, tag = "29")]
        ModelsDeleteCatalog(crate::models_proto::ModelsDeleteCatalogResponse),
        #[prost(message, tag = "30")]
        ModelsReadCatalog(crate::models_proto::ModelsReadCatalogResponse),
        #[prost(message, tag = "31")]
        ModelsUpdateCatalog(crate::models_proto::ModelsUpdateCatalogResponse),
        #[prost(message, tag = "32")]
        ModelsCreateInstance(crate::models_proto::ModelsCreateInstanceResponse),
        #[prost(message, tag = "33")]
        ModelsDeleteInstance(crate::models_proto::ModelsDeleteInstanceResponse),
        #[prost(message, tag = "34")]
        ModelsReadInstance(crate::models_proto::ModelsReadInstanceResponse),
        #[prost(message, tag = "35")]
        ModelsUpdateInstance(crate::models_proto::ModelsUpdateInstanceResponse),
        #[prost(message, tag = "36")]
        ModelsAddMetadata(crate::models_proto::ModelsAddMetadataResponse),
        #[prost(message, tag = "37")]
        ModelsRemoveMetadata(crate::models_proto::ModelsRemoveMetadataResponse),
        #[prost(message, tag = "38")]
        Stop(crate::platform_proto::StopResponse),
        #[prost(message, tag = "39")]
        Utilization(crate::platform_proto::UtilizationResponse),
    }
}
