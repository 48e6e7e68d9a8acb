// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! End-to-end tests against a loopback QUIC server speaking the platform
//! protocol.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use clara_protocol::common_proto::{Identifier, ResponseHeader};
use clara_protocol::frame::Frame;
use clara_protocol::rpc_proto::{RpcRequest, RpcResponse, rpc_request, rpc_response};
use clara_protocol::server::{ClaraServer, StreamHandler};
use clara_protocol::{jobs_proto, models_proto, payloads_proto, platform_proto};
use clara_sdk::{
    CHUNK_SIZE, ClaraClient, ClaraError, ClientConfig, JobId, JobPriority, JobState, JobStatus,
    JobsClient, ModelDetails, ModelId, ModelType, ModelsClient, PayloadFileDetails, PayloadId,
    PayloadsClient, PipelineId,
};

const PIPELINE_ID: &str = "92656d79fa414db6b294069c0e9e6df5";
const JOB_ID: &str = "432b274a8f754968888807fe1eba237b";
const PAYLOAD_ID: &str = "7ac5c691e13d4f45894a3a70d9925936";
const MODEL_ID: &str = "b1e9c1f6a4a34bb0a1fb05b3b8a2f0c4";

type BlobStore = Arc<Mutex<HashMap<String, Vec<u8>>>>;

fn ok_header() -> Option<ResponseHeader> {
    Some(ResponseHeader {
        code: 0,
        messages: vec![],
    })
}

fn error_header(code: i32, messages: &[&str]) -> Option<ResponseHeader> {
    Some(ResponseHeader {
        code,
        messages: messages.iter().map(|m| m.to_string()).collect(),
    })
}

fn id(value: &str) -> Option<Identifier> {
    Some(Identifier {
        value: value.to_string(),
    })
}

/// Reads every request frame on the stream (the client always finishes its
/// send side first), then answers based on the first request's variant.
async fn handle_stream(mut stream: StreamHandler, store: BlobStore) {
    let mut requests: Vec<rpc_request::Request> = Vec::new();
    while let Ok(frame) = stream.read_frame().await {
        let envelope: RpcRequest = frame.decode().expect("malformed request envelope");
        requests.push(envelope.request.expect("empty request envelope"));
    }
    if requests.is_empty() {
        return;
    }

    let mut responses: Vec<rpc_response::Response> = Vec::new();
    match &requests[0] {
        rpc_request::Request::JobsCreate(req) => {
            let response = if req.name == "test job"
                && req.pipeline_id.as_ref().map(|p| p.value.as_str()) == Some(PIPELINE_ID)
            {
                jobs_proto::JobsCreateResponse {
                    header: ok_header(),
                    job_id: id(JOB_ID),
                    payload_id: id(PAYLOAD_ID),
                }
            } else {
                jobs_proto::JobsCreateResponse {
                    header: error_header(-1, &["no such pipeline"]),
                    job_id: None,
                    payload_id: None,
                }
            };
            responses.push(rpc_response::Response::JobsCreate(response));
        }
        rpc_request::Request::JobsStatus(req) => {
            responses.push(rpc_response::Response::JobsStatus(
                jobs_proto::JobsStatusResponse {
                    header: ok_header(),
                    name: "test job".to_string(),
                    job_id: req.job_id.clone(),
                    pipeline_id: id(PIPELINE_ID),
                    payload_id: id(PAYLOAD_ID),
                    state: 1, // Pending
                    status: 1, // Healthy
                    priority: 2,
                    created: "63763345820".to_string(),
                    started: String::new(),
                    stopped: String::new(),
                    metadata: HashMap::new(),
                    operator_details: vec![],
                    messages: vec![],
                },
            ));
        }
        rpc_request::Request::JobsList(_) => {
            let entry = jobs_proto::JobsListResponse {
                header: ok_header(),
                job_id: id(JOB_ID),
                pipeline_id: id(PIPELINE_ID),
                payload_id: id(PAYLOAD_ID),
                name: "test job".to_string(),
                state: 2,
                status: 1,
                priority: 2,
                created: "63763345820".to_string(),
                started: String::new(),
                stopped: String::new(),
                metadata: HashMap::new(),
            };
            responses.push(rpc_response::Response::JobsList(entry));
            // Placeholder entry with no job identifier, as real servers
            // emit at the end of a listing.
            responses.push(rpc_response::Response::JobsList(
                jobs_proto::JobsListResponse {
                    header: ok_header(),
                    job_id: id(""),
                    ..Default::default()
                },
            ));
        }
        rpc_request::Request::JobsAddMetadata(req) => {
            let response = if req.header.is_some() {
                let mut metadata = req.metadata.clone();
                metadata.insert("source".to_string(), "platform".to_string());
                jobs_proto::JobsAddMetadataResponse {
                    header: ok_header(),
                    metadata,
                }
            } else {
                jobs_proto::JobsAddMetadataResponse {
                    header: error_header(-1, &["missing request header"]),
                    metadata: HashMap::new(),
                }
            };
            responses.push(rpc_response::Response::JobsAddMetadata(response));
        }
        rpc_request::Request::PayloadsUpload(first) => {
            let details = first.details.clone().expect("upload without details");
            let mut content = Vec::new();
            for request in &requests {
                if let rpc_request::Request::PayloadsUpload(req) = request {
                    content.extend_from_slice(&req.data);
                }
            }
            let size = content.len() as u64;
            store.lock().unwrap().insert(details.name.clone(), content);
            responses.push(rpc_response::Response::PayloadsUpload(
                payloads_proto::PayloadsUploadResponse {
                    header: ok_header(),
                    details: Some(payloads_proto::PayloadFileDetails {
                        mode: details.mode,
                        name: details.name,
                        size,
                    }),
                },
            ));
        }
        rpc_request::Request::PayloadsDownload(req) => {
            let content = store.lock().unwrap().get(&req.name).cloned();
            if let Some(content) = content {
                let details = payloads_proto::PayloadFileDetails {
                    mode: 0o644,
                    name: req.name.clone(),
                    size: content.len() as u64,
                };
                let mut first = true;
                for chunk in content.chunks(CHUNK_SIZE).chain(content.is_empty().then_some(&[][..])) {
                    responses.push(rpc_response::Response::PayloadsDownload(
                        payloads_proto::PayloadsDownloadResponse {
                            header: ok_header(),
                            details: first.then(|| details.clone()),
                            data: chunk.to_vec(),
                        },
                    ));
                    first = false;
                }
            }
            // Unknown blob: finish with no frames at all.
        }
        rpc_request::Request::ModelsUpload(first) => {
            let details = first.details.clone().expect("upload without model details");
            let mut content = Vec::new();
            for request in &requests {
                if let rpc_request::Request::ModelsUpload(req) = request {
                    content.extend_from_slice(&req.data);
                }
            }
            store.lock().unwrap().insert(MODEL_ID.to_string(), content);
            responses.push(rpc_response::Response::ModelsUpload(
                models_proto::ModelsUploadResponse {
                    header: ok_header(),
                    details: Some(models_proto::ModelDetails {
                        model_id: id(MODEL_ID),
                        ..details
                    }),
                },
            ));
        }
        rpc_request::Request::ModelsDownload(req) => {
            let key = req.model_id.as_ref().map(|m| m.value.clone()).unwrap_or_default();
            let content = store.lock().unwrap().get(&key).cloned();
            if let Some(content) = content {
                let details = models_proto::ModelDetails {
                    model_id: id(MODEL_ID),
                    name: "segmenter".to_string(),
                    model_type: 2,
                    tags: HashMap::new(),
                    metadata: HashMap::new(),
                };
                let mut first = true;
                for chunk in content.chunks(CHUNK_SIZE).chain(content.is_empty().then_some(&[][..])) {
                    responses.push(rpc_response::Response::ModelsDownload(
                        models_proto::ModelsDownloadResponse {
                            header: ok_header(),
                            details: first.then(|| details.clone()),
                            data: chunk.to_vec(),
                        },
                    ));
                    first = false;
                }
            }
            // Unknown model: finish with no frames at all.
        }
        rpc_request::Request::Stop(_) => {
            responses.push(rpc_response::Response::Stop(platform_proto::StopResponse {
                header: ok_header(),
            }));
        }
        rpc_request::Request::Utilization(_) => {
            responses.push(rpc_response::Response::Utilization(
                platform_proto::UtilizationResponse {
                    header: ok_header(),
                    gpu_metrics: vec![platform_proto::GpuUtilization {
                        node_id: 0,
                        pcie_id: "0000:00:1e.0".to_string(),
                        compute_utilization: 0.25,
                        memory_free: 8 * 1024 * 1024 * 1024,
                        memory_used: 2 * 1024 * 1024 * 1024,
                        memory_utilization: 0.2,
                        timestamp: "63763345820".to_string(),
                        process_details: vec![],
                    }],
                },
            ));
        }
        other => panic!("unhandled request variant: {:?}", std::mem::discriminant(other)),
    }

    for response in responses {
        let envelope = RpcResponse {
            response: Some(response),
        };
        let frame = Frame::response(&envelope).expect("encode response");
        stream.write_frame(&frame).await.expect("write response");
    }
    stream.finish().expect("finish stream");
}

async fn start_server() -> (Arc<ClaraServer>, SocketAddr, BlobStore) {
    let server =
        Arc::new(ClaraServer::localhost("127.0.0.1:0".parse().unwrap()).expect("start server"));
    let addr = server.local_addr().expect("server address");
    let store: BlobStore = Arc::new(Mutex::new(HashMap::new()));

    let run_server = Arc::clone(&server);
    let run_store = Arc::clone(&store);
    tokio::spawn(async move {
        let store = run_store;
        run_server
            .run(move |conn| {
                let store = Arc::clone(&store);
                async move {
                    conn.run(move |stream| {
                        let store = Arc::clone(&store);
                        handle_stream(stream, store)
                    })
                    .await;
                }
            })
            .await
            .ok();
    });

    (server, addr, store)
}

fn config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig::localhost().with_server_addr(addr)
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("clara-sdk-{}-{}", std::process::id(), name))
}

#[tokio::test]
async fn test_create_job_and_read_status() {
    let (server, addr, _store) = start_server().await;
    let jobs = JobsClient::new(&config_for(addr)).unwrap();

    let pipeline_id = PipelineId::new(PIPELINE_ID).unwrap();
    let job = jobs
        .create_job(
            "test job",
            &pipeline_id,
            JobPriority::Normal,
            &[],
            HashMap::new(),
        )
        .await
        .unwrap();
    assert_eq!(job.job_id.value(), JOB_ID);
    assert_eq!(job.payload_id.value(), PAYLOAD_ID);
    assert_eq!(job.pipeline_id.value(), PIPELINE_ID);
    assert_eq!(job.name, "test job");
    // A freshly created job is always pending and healthy.
    assert_eq!(job.state, JobState::Pending);
    assert_eq!(job.status, JobStatus::Healthy);
    assert_eq!(job.priority, JobPriority::Normal);

    let details = jobs.get_status(&job.job_id).await.unwrap();
    assert_eq!(details.name, "test job");
    assert_eq!(details.state, JobState::Pending);
    assert_eq!(details.status, JobStatus::Healthy);
    assert_eq!(details.pipeline_id.value(), PIPELINE_ID);
    assert!(details.created.is_some());
    assert!(details.started.is_none());

    jobs.close().await;
    server.close();
}

#[tokio::test]
async fn test_remote_failure_surfaces_as_error() {
    let (server, addr, _store) = start_server().await;
    let jobs = JobsClient::new(&config_for(addr)).unwrap();

    let pipeline_id = PipelineId::new("does-not-exist").unwrap();
    let result = jobs
        .create_job(
            "test job",
            &pipeline_id,
            JobPriority::Normal,
            &[],
            HashMap::new(),
        )
        .await;

    match result {
        Err(ClaraError::Remote { code, message }) => {
            assert_eq!(code, -1);
            assert_eq!(message, "no such pipeline");
        }
        other => panic!("expected remote error, got {:?}", other.map(|_| ())),
    }

    jobs.close().await;
    server.close();
}

#[tokio::test]
async fn test_upload_download_round_trip() {
    let (server, addr, _store) = start_server().await;
    let payloads = PayloadsClient::new(&config_for(addr)).unwrap();
    let payload_id = PayloadId::new(PAYLOAD_ID).unwrap();

    // Three chunks: two full plus a remainder.
    let content: Vec<u8> = (0..(CHUNK_SIZE * 2 + 1234)).map(|i| (i % 251) as u8).collect();
    let details = PayloadFileDetails {
        mode: 0o644,
        name: "./input/image.mhd".to_string(),
        size: content.len() as u64,
    };

    let uploaded = payloads
        .upload(&payload_id, &details, &content[..])
        .await
        .unwrap();
    assert_eq!(uploaded.name, "./input/image.mhd");
    assert_eq!(uploaded.size, content.len() as u64);

    let mut downloaded = Vec::new();
    let fetched = payloads
        .download_to(&payload_id, "./input/image.mhd", &mut downloaded)
        .await
        .unwrap()
        .expect("blob should exist");
    assert_eq!(fetched.size, content.len() as u64);
    assert_eq!(downloaded, content);

    payloads.close().await;
    server.close();
}

#[tokio::test]
async fn test_download_unknown_blob_is_none() {
    let (server, addr, _store) = start_server().await;
    let payloads = PayloadsClient::new(&config_for(addr)).unwrap();
    let payload_id = PayloadId::new(PAYLOAD_ID).unwrap();

    let mut dest = Vec::new();
    let fetched = payloads
        .download_to(&payload_id, "no/such/blob", &mut dest)
        .await
        .unwrap();
    assert!(fetched.is_none());
    assert!(dest.is_empty());

    payloads.close().await;
    server.close();
}

#[tokio::test]
async fn test_list_jobs_skips_placeholder_entries() {
    let (server, addr, _store) = start_server().await;
    let jobs = JobsClient::new(&config_for(addr)).unwrap();

    // The server streams one real entry plus one placeholder with an empty
    // job identifier; only the real entry is a result.
    let listing = jobs.list_jobs(None).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].job_id.value(), JOB_ID);
    assert_eq!(listing[0].state, JobState::Running);

    jobs.close().await;
    server.close();
}

#[tokio::test]
async fn test_metadata_request_carries_header() {
    let (server, addr, _store) = start_server().await;
    let jobs = JobsClient::new(&config_for(addr)).unwrap();
    let job_id = JobId::new(JOB_ID).unwrap();

    // The server rejects metadata requests without the common header.
    let mut metadata = HashMap::new();
    metadata.insert("study".to_string(), "abdomen".to_string());
    let merged = jobs.add_metadata(&job_id, metadata).await.unwrap();
    assert_eq!(merged.get("study").map(String::as_str), Some("abdomen"));
    assert_eq!(merged.get("source").map(String::as_str), Some("platform"));

    jobs.close().await;
    server.close();
}

#[tokio::test]
async fn test_download_file_streams_to_disk() {
    let (server, addr, _store) = start_server().await;
    let payloads = PayloadsClient::new(&config_for(addr)).unwrap();
    let payload_id = PayloadId::new(PAYLOAD_ID).unwrap();

    let content: Vec<u8> = (0..(CHUNK_SIZE + 512)).map(|i| (i % 241) as u8).collect();
    let details = PayloadFileDetails {
        mode: 0o644,
        name: "./output/result.raw".to_string(),
        size: content.len() as u64,
    };
    payloads
        .upload(&payload_id, &details, &content[..])
        .await
        .unwrap();

    let dest = temp_path("blob-dst.raw");
    let fetched = payloads
        .download_file(&payload_id, "./output/result.raw", &dest)
        .await
        .unwrap()
        .expect("blob should exist");
    assert_eq!(fetched.size, content.len() as u64);
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), content);

    tokio::fs::remove_file(&dest).await.unwrap();
    payloads.close().await;
    server.close();
}

#[tokio::test]
async fn test_download_file_unknown_blob_leaves_no_file() {
    let (server, addr, _store) = start_server().await;
    let payloads = PayloadsClient::new(&config_for(addr)).unwrap();
    let payload_id = PayloadId::new(PAYLOAD_ID).unwrap();

    let dest = temp_path("blob-missing.raw");
    let fetched = payloads
        .download_file(&payload_id, "no/such/blob", &dest)
        .await
        .unwrap();
    assert!(fetched.is_none());
    assert!(tokio::fs::metadata(&dest).await.is_err());

    payloads.close().await;
    server.close();
}

#[tokio::test]
async fn test_model_file_round_trip() {
    let (server, addr, _store) = start_server().await;
    let models = ModelsClient::new(&config_for(addr)).unwrap();

    let content: Vec<u8> = (0..(CHUNK_SIZE + 77)).map(|i| (i % 239) as u8).collect();
    let source = temp_path("model-src.bin");
    tokio::fs::write(&source, &content).await.unwrap();

    let details = ModelDetails {
        model_id: None,
        name: "segmenter".to_string(),
        model_type: ModelType::TensorRt,
        tags: HashMap::new(),
        metadata: HashMap::new(),
    };
    let uploaded = models.upload_model_file(&details, &source).await.unwrap();
    assert_eq!(uploaded.model_id.as_ref().unwrap().value(), MODEL_ID);

    let dest = temp_path("model-dst.bin");
    let model_id = ModelId::new(MODEL_ID).unwrap();
    let fetched = models
        .download_model_file(&model_id, &dest)
        .await
        .unwrap()
        .expect("model should exist");
    assert_eq!(fetched.name, "segmenter");
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), content);

    tokio::fs::remove_file(&source).await.unwrap();
    tokio::fs::remove_file(&dest).await.unwrap();
    models.close().await;
    server.close();
}

#[tokio::test]
async fn test_download_model_file_unknown_leaves_no_file() {
    let (server, addr, _store) = start_server().await;
    let models = ModelsClient::new(&config_for(addr)).unwrap();

    let missing = ModelId::new("ffffffffffffffffffffffffffffffff").unwrap();
    let dest = temp_path("model-missing.bin");
    let fetched = models.download_model_file(&missing, &dest).await.unwrap();
    assert!(fetched.is_none());
    assert!(tokio::fs::metadata(&dest).await.is_err());

    models.close().await;
    server.close();
}

#[tokio::test]
async fn test_platform_stop_and_utilization() {
    let (server, addr, _store) = start_server().await;
    let client = ClaraClient::new(&config_for(addr)).unwrap();

    let metrics = client.list_utilization().await.unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].pcie_id, "0000:00:1e.0");
    assert!(metrics[0].timestamp.is_some());

    client.stop().await.unwrap();

    client.close().await;
    server.close();
}

#[tokio::test]
async fn test_closed_client_then_reconnect_round_trip() {
    let (server, addr, _store) = start_server().await;
    let jobs = JobsClient::new(&config_for(addr)).unwrap();
    let pipeline_id = PipelineId::new(PIPELINE_ID).unwrap();

    jobs.close().await;
    let result = jobs
        .create_job(
            "test job",
            &pipeline_id,
            JobPriority::Normal,
            &[],
            HashMap::new(),
        )
        .await;
    assert!(matches!(result, Err(ClaraError::InvalidOperation(_))));

    jobs.reconnect();
    let job = jobs
        .create_job(
            "test job",
            &pipeline_id,
            JobPriority::Normal,
            &[],
            HashMap::new(),
        )
        .await
        .unwrap();
    assert_eq!(job.job_id.value(), JOB_ID);

    jobs.close().await;
    server.close();
}
