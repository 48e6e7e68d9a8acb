// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Wire format for QUIC stream framing.
//!
//! Each QUIC stream carries one RPC call with the following frame format:
//! - 4 bytes: message length (big-endian)
//! - 2 bytes: message type
//! - N bytes: protobuf payload

use bytes::{Buf, BufMut, Bytes, BytesMut};
use prost::Message;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum frame size (64 MB)
pub const MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

/// Frame header size (4 bytes length + 2 bytes type)
pub const HEADER_SIZE: usize = 6;

/// Message types for the wire protocol.
///
/// Streaming calls reuse `Request`/`Response` frames; the end of a stream
/// is signaled by finishing the QUIC send side, not by a frame type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum MessageType {
    /// Request message
    Request = 1,
    /// Response message
    Response = 2,
    /// Error response
    Error = 3,
}

impl TryFrom<u16> for MessageType {
    type Error = FrameError;

    fn try_from(value: u16) -> Result<Self, <Self as TryFrom<u16>>::Error> {
        match value {
            1 => Ok(MessageType::Request),
            2 => Ok(MessageType::Response),
            3 => Ok(MessageType::Error),
            _ => Err(FrameError::InvalidMessageType(value)),
        }
    }
}

/// Errors that can occur during frame encoding/decoding
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame too large: {0} bytes (max: {MAX_FRAME_SIZE})")]
    FrameTooLarge(usize),

    #[error("invalid message type: {0}")]
    InvalidMessageType(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("connection closed")]
    ConnectionClosed,
}

/// A framed message with type and payload
#[derive(Debug, Clone)]
pub struct Frame {
    pub message_type: MessageType,
    pub payload: Bytes,
}

impl Frame {
    /// Create a new request frame
    pub fn request<M: Message>(msg: &M) -> Result<Self, FrameError> {
        Self::new(MessageType::Request, msg)
    }

    /// Create a new response frame
    pub fn response<M: Message>(msg: &M) -> Result<Self, FrameError> {
        Self::new(MessageType::Response, msg)
    }

    /// Create a new error frame
    pub fn error<M: Message>(msg: &M) -> Result<Self, FrameError> {
        Self::new(MessageType::Error, msg)
    }

    /// Create a new frame with the given type and message
    pub fn new<M: Message>(message_type: MessageType, msg: &M) -> Result<Self, FrameError> {
        let payload = msg.encode_to_vec();
        if payload.len() > MAX_FRAME_SIZE {
            return Err(FrameError::FrameTooLarge(payload.len()));
        }
        Ok(Self {
            message_type,
            payload: Bytes::from(payload),
        })
    }

    /// Decode the payload as a protobuf message
    pub fn decode<M: Message + Default>(&self) -> Result<M, FrameError> {
        Ok(M::decode(self.payload.clone())?)
    }

    /// Encode the frame to bytes for wire transmission
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_SIZE + self.payload.len());
        buf.put_u32(self.payload.len() as u32);
        buf.put_u16(self.message_type as u16);
        buf.put(self.payload.clone());
        buf.freeze()
    }

    /// Decode a frame from bytes
    pub fn decode_from_bytes(mut bytes: Bytes) -> Result<Self, FrameError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FrameError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "incomplete frame header",
            )));
        }

        let length = bytes.get_u32() as usize;
        let message_type = MessageType::try_from(bytes.get_u16())?;

        if length > MAX_FRAME_SIZE {
            return Err(FrameError::FrameTooLarge(length));
        }

        if bytes.len() < length {
            return Err(FrameError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "incomplete frame payload",
            )));
        }

        let payload = bytes.split_to(length);
        Ok(Self {
            message_type,
            payload,
        })
    }
}

/// Write a frame to an async writer
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    frame: &Frame,
) -> Result<(), FrameError> {
    let encoded = frame.encode();
    writer.write_all(&encoded).await?;
    Ok(())
}

/// Read a frame from an async reader
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Frame, FrameError> {
    // Read header
    let mut header = [0u8; HEADER_SIZE];
    match reader.read_exact(&mut header).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(FrameError::ConnectionClosed);
        }
        Err(e) => return Err(e.into()),
    }

    let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let message_type = MessageType::try_from(u16::from_be_bytes([header[4], header[5]]))?;

    if length > MAX_FRAME_SIZE {
        return Err(FrameError::FrameTooLarge(length));
    }

    // Read payload
    let mut payload = vec![0u8; length];
    reader.read_exact(&mut payload).await?;

    Ok(Frame {
        message_type,
        payload: Bytes::from(payload),
    })
}

/// Framed codec for encoding/decoding frames on a stream
pub struct FramedStream<S> {
    stream: S,
}

impl<S> FramedStream<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: AsyncRead + Unpin> FramedStream<S> {
    /// Read the next frame from the stream
    pub async fn read_frame(&mut self) -> Result<Frame, FrameError> {
        read_frame(&mut self.stream).await
    }
}

impl<S: AsyncWrite + Unpin> FramedStream<S> {
    /// Write a frame to the stream
    pub async fn write_frame(&mut self, frame: &Frame) -> Result<(), FrameError> {
        write_frame(&mut self.stream, frame).await
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> FramedStream<S> {
    /// Send a request and wait for a response
    pub async fn request<Req: Message, Resp: Message + Default>(
        &mut self,
        request: &Req,
    ) -> Result<Resp, FrameError> {
        let frame = Frame::request(request)?;
        self.write_frame(&frame).await?;

        let response_frame = self.read_frame().await?;
        match response_frame.message_type {
            MessageType::Response => response_frame.decode(),
            MessageType::Error => Err(FrameError::Io(std::io::Error::other(
                "received error response",
            ))),
            _ => Err(FrameError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "unexpected message type",
            ))),
        }
    }

    /// Send a response
    pub async fn respond<Resp: Message>(&mut self, response: &Resp) -> Result<(), FrameError> {
        let frame = Frame::response(response)?;
        self.write_frame(&frame).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_proto::{Identifier, ResponseHeader};
    use crate::jobs_proto::JobsCreateResponse;
    use crate::payloads_proto::PayloadsUploadRequest;
    use crate::pipelines_proto::PipelinesListRequest;

    fn sample_response() -> JobsCreateResponse {
        JobsCreateResponse {
            header: Some(ResponseHeader {
                code: 0,
                messages: Vec::new(),
            }),
            job_id: Some(Identifier {
                value: "432b274a8f754968888807fe1eba237b".to_string(),
            }),
            payload_id: Some(Identifier {
                value: "7ac5c691e13d4f45894a3a70d9925936".to_string(),
            }),
        }
    }

    #[test]
    fn test_message_type_round_trip() {
        for &mt in &[MessageType::Request, MessageType::Response, MessageType::Error] {
            let value = mt as u16;
            let decoded = MessageType::try_from(value).unwrap();
            assert_eq!(mt, decoded);
        }
    }

    #[test]
    fn test_frame_encode_decode() {
        let msg = PipelinesListRequest { header: None };
        let frame = Frame::request(&msg).unwrap();
        let encoded = frame.encode();
        let decoded = Frame::decode_from_bytes(encoded).unwrap();

        assert_eq!(frame.message_type, decoded.message_type);
        assert_eq!(frame.payload, decoded.payload);
    }

    #[test]
    fn test_max_frame_size_constant() {
        assert_eq!(MAX_FRAME_SIZE, 64 * 1024 * 1024);
    }

    #[test]
    fn test_header_size_constant() {
        // 4 bytes length + 2 bytes type
        assert_eq!(HEADER_SIZE, 6);
    }

    #[test]
    fn test_message_type_values() {
        assert_eq!(MessageType::Request as u16, 1);
        assert_eq!(MessageType::Response as u16, 2);
        assert_eq!(MessageType::Error as u16, 3);
    }

    #[test]
    fn test_message_type_invalid_conversion() {
        assert!(MessageType::try_from(0u16).is_err());
        assert!(MessageType::try_from(4u16).is_err());
        assert!(MessageType::try_from(u16::MAX).is_err());
    }

    #[test]
    fn test_frame_error_display_frame_too_large() {
        let err = FrameError::FrameTooLarge(100_000_000);
        let msg = format!("{}", err);
        assert!(msg.contains("frame too large"));
        assert!(msg.contains("100000000"));
        assert!(msg.contains(&MAX_FRAME_SIZE.to_string()));
    }

    #[test]
    fn test_frame_error_display_invalid_message_type() {
        let err = FrameError::InvalidMessageType(42);
        let msg = format!("{}", err);
        assert!(msg.contains("invalid message type"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn test_frame_error_display_connection_closed() {
        let err = FrameError::ConnectionClosed;
        assert!(format!("{}", err).contains("connection closed"));
    }

    #[test]
    fn test_frame_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let frame_err: FrameError = io_err.into();
        match frame_err {
            FrameError::Io(_) => {}
            _ => panic!("Expected FrameError::Io"),
        }
    }

    #[test]
    fn test_frame_creation_all_types() {
        let msg = PipelinesListRequest { header: None };

        for &mt in &[MessageType::Request, MessageType::Response, MessageType::Error] {
            let frame = Frame::new(mt, &msg).unwrap();
            assert_eq!(frame.message_type, mt);
        }
    }

    #[test]
    fn test_frame_decode_payload() {
        let original = sample_response();
        let frame = Frame::response(&original).unwrap();
        let decoded: JobsCreateResponse = frame.decode().unwrap();
        assert_eq!(decoded.job_id, original.job_id);
        assert_eq!(decoded.payload_id, original.payload_id);
        assert_eq!(decoded.header.unwrap().code, 0);
    }

    #[test]
    fn test_frame_encode_structure() {
        let frame = Frame::response(&sample_response()).unwrap();
        let encoded = frame.encode();

        assert!(encoded.len() >= HEADER_SIZE);

        // First 4 bytes are the payload length (big-endian)
        let length = u32::from_be_bytes([encoded[0], encoded[1], encoded[2], encoded[3]]) as usize;
        assert_eq!(length, frame.payload.len());

        // Bytes 4-5 are the message type
        let msg_type = u16::from_be_bytes([encoded[4], encoded[5]]);
        assert_eq!(msg_type, MessageType::Response as u16);

        assert_eq!(encoded.len(), HEADER_SIZE + frame.payload.len());
    }

    #[test]
    fn test_frame_with_chunk_payload() {
        // An upload request carrying a full 64 KiB chunk
        let msg = PayloadsUploadRequest {
            header: None,
            payload_id: Some(Identifier {
                value: "payload-1".to_string(),
            }),
            details: None,
            data: vec![0xAB; 64 * 1024],
        };
        let frame = Frame::request(&msg).unwrap();
        assert!(frame.payload.len() > 64 * 1024);

        let encoded = frame.encode();
        let decoded = Frame::decode_from_bytes(encoded).unwrap();
        assert_eq!(frame.payload, decoded.payload);

        let round_tripped: PayloadsUploadRequest = decoded.decode().unwrap();
        assert_eq!(round_tripped.data, msg.data);
    }

    #[test]
    fn test_decode_from_bytes_incomplete_header() {
        let bytes = Bytes::from_static(&[0, 0, 0]); // only 3 bytes, need 6
        let result = Frame::decode_from_bytes(bytes);
        match result.unwrap_err() {
            FrameError::Io(e) => {
                assert!(e.to_string().contains("incomplete frame header"));
            }
            _ => panic!("Expected Io error with incomplete header message"),
        }
    }

    #[test]
    fn test_decode_from_bytes_incomplete_payload() {
        // Header claims 100 bytes of payload but only 10 follow
        let mut bytes = BytesMut::new();
        bytes.put_u32(100);
        bytes.put_u16(1);
        bytes.put(&[0u8; 10][..]);

        let result = Frame::decode_from_bytes(bytes.freeze());
        match result.unwrap_err() {
            FrameError::Io(e) => {
                assert!(e.to_string().contains("incomplete frame payload"));
            }
            _ => panic!("Expected Io error with incomplete payload message"),
        }
    }

    #[test]
    fn test_decode_from_bytes_invalid_message_type() {
        let mut bytes = BytesMut::new();
        bytes.put_u32(0);
        bytes.put_u16(99);

        match Frame::decode_from_bytes(bytes.freeze()).unwrap_err() {
            FrameError::InvalidMessageType(99) => {}
            _ => panic!("Expected InvalidMessageType error"),
        }
    }

    #[test]
    fn test_decode_from_bytes_frame_too_large() {
        let mut bytes = BytesMut::new();
        bytes.put_u32((MAX_FRAME_SIZE + 1) as u32);
        bytes.put_u16(1);

        match Frame::decode_from_bytes(bytes.freeze()).unwrap_err() {
            FrameError::FrameTooLarge(size) => assert_eq!(size, MAX_FRAME_SIZE + 1),
            _ => panic!("Expected FrameTooLarge error"),
        }
    }

    #[test]
    fn test_decode_from_bytes_empty_payload() {
        let mut bytes = BytesMut::new();
        bytes.put_u32(0);
        bytes.put_u16(1);

        let frame = Frame::decode_from_bytes(bytes.freeze()).unwrap();
        assert_eq!(frame.message_type, MessageType::Request);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_decode_from_bytes_with_extra_data() {
        // A valid frame followed by trailing bytes, which are ignored
        let mut bytes = BytesMut::new();
        bytes.put_u32(5);
        bytes.put_u16(2);
        bytes.put(&[1, 2, 3, 4, 5][..]);
        bytes.put(&[99, 99, 99][..]);

        let frame = Frame::decode_from_bytes(bytes.freeze()).unwrap();
        assert_eq!(frame.message_type, MessageType::Response);
        assert_eq!(&frame.payload[..], &[1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_read_write_frame() {
        use tokio::io::duplex;

        let frame = Frame::response(&sample_response()).unwrap();
        let (mut writer, mut reader) = duplex(1024);

        write_frame(&mut writer, &frame).await.unwrap();

        let read_back = read_frame(&mut reader).await.unwrap();
        assert_eq!(frame.message_type, read_back.message_type);
        assert_eq!(frame.payload, read_back.payload);
    }

    #[tokio::test]
    async fn test_read_frame_connection_closed() {
        use tokio::io::duplex;

        let (_, mut reader) = duplex(1024);
        // Writer is dropped, reader will get EOF

        match read_frame(&mut reader).await.unwrap_err() {
            FrameError::ConnectionClosed => {}
            e => panic!("Expected ConnectionClosed, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_write_read_multiple_frames() {
        use tokio::io::duplex;

        let (mut writer, mut reader) = duplex(4096);

        let req = PipelinesListRequest { header: None };
        let frame1 = Frame::request(&req).unwrap();
        let frame2 = Frame::response(&sample_response()).unwrap();

        write_frame(&mut writer, &frame1).await.unwrap();
        write_frame(&mut writer, &frame2).await.unwrap();
        drop(writer); // signal EOF

        let read1 = read_frame(&mut reader).await.unwrap();
        let read2 = read_frame(&mut reader).await.unwrap();

        assert_eq!(read1.message_type, MessageType::Request);
        assert_eq!(read2.message_type, MessageType::Response);
    }

    #[tokio::test]
    async fn test_framed_stream_read_write() {
        use tokio::io::duplex;

        let (writer, reader) = duplex(1024);
        let mut writer_framed = FramedStream::new(writer);
        let mut reader_framed = FramedStream::new(reader);

        let frame = Frame::request(&PipelinesListRequest { header: None }).unwrap();

        writer_framed.write_frame(&frame).await.unwrap();
        drop(writer_framed); // signal EOF on the writing end

        let read_back = reader_framed.read_frame().await.unwrap();
        assert_eq!(frame.message_type, read_back.message_type);
    }

    #[test]
    fn test_framed_stream_into_inner() {
        let data = "test data".to_string();
        let framed = FramedStream::new(data.clone());
        assert_eq!(framed.into_inner(), data);
    }
}
