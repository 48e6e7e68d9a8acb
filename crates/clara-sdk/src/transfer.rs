// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Chunked content transfer over framed streams.
//!
//! Uploads and downloads move blob content in bounded chunks, one framed
//! message per chunk. The helpers here are generic over the message type so
//! payload and model transfers share the same loop; the caller supplies a
//! closure that wraps each chunk in the right envelope.

use clara_protocol::frame::{self, Frame, FrameError};
use prost::Message;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;

/// Upper bound on the content carried by one transfer message.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Read `source` to its end and write one framed message per chunk.
///
/// Chunks are at most [`CHUNK_SIZE`] bytes and a zero-length chunk is never
/// emitted: an empty source produces no messages at all. Returns the total
/// bytes and messages sent.
pub(crate) async fn send_chunks<R, W, M, F>(
    writer: &mut W,
    source: &mut R,
    mut wrap_chunk: F,
) -> Result<(u64, u64)>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    M: Message,
    F: FnMut(Vec<u8>) -> M,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut bytes_sent = 0u64;
    let mut chunks_sent = 0u64;

    loop {
        let n = source.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        let message = wrap_chunk(buf[..n].to_vec());
        let frame = Frame::request(&message)?;
        frame::write_frame(writer, &frame).await?;
        bytes_sent += n as u64;
        chunks_sent += 1;
    }

    Ok((bytes_sent, chunks_sent))
}

/// Read framed messages until the peer finishes the stream, appending each
/// message's content to `dest` in arrival order.
///
/// `unwrap_chunk` extracts the content (and, for the first message only, the
/// transfer metadata) from each message; validation failures it returns abort
/// the transfer. Returns `None` when the stream carried no messages at all.
pub(crate) async fn recv_chunks<R, W, M, T, F>(
    reader: &mut R,
    dest: &mut W,
    mut unwrap_chunk: F,
) -> Result<Option<T>>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    M: Message + Default,
    F: FnMut(M, bool) -> Result<(Option<T>, Vec<u8>)>,
{
    let mut metadata = None;
    let mut first = true;

    loop {
        let frame = match frame::read_frame(reader).await {
            Ok(frame) => frame,
            Err(FrameError::ConnectionClosed) => break,
            Err(e) => return Err(e.into()),
        };
        let message: M = frame.decode()?;
        let (meta, data) = unwrap_chunk(message, first)?;
        if first {
            metadata = meta;
            first = false;
        }
        if !data.is_empty() {
            dest.write_all(&data).await?;
        }
    }

    dest.flush().await?;
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clara_protocol::payloads_proto::{PayloadFileDetails, PayloadsDownloadResponse};

    #[tokio::test]
    async fn test_send_chunks_counts() {
        // 150000 bytes at 65536 per chunk is three messages.
        let content = vec![7u8; 150_000];
        let mut source = &content[..];
        let mut wire = Vec::new();

        let (bytes, chunks) = send_chunks(&mut wire, &mut source, |data| {
            PayloadsDownloadResponse {
                header: None,
                details: None,
                data,
            }
        })
        .await
        .unwrap();

        assert_eq!(bytes, 150_000);
        assert_eq!(chunks, 3);
    }

    #[tokio::test]
    async fn test_send_chunks_exact_multiple() {
        let content = vec![1u8; CHUNK_SIZE * 2];
        let mut source = &content[..];
        let mut wire = Vec::new();

        let (bytes, chunks) = send_chunks(&mut wire, &mut source, |data| {
            PayloadsDownloadResponse {
                header: None,
                details: None,
                data,
            }
        })
        .await
        .unwrap();

        assert_eq!(bytes, (CHUNK_SIZE * 2) as u64);
        assert_eq!(chunks, 2);
    }

    #[tokio::test]
    async fn test_send_chunks_empty_source() {
        let mut source: &[u8] = &[];
        let mut wire = Vec::new();

        let (bytes, chunks) = send_chunks(&mut wire, &mut source, |data| {
            PayloadsDownloadResponse {
                header: None,
                details: None,
                data,
            }
        })
        .await
        .unwrap();

        assert_eq!(bytes, 0);
        assert_eq!(chunks, 0);
        assert!(wire.is_empty());
    }

    #[tokio::test]
    async fn test_send_then_recv_reassembles() {
        let content: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let mut source = &content[..];
        let mut wire = Vec::new();

        let mut first_chunk = true;
        send_chunks(&mut wire, &mut source, |data| {
            let details = if first_chunk {
                first_chunk = false;
                Some(PayloadFileDetails {
                    mode: 0o644,
                    name: "input/image.mhd".to_string(),
                    size: content.len() as u64,
                })
            } else {
                None
            };
            PayloadsDownloadResponse {
                header: None,
                details,
                data,
            }
        })
        .await
        .unwrap();

        let mut reader = &wire[..];
        let mut dest = Vec::new();
        let details = recv_chunks(
            &mut reader,
            &mut dest,
            |message: PayloadsDownloadResponse, first| {
                let meta = if first { message.details } else { None };
                Ok((meta, message.data))
            },
        )
        .await
        .unwrap();

        assert_eq!(dest, content);
        let details = details.unwrap();
        assert_eq!(details.name, "input/image.mhd");
        assert_eq!(details.size, content.len() as u64);
    }

    #[tokio::test]
    async fn test_recv_chunks_empty_stream() {
        let mut reader: &[u8] = &[];
        let mut dest = Vec::new();
        let details = recv_chunks(
            &mut reader,
            &mut dest,
            |message: PayloadsDownloadResponse, first| {
                let meta = if first { message.details } else { None };
                Ok((meta, message.data))
            },
        )
        .await
        .unwrap();

        assert!(details.is_none());
        assert!(dest.is_empty());
    }

    #[tokio::test]
    async fn test_recv_chunks_preserves_order() {
        let mut wire = Vec::new();
        for i in 0..5u8 {
            let message = PayloadsDownloadResponse {
                header: None,
                details: None,
                data: vec![i; 3],
            };
            let frame = Frame::request(&message).unwrap();
            frame::write_frame(&mut wire, &frame).await.unwrap();
        }

        let mut reader = &wire[..];
        let mut dest = Vec::new();
        recv_chunks(
            &mut reader,
            &mut dest,
            |message: PayloadsDownloadResponse, _| Ok((None::<()>, message.data)),
        )
        .await
        .unwrap();

        assert_eq!(dest, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }
}
