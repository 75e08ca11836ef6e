//! Streaming response body
//!
//! The body is kept as a stream of chunks rather than a buffered `Vec<u8>` so
//! that callers can look at a bounded prefix (the write-path marker scan) and
//! drop the rest without ever reading it. Dropping a `ResponseBody` releases
//! the underlying connection.

use crate::error::{Result, TransportError};
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use std::fmt;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

/// Boxed chunk stream backing a [`ResponseBody`].
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Response body read incrementally from the transport.
pub struct ResponseBody {
    stream: BodyStream,
    /// Bytes pulled from the stream but not yet handed out
    pending: Bytes,
    cancel: Option<CancellationToken>,
}

impl ResponseBody {
    /// Wrap a chunk stream.
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self {
            stream: Box::pin(stream),
            pending: Bytes::new(),
            cancel: None,
        }
    }

    /// A body that is already fully in memory.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Self::empty();
        }
        Self::new(futures::stream::once(async move { Ok(bytes) }))
    }

    /// A body with no content.
    pub fn empty() -> Self {
        Self::new(futures::stream::empty())
    }

    /// Abort every subsequent read with [`TransportError::Canceled`] once
    /// `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Pull the next chunk, or `None` at end of stream.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>> {
        if !self.pending.is_empty() {
            return Ok(Some(std::mem::take(&mut self.pending)));
        }

        let next = self.stream.next();
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(TransportError::Canceled),
                item = next => item.transpose(),
            },
            None => next.await.transpose(),
        }
    }

    /// Read at most `limit` bytes.
    ///
    /// Returns fewer than `limit` bytes only when the stream ended first.
    /// Bytes beyond `limit` that arrived in the same chunk are retained for
    /// the next read.
    pub async fn read_up_to(&mut self, limit: usize) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(limit);
        while buf.len() < limit {
            let Some(chunk) = self.chunk().await? else {
                break;
            };
            let take = (limit - buf.len()).min(chunk.len());
            buf.extend_from_slice(&chunk[..take]);
            if take < chunk.len() {
                self.pending = chunk.slice(take..);
            }
        }
        Ok(buf.freeze())
    }

    /// Check whether any further bytes follow, without consuming them.
    pub async fn is_exhausted(&mut self) -> Result<bool> {
        loop {
            match self.chunk().await? {
                None => return Ok(true),
                Some(chunk) if chunk.is_empty() => continue,
                Some(chunk) => {
                    self.pending = chunk;
                    return Ok(false);
                }
            }
        }
    }

    /// Read the remaining body into memory.
    pub async fn bytes(mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody")
            .field("pending", &self.pending.len())
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}
