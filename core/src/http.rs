use std::fmt;
use std::fmt::Debug;

use bytes::Bytes;
use bytes::BytesMut;
use futures::stream;
use futures::stream::BoxStream;
use futures::TryStreamExt;

use crate::{Error, Result};

/// Stream of body chunks flowing to or from the transport.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Request or response body handed across the transport boundary.
///
/// A body either carries its bytes up front or streams them. Streamed
/// bodies never pass through an intermediate buffer inside the client,
/// so a large upload or download costs one chunk of memory at a time.
pub enum HttpBody {
    /// No body at all.
    Empty,
    /// Fully buffered bytes.
    Full(Bytes),
    /// Chunks produced on demand.
    Stream(ByteStream),
}

impl HttpBody {
    /// Collect the whole body into memory.
    pub async fn bytes(self) -> Result<Bytes> {
        match self {
            HttpBody::Empty => Ok(Bytes::new()),
            HttpBody::Full(bs) => Ok(bs),
            HttpBody::Stream(mut s) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = s.try_next().await? {
                    buf.extend_from_slice(&chunk);
                }
                Ok(buf.freeze())
            }
        }
    }

    /// Turn the body into a stream of chunks.
    pub fn into_stream(self) -> ByteStream {
        match self {
            HttpBody::Empty => Box::pin(stream::empty()),
            HttpBody::Full(bs) => Box::pin(stream::once(async move { Ok(bs) })),
            HttpBody::Stream(s) => s,
        }
    }
}

impl Debug for HttpBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpBody::Empty => f.write_str("HttpBody::Empty"),
            HttpBody::Full(bs) => f.debug_tuple("HttpBody::Full").field(&bs.len()).finish(),
            HttpBody::Stream(_) => f.write_str("HttpBody::Stream"),
        }
    }
}

impl From<Bytes> for HttpBody {
    fn from(bs: Bytes) -> Self {
        HttpBody::Full(bs)
    }
}

/// HttpSend executes one HTTP exchange against the remote service.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send the request and return the response with a readable body.
    async fn http_send(&self, req: http::Request<HttpBody>) -> Result<http::Response<HttpBody>>;
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _: http::Request<HttpBody>) -> Result<http::Response<HttpBody>> {
        Err(Error::unexpected(
            "http sending is not supported: no http client configured",
        ))
    }
}
