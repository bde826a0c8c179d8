//! Request body sources and their header effects.

use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::HeaderMap;
use oss_client_core::hash::base64_md5;
use oss_client_core::{ByteStream, Context, HttpBody, Result};

use crate::constants::CONTENT_MD5;

/// Where one request's body comes from.
pub enum BodySource {
    /// No body at all.
    Empty,
    /// In-memory bytes. `Content-Length` and `Content-Md5` derive from
    /// them.
    Buffer(Bytes),
    /// A local file. It is stat'ed for `Content-Length` before any byte
    /// moves, then streamed in chunks.
    File(PathBuf),
    /// Caller produced chunks. Nothing is derived: supply
    /// `Content-Length` or `Content-Md5` yourself if the service
    /// requires them for the call.
    Stream(ByteStream),
}

impl fmt::Debug for BodySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodySource::Empty => f.write_str("BodySource::Empty"),
            BodySource::Buffer(bs) => f.debug_tuple("BodySource::Buffer").field(&bs.len()).finish(),
            BodySource::File(path) => f.debug_tuple("BodySource::File").field(path).finish(),
            BodySource::Stream(_) => f.write_str("BodySource::Stream"),
        }
    }
}

impl From<Bytes> for BodySource {
    fn from(bs: Bytes) -> Self {
        BodySource::Buffer(bs)
    }
}

impl From<Vec<u8>> for BodySource {
    fn from(v: Vec<u8>) -> Self {
        BodySource::Buffer(Bytes::from(v))
    }
}

impl From<String> for BodySource {
    fn from(s: String) -> Self {
        BodySource::Buffer(Bytes::from(s))
    }
}

impl From<&'static str> for BodySource {
    fn from(s: &'static str) -> Self {
        BodySource::Buffer(Bytes::from_static(s.as_bytes()))
    }
}

impl From<PathBuf> for BodySource {
    fn from(path: PathBuf) -> Self {
        BodySource::File(path)
    }
}

/// Apply a body's header effects and hand back the transport body.
///
/// Buffer bodies get `Content-Length` and a base64 `Content-Md5`. File
/// bodies get `Content-Length` from a stat, so a bad path fails before
/// any request goes out, plus an extension guessed `Content-Type` when
/// none was supplied. Stream bodies pass through untouched.
pub(crate) async fn resolve(
    body: BodySource,
    headers: &mut HeaderMap,
    ctx: &Context,
) -> Result<HttpBody> {
    match body {
        BodySource::Empty => Ok(HttpBody::Empty),
        BodySource::Buffer(bytes) => {
            headers.insert(CONTENT_LENGTH, bytes.len().into());
            headers.insert(CONTENT_MD5, base64_md5(&bytes).parse()?);
            Ok(HttpBody::Full(bytes))
        }
        BodySource::File(path) => {
            let size = ctx.file_size(&path).await?;
            headers.insert(CONTENT_LENGTH, size.into());
            if !headers.contains_key(CONTENT_TYPE) {
                if let Some(mime) = mime_guess::from_path(&path).first_raw() {
                    headers.insert(CONTENT_TYPE, mime.parse()?);
                }
            }
            Ok(HttpBody::Stream(ctx.file_read(&path).await?))
        }
        BodySource::Stream(stream) => Ok(HttpBody::Stream(stream)),
    }
}
