//! Response envelopes and the classification pipeline.

use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use futures::TryStreamExt;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, StatusCode};
use oss_client_core::{Context, Error, HttpBody, Result};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::constants::APPLICATION_XML;
use crate::model::ErrorResponse;

/// Where a download lands instead of the response buffer.
pub enum Sink {
    /// Write into a file created at this path.
    File(PathBuf),
    /// Pipe into a caller supplied writer.
    Writer(Box<dyn AsyncWrite + Send + Unpin>),
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::File(path) => f.debug_tuple("Sink::File").field(path).finish(),
            Sink::Writer(_) => f.write_str("Sink::Writer"),
        }
    }
}

impl From<PathBuf> for Sink {
    fn from(path: PathBuf) -> Self {
        Sink::File(path)
    }
}

/// What one exchange produced.
#[derive(Debug)]
pub struct Response {
    /// HTTP status the service answered with.
    pub status: StatusCode,
    /// Response headers, service metadata included.
    pub headers: HeaderMap,
    /// The classified body.
    pub body: ResponseBody,
}

/// Classified response payload.
#[derive(Debug)]
pub enum ResponseBody {
    /// No bytes arrived, or they were drained into a sink.
    None,
    /// Raw payload the service did not mark as XML.
    Bytes(Bytes),
    /// Well-formed XML, decoded into a typed model on demand.
    Xml(Bytes),
}

impl Response {
    /// Raw view of the body, whatever its classification.
    pub fn bytes(&self) -> Option<&Bytes> {
        match &self.body {
            ResponseBody::None => None,
            ResponseBody::Bytes(bs) | ResponseBody::Xml(bs) => Some(bs),
        }
    }

    /// Decode the XML body into `T`.
    ///
    /// Fails when the body was not classified as XML or does not match
    /// the expected document shape.
    pub fn xml<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            ResponseBody::Xml(bs) => quick_xml::de::from_reader(bs.as_ref()).map_err(|e| {
                Error::xml_parse("response document has unexpected shape")
                    .with_status(self.status)
                    .with_source(e)
            }),
            _ => Err(Error::xml_parse("response body is not xml").with_status(self.status)),
        }
    }
}

/// Interpret one finished exchange.
///
/// With a sink the bytes drain into it uninterpreted, whatever the
/// status was, and success waits on the sink's flush. Without one,
/// empty and non-XML payloads pass through raw, XML payloads are
/// checked for well-formedness, and error statuses carrying XML turn
/// into structured errors.
pub(crate) async fn classify(
    ctx: &Context,
    resp: http::Response<HttpBody>,
    sink: Option<Sink>,
) -> Result<Response> {
    let (parts, body) = resp.into_parts();

    if let Some(sink) = sink {
        let mut stream = body.into_stream();
        match sink {
            Sink::File(path) => {
                ctx.file_write(&path, stream).await?;
            }
            Sink::Writer(mut writer) => {
                while let Some(chunk) = stream.try_next().await? {
                    writer
                        .write_all(&chunk)
                        .await
                        .map_err(|e| Error::io("failed to write to sink").with_source(e))?;
                }
                writer
                    .flush()
                    .await
                    .map_err(|e| Error::io("failed to flush sink").with_source(e))?;
            }
        }
        return Ok(Response {
            status: parts.status,
            headers: parts.headers,
            body: ResponseBody::None,
        });
    }

    let bytes = body.bytes().await?;
    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if bytes.is_empty() || content_type != APPLICATION_XML {
        let body = if bytes.is_empty() {
            ResponseBody::None
        } else {
            ResponseBody::Bytes(bytes)
        };
        return Ok(Response {
            status: parts.status,
            headers: parts.headers,
            body,
        });
    }

    validate_xml(&bytes).map_err(|e| e.with_status(parts.status))?;

    if parts.status.as_u16() >= 400 {
        return Err(api_error(parts.status, &bytes));
    }

    Ok(Response {
        status: parts.status,
        headers: parts.headers,
        body: ResponseBody::Xml(bytes),
    })
}

/// Walk the whole document once, so a later typed decode can only fail
/// on shape. The reader catches mismatched end tags itself; the depth
/// count catches documents truncated before their end tags.
fn validate_xml(bytes: &[u8]) -> Result<()> {
    use quick_xml::events::Event;

    let mut reader = quick_xml::Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut depth = 0u32;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => {
                if depth > 0 {
                    return Err(Error::xml_parse("response body ends inside an open element"));
                }
                return Ok(());
            }
            Ok(_) => {}
            Err(e) => {
                return Err(
                    Error::xml_parse("response body is not well-formed xml").with_source(e)
                );
            }
        }
        buf.clear();
    }
}

/// Map a well-formed 4xx/5xx document onto the error envelope.
fn api_error(status: StatusCode, bytes: &[u8]) -> Error {
    match quick_xml::de::from_reader::<_, ErrorResponse>(bytes) {
        Ok(envelope) => Error::api(status, envelope.code, envelope.message, envelope.request_id),
        Err(e) => {
            Error::api_malformed(status, "error status with unrecognizable error document")
                .with_source(e)
        }
    }
}
