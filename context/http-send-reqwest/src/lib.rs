//! Reqwest based HTTP transport for the OSS client.
//!
//! This crate provides [`ReqwestHttpSend`], the [`HttpSend`]
//! implementation that executes exchanges over a shared
//! `reqwest::Client`. Request bodies stream straight through
//! `reqwest::Body::wrap_stream` and response bodies surface as chunk
//! streams, so downloads can flow into a sink without buffering.
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use oss_client_core::Context;
//! use oss_client_http_send_reqwest::ReqwestHttpSend;
//!
//! # fn main() -> oss_client_core::Result<()> {
//! let http = ReqwestHttpSend::with_limits(Duration::from_secs(300), 20)?;
//! let ctx = Context::new().with_http_send(http);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use oss_client_core::{Error, HttpBody, HttpSend, Result};
use reqwest::Client;

/// Reqwest based implementation of the `HttpSend` trait.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a given reqwest::Client.
    ///
    /// Use this when the client needs settings beyond what
    /// [`ReqwestHttpSend::with_limits`] covers, e.g. a proxy.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a transport with a uniform per-request timeout and a capped
    /// connection pool.
    pub fn with_limits(timeout: Duration, max_connections: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(max_connections)
            .build()
            .map_err(|e| Error::transport("failed to build http client").with_source(e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<HttpBody>) -> Result<http::Response<HttpBody>> {
        let (parts, body) = req.into_parts();
        let body = match body {
            HttpBody::Empty => reqwest::Body::from(Vec::new()),
            HttpBody::Full(bs) => reqwest::Body::from(bs),
            HttpBody::Stream(s) => reqwest::Body::wrap_stream(s),
        };
        let req = reqwest::Request::try_from(http::Request::from_parts(parts, body))
            .map_err(|e| Error::transport("failed to build request").with_source(e))?;

        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to send request").with_source(e))?;

        let mut builder = http::Response::builder().status(resp.status());
        if let Some(headers) = builder.headers_mut() {
            *headers = resp.headers().clone();
        }
        let stream = resp
            .bytes_stream()
            .map_err(|e| Error::transport("failed to read response body").with_source(e));
        builder
            .body(HttpBody::Stream(Box::pin(stream)))
            .map_err(Error::from)
    }
}
