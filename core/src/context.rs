use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

use crate::env::{Env, NoopEnv};
use crate::fs::{FileIo, NoopFileIo};
use crate::http::{ByteStream, HttpBody, HttpSend, NoopHttpSend};
use crate::Result;

/// Context holds the I/O implementations every operation runs through.
///
/// ## Important
///
/// No real implementations are wired in by default. Users MUST configure
/// the components their operations touch; an unconfigured component is a
/// no-op implementation that returns errors when called.
///
/// ## Example
///
/// ```
/// use oss_client_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// ```
#[derive(Clone)]
pub struct Context {
    fs: Arc<dyn FileIo>,
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("fs", &self.fs)
            .field("http", &self.http)
            .field("env", &self.env)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op implementations.
    pub fn new() -> Self {
        Self {
            fs: Arc::new(NoopFileIo),
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
        }
    }

    /// Replace the file io implementation.
    pub fn with_file_io(mut self, fs: impl FileIo) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Size of the file at `path` in bytes.
    #[inline]
    pub async fn file_size(&self, path: &Path) -> Result<u64> {
        self.fs.file_size(path).await
    }

    /// Open the file at `path` as a chunk stream.
    #[inline]
    pub async fn file_read(&self, path: &Path) -> Result<ByteStream> {
        self.fs.file_read(path).await
    }

    /// Drain `body` into the file at `path` and flush it.
    #[inline]
    pub async fn file_write(&self, path: &Path, body: ByteStream) -> Result<u64> {
        self.fs.file_write(path, body).await
    }

    /// Send an http request and return the response.
    #[inline]
    pub async fn http_send(
        &self,
        req: http::Request<HttpBody>,
    ) -> Result<http::Response<HttpBody>> {
        self.http.http_send(req).await
    }

    /// Get an environment variable.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_context_errors_on_use() {
        let ctx = Context::new();

        assert!(ctx.file_size(Path::new("/nonexistent")).await.is_err());

        let req = http::Request::builder()
            .uri("http://localhost/")
            .body(HttpBody::Empty)
            .unwrap();
        assert!(ctx.http_send(req).await.is_err());

        assert!(ctx.env_var("HOME").is_none());
    }
}
