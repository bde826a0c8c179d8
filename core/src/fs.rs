use std::fmt::Debug;
use std::path::Path;

use crate::http::ByteStream;
use crate::{Error, Result};

/// FileIo provides the filesystem access an object storage client needs:
/// stat before upload, chunked reads for upload bodies, and drained
/// writes for download destinations.
#[async_trait::async_trait]
pub trait FileIo: Debug + Send + Sync + 'static {
    /// Size of the file at `path` in bytes, without reading it.
    async fn file_size(&self, path: &Path) -> Result<u64>;

    /// Open the file at `path` and return its content as a chunk stream.
    async fn file_read(&self, path: &Path) -> Result<ByteStream>;

    /// Create or truncate the file at `path`, drain `body` into it and
    /// flush. Returns the number of bytes written. The returned future
    /// completes only after the flush finished.
    async fn file_write(&self, path: &Path, body: ByteStream) -> Result<u64>;
}

/// NoopFileIo is a no-op implementation that always returns an error.
///
/// This is used when no file io is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileIo;

#[async_trait::async_trait]
impl FileIo for NoopFileIo {
    async fn file_size(&self, _: &Path) -> Result<u64> {
        Err(Error::unexpected(
            "file io is not supported: no file io configured",
        ))
    }

    async fn file_read(&self, _: &Path) -> Result<ByteStream> {
        Err(Error::unexpected(
            "file io is not supported: no file io configured",
        ))
    }

    async fn file_write(&self, _: &Path, _: ByteStream) -> Result<u64> {
        Err(Error::unexpected(
            "file io is not supported: no file io configured",
        ))
    }
}
