//! Tokio based file io for the OSS client.
//!
//! This crate provides [`TokioFileIo`], the [`FileIo`] implementation
//! that stats and streams upload bodies from disk and drains downloads
//! into local files. Reads hand out one chunk at a time so uploading a
//! large file never loads it whole.
//!
//! ## Example
//!
//! ```no_run
//! use oss_client_core::Context;
//! use oss_client_file_io_tokio::TokioFileIo;
//!
//! let ctx = Context::new().with_file_io(TokioFileIo);
//! ```

use std::path::Path;

use async_trait::async_trait;
use bytes::BytesMut;
use futures::stream;
use futures::TryStreamExt;
use oss_client_core::{ByteStream, Error, FileIo, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Upload bodies are read from disk in chunks of this size.
const CHUNK_SIZE: usize = 64 * 1024;

/// Tokio based implementation of the `FileIo` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileIo;

#[async_trait]
impl FileIo for TokioFileIo {
    async fn file_size(&self, path: &Path) -> Result<u64> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| Error::io(format!("failed to stat {}", path.display())).with_source(e))?;
        Ok(meta.len())
    }

    async fn file_read(&self, path: &Path) -> Result<ByteStream> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| Error::io(format!("failed to open {}", path.display())).with_source(e))?;

        let stream = stream::try_unfold(file, |mut file| async move {
            let mut buf = BytesMut::with_capacity(CHUNK_SIZE);
            let n = file
                .read_buf(&mut buf)
                .await
                .map_err(|e| Error::io("failed to read file").with_source(e))?;
            if n == 0 {
                Ok(None)
            } else {
                Ok(Some((buf.freeze(), file)))
            }
        });
        Ok(Box::pin(stream))
    }

    async fn file_write(&self, path: &Path, mut body: ByteStream) -> Result<u64> {
        let mut file = tokio::fs::File::create(path).await.map_err(|e| {
            Error::io(format!("failed to create {}", path.display())).with_source(e)
        })?;

        let mut written = 0u64;
        while let Some(chunk) = body.try_next().await? {
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::io("failed to write file").with_source(e))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| Error::io("failed to flush file").with_source(e))?;
        Ok(written)
    }
}
