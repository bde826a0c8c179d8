//! End to end flows over a mock transport.

use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context as TaskContext, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use http::header::CONTENT_TYPE;
use http::StatusCode;
use oss_client::{BodySource, Client, Config, ListObjectsQuery, ResponseBody, Sink};
use oss_client_core::{Context, ErrorKind, HttpBody, HttpSend, Result};
use oss_client_file_io_tokio::TokioFileIo;
use tokio::io::AsyncWrite;

/// Transport that replies with one canned response and records what it
/// saw.
#[derive(Debug, Clone)]
struct MockHttp {
    status: u16,
    content_type: Option<&'static str>,
    body: &'static [u8],
    /// Reply with the body split into single byte chunks.
    chunked: bool,
    calls: Arc<AtomicUsize>,
    last_uri: Arc<Mutex<Option<String>>>,
    last_body: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MockHttp {
    fn new(status: u16, content_type: Option<&'static str>, body: &'static [u8]) -> Self {
        Self {
            status,
            content_type,
            body,
            chunked: false,
            calls: Arc::new(AtomicUsize::new(0)),
            last_uri: Arc::new(Mutex::new(None)),
            last_body: Arc::new(Mutex::new(None)),
        }
    }

    fn chunked(mut self) -> Self {
        self.chunked = true;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_uri(&self) -> String {
        self.last_uri.lock().unwrap().clone().unwrap()
    }

    fn last_body(&self) -> Vec<u8> {
        self.last_body.lock().unwrap().clone().unwrap()
    }
}

#[async_trait]
impl HttpSend for MockHttp {
    async fn http_send(&self, req: http::Request<HttpBody>) -> Result<http::Response<HttpBody>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_uri.lock().unwrap() = Some(req.uri().to_string());

        let body = req.into_body().bytes().await?;
        *self.last_body.lock().unwrap() = Some(body.to_vec());

        let mut builder = http::Response::builder().status(self.status);
        if let Some(ct) = self.content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }

        let body = if self.chunked {
            let chunks: Vec<Result<Bytes>> = self
                .body
                .iter()
                .map(|b| Ok(Bytes::copy_from_slice(&[*b])))
                .collect();
            HttpBody::Stream(Box::pin(stream::iter(chunks)))
        } else {
            HttpBody::Full(Bytes::from_static(self.body))
        };
        Ok(builder.body(body).unwrap())
    }
}

/// Writer that records bytes and whether flush came after them.
#[derive(Clone, Default)]
struct MockWriter {
    state: Arc<Mutex<WriterState>>,
    fail_writes: bool,
}

#[derive(Default)]
struct WriterState {
    data: Vec<u8>,
    flushed: bool,
    bytes_seen_at_flush: Option<usize>,
}

impl AsyncWrite for MockWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _: &mut TaskContext<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if self.fail_writes {
            return Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, "disk full")));
        }
        let mut state = self.state.lock().unwrap();
        state.data.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        let mut state = self.state.lock().unwrap();
        state.flushed = true;
        state.bytes_seen_at_flush = Some(state.data.len());
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

fn client_over(http: MockHttp, ctx: Context) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config {
        access_key_id: Some("testAccessKeyId".to_string()),
        access_key_secret: Some("testAccessKeySecret".to_string()),
        ..Default::default()
    };
    Client::new(ctx.with_http_send(http), config).expect("client must build")
}

#[tokio::test]
async fn test_get_object_returns_raw_bytes() -> Result<()> {
    let http = MockHttp::new(200, Some("image/png"), b"PNGDATA");
    let client = client_over(http.clone(), Context::new());

    let resp = client
        .get_object("bucket", "img.png", Default::default())
        .await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.bytes().unwrap().as_ref(), b"PNGDATA");
    assert_eq!(
        http.last_uri(),
        "http://bucket.oss-cn-hangzhou.aliyuncs.com/img.png"
    );
    Ok(())
}

#[tokio::test]
async fn test_api_error_surfaces_code_and_request_id() {
    let body = b"<?xml version=\"1.0\"?>\
        <Error>\
        <Code>NoSuchBucket</Code>\
        <Message>The specified bucket does not exist.</Message>\
        <RequestId>52B155D2D8BD99A15D0005FF</RequestId>\
        </Error>";
    let http = MockHttp::new(404, Some("application/xml"), body).chunked();
    let client = client_over(http, Context::new());

    let err = client
        .get_object("missing", "key", Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.code(), Some("NoSuchBucket"));
    assert_eq!(err.request_id(), Some("52B155D2D8BD99A15D0005FF"));
    assert!(err.to_string().contains("NoSuchBucket"));
}

#[tokio::test]
async fn test_writer_sink_flushes_after_last_chunk() -> Result<()> {
    let http = MockHttp::new(200, Some("application/octet-stream"), b"streamed body").chunked();
    let client = client_over(http, Context::new());

    let writer = MockWriter::default();
    let resp = client
        .get_object_to(
            "bucket",
            "file.bin",
            Default::default(),
            Sink::Writer(Box::new(writer.clone())),
        )
        .await?;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(matches!(resp.body, ResponseBody::None));

    let state = writer.state.lock().unwrap();
    assert_eq!(state.data, b"streamed body");
    assert!(state.flushed);
    assert_eq!(state.bytes_seen_at_flush, Some(b"streamed body".len()));
    Ok(())
}

#[tokio::test]
async fn test_writer_sink_surfaces_write_errors() {
    let http = MockHttp::new(200, None, b"data");
    let client = client_over(http, Context::new());

    let writer = MockWriter {
        fail_writes: true,
        ..Default::default()
    };
    let err = client
        .get_object_to(
            "bucket",
            "file.bin",
            Default::default(),
            Sink::Writer(Box::new(writer)),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[tokio::test]
async fn test_file_sink_writes_download() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("download.bin");

    let http = MockHttp::new(200, None, b"file sink payload").chunked();
    let client = client_over(http, Context::new().with_file_io(TokioFileIo));

    client
        .get_object_to(
            "bucket",
            "file.bin",
            Default::default(),
            Sink::File(path.clone()),
        )
        .await?;
    assert_eq!(std::fs::read(&path).unwrap(), b"file sink payload");
    Ok(())
}

#[tokio::test]
async fn test_put_object_from_file_streams_contents() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.txt");
    std::fs::write(&path, b"upload me in chunks").unwrap();

    let http = MockHttp::new(200, None, b"");
    let client = client_over(http.clone(), Context::new().with_file_io(TokioFileIo));

    let out = client
        .put_object(
            "bucket",
            "dir/upload.txt",
            BodySource::File(path),
            Default::default(),
        )
        .await?;
    assert_eq!(
        out.url,
        "http://bucket.oss-cn-hangzhou.aliyuncs.com/dir/upload.txt"
    );
    assert_eq!(http.last_body(), b"upload me in chunks");
    Ok(())
}

#[tokio::test]
async fn test_put_object_missing_file_never_sends() {
    let http = MockHttp::new(200, None, b"");
    let client = client_over(http.clone(), Context::new().with_file_io(TokioFileIo));

    let err = client
        .put_object(
            "bucket",
            "key",
            BodySource::File("/no/such/upload.bin".into()),
            Default::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn test_stream_body_needs_no_file_io() -> Result<()> {
    let http = MockHttp::new(200, None, b"");
    let client = client_over(http.clone(), Context::new());

    let chunks: Vec<Result<Bytes>> = vec![
        Ok(Bytes::from_static(b"chunk one ")),
        Ok(Bytes::from_static(b"chunk two")),
    ];
    client
        .put_object(
            "bucket",
            "streamed",
            BodySource::Stream(Box::pin(stream::iter(chunks))),
            Default::default(),
        )
        .await?;
    assert_eq!(http.last_body(), b"chunk one chunk two");
    Ok(())
}

#[tokio::test]
async fn test_list_objects_round_trips_query() -> Result<()> {
    let body = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
        <ListBucketResult>\
        <Name>bucket</Name>\
        <Prefix>\xe4\xb8\xad\xe6\x96\x87/</Prefix>\
        <MaxKeys>10</MaxKeys>\
        <IsTruncated>false</IsTruncated>\
        <Contents><Key>\xe4\xb8\xad\xe6\x96\x87/a.txt</Key><Size>3</Size></Contents>\
        </ListBucketResult>";
    let http = MockHttp::new(200, Some("application/xml"), body);
    let client = client_over(http.clone(), Context::new());

    let query = ListObjectsQuery {
        prefix: Some("中文/".to_string()),
        max_keys: Some(10),
        ..Default::default()
    };
    let listing = client.list_objects("bucket", query).await?;
    assert_eq!(listing.prefix, "中文/");
    assert_eq!(listing.contents.len(), 1);
    assert_eq!(listing.contents[0].key, "中文/a.txt");

    // The wire query decodes back to the original parameters.
    let uri: http::Uri = http.last_uri().parse().unwrap();
    let pairs: Vec<(String, String)> = form_urlencoded::parse(uri.query().unwrap().as_bytes())
        .into_owned()
        .collect();
    assert!(pairs.contains(&("prefix".to_string(), "中文/".to_string())));
    assert!(pairs.contains(&("max-keys".to_string(), "10".to_string())));
    Ok(())
}

#[tokio::test]
async fn test_head_object_exposes_headers_without_body() -> Result<()> {
    let http = MockHttp::new(200, None, b"");
    let client = client_over(http, Context::new());

    let resp = client.head_object("bucket", "key").await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(matches!(resp.body, ResponseBody::None));
    Ok(())
}

#[tokio::test]
async fn test_error_reaches_caller_even_from_buffer_upload() {
    let body = b"<Error><Code>AccessDenied</Code><Message>denied</Message></Error>";
    let http = MockHttp::new(403, Some("application/xml"), body);
    let client = client_over(http, Context::new());

    let err = client
        .put_object("bucket", "key", BodySource::from("data"), Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.code(), Some("AccessDenied"));
    assert_eq!(err.request_id(), None);
}
