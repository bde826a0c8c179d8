//! The client and its operation surface.

use bytes::Bytes;
use http::header::{AUTHORIZATION, DATE};
use http::{HeaderMap, HeaderValue, Method};
use log::debug;
use oss_client_core::time::{format_http_date, now, DateTime};
use oss_client_core::{Context, Error, Result};

use crate::body::{self, BodySource};
use crate::config::Config;
use crate::constants::{X_OSS_ACL, X_OSS_COPY_SOURCE};
use crate::credential::Credential;
use crate::model::{
    self, AccessControlPolicy, Acl, DeleteResult, ListAllMyBucketsResult, ListBucketResult,
};
use crate::request::{ListObjectsQuery, OperationRequest, SubResource};
use crate::response::{classify, Response, ResponseBody, Sink};
use crate::sign;

/// Client for one endpoint holding one access key pair.
///
/// Operations take `&self`, and the client is cheap to clone, so one
/// instance serves any number of concurrent tasks.
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    config: Config,
    credential: Credential,
    time: Option<DateTime>,
}

/// Successful upload or copy outcome.
#[derive(Debug)]
pub struct PutObjectOutput {
    /// Public address of the written object.
    pub url: String,
    /// The underlying exchange envelope.
    pub response: Response,
}

impl Client {
    /// Build a client over `ctx` with `config`.
    ///
    /// Fails when the access key pair is missing or empty.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let access_key_id = config.access_key_id.clone().unwrap_or_default();
        let access_key_secret = config.access_key_secret.clone().unwrap_or_default();
        if access_key_id.is_empty() || access_key_secret.is_empty() {
            return Err(Error::config_invalid(
                "access_key_id and access_key_secret are required",
            ));
        }
        if config.host.is_empty() {
            return Err(Error::config_invalid("host must not be empty"));
        }

        Ok(Self {
            ctx,
            config,
            credential: Credential::new(access_key_id, access_key_secret),
            time: None,
        })
    }

    /// Pin the time used for `Date` headers.
    ///
    /// # Note
    ///
    /// The service rejects requests whose `Date` drifts from its clock.
    /// Only use this function for testing.
    #[cfg(test)]
    pub(crate) fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn object_url(&self, bucket: &str, object: &str) -> String {
        format!("http://{}.{}/{}", bucket, self.config.host, object)
    }

    /// Resolve the body, stamp `Date`, sign, send and classify.
    async fn execute(&self, mut op: OperationRequest, sink: Option<Sink>) -> Result<Response> {
        let source = std::mem::replace(&mut op.body, BodySource::Empty);
        let body = body::resolve(source, &mut op.headers, &self.ctx).await?;

        op.headers
            .insert(DATE, format_http_date(self.get_time()).parse()?);

        let resource = op.resource();
        let string_to_sign = sign::string_to_sign(&op.method, &op.headers, &resource)?;
        let mut authorization: HeaderValue =
            sign::authorization(&self.credential, &string_to_sign).parse()?;
        authorization.set_sensitive(true);
        op.headers.insert(AUTHORIZATION, authorization);

        let uri = op.uri(&self.config.host, self.config.port)?;
        debug!("sending {} {}", op.method, uri);

        let mut builder = http::Request::builder().method(op.method).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            *headers = op.headers;
        }
        let req = builder.body(body)?;

        let resp = self.ctx.http_send(req).await?;
        debug!("received status {}", resp.status());

        classify(&self.ctx, resp, sink).await
    }

    /// List every bucket the credentials own.
    pub async fn list_buckets(&self) -> Result<ListAllMyBucketsResult> {
        let op = OperationRequest::new(Method::GET);
        let resp = self.execute(op, None).await?;
        resp.xml()
    }

    /// Create `bucket`, optionally with a canned access policy.
    pub async fn create_bucket(&self, bucket: &str, acl: Option<Acl>) -> Result<Response> {
        let mut op = OperationRequest::new(Method::PUT);
        op.bucket = Some(bucket.to_string());
        if let Some(acl) = acl {
            op.headers
                .insert(X_OSS_ACL, HeaderValue::from_static(acl.as_str()));
        }
        self.execute(op, None).await
    }

    /// Delete the empty `bucket`.
    pub async fn delete_bucket(&self, bucket: &str) -> Result<Response> {
        let mut op = OperationRequest::new(Method::DELETE);
        op.bucket = Some(bucket.to_string());
        self.execute(op, None).await
    }

    /// Read `bucket`'s access policy.
    pub async fn get_bucket_acl(&self, bucket: &str) -> Result<AccessControlPolicy> {
        let mut op = OperationRequest::new(Method::GET);
        op.bucket = Some(bucket.to_string());
        op.subresource = Some(SubResource::Acl);
        let resp = self.execute(op, None).await?;
        resp.xml()
    }

    /// Replace `bucket`'s access policy.
    pub async fn set_bucket_acl(&self, bucket: &str, acl: Acl) -> Result<Response> {
        let mut op = OperationRequest::new(Method::PUT);
        op.bucket = Some(bucket.to_string());
        op.subresource = Some(SubResource::Acl);
        op.headers
            .insert(X_OSS_ACL, HeaderValue::from_static(acl.as_str()));
        self.execute(op, None).await
    }

    /// List objects in `bucket`, filtered by `query`.
    pub async fn list_objects(
        &self,
        bucket: &str,
        query: ListObjectsQuery,
    ) -> Result<ListBucketResult> {
        let mut op = OperationRequest::new(Method::GET);
        op.bucket = Some(bucket.to_string());
        op.query = Some(query);
        let resp = self.execute(op, None).await?;
        resp.xml()
    }

    /// Upload `source` as `object`.
    ///
    /// `headers` pass through to the service, so `x-oss-meta-*`
    /// metadata and overrides like `Content-Type` go here. Headers the
    /// body derives (`Content-Length`, `Content-Md5` for buffers) win
    /// over passed ones.
    pub async fn put_object(
        &self,
        bucket: &str,
        object: &str,
        source: BodySource,
        headers: HeaderMap,
    ) -> Result<PutObjectOutput> {
        let mut op = OperationRequest::new(Method::PUT);
        op.bucket = Some(bucket.to_string());
        op.object = Some(object.to_string());
        op.headers = headers;
        op.body = source;
        let response = self.execute(op, None).await?;
        Ok(PutObjectOutput {
            url: self.object_url(bucket, object),
            response,
        })
    }

    /// Server side copy of `{source_bucket}/{source_object}` onto
    /// `{bucket}/{object}`. No object bytes move through the client.
    pub async fn copy_object(
        &self,
        source_bucket: &str,
        source_object: &str,
        bucket: &str,
        object: &str,
        headers: HeaderMap,
    ) -> Result<PutObjectOutput> {
        let mut op = OperationRequest::new(Method::PUT);
        op.bucket = Some(bucket.to_string());
        op.object = Some(object.to_string());
        op.headers = headers;
        op.headers.insert(
            X_OSS_COPY_SOURCE,
            format!("/{source_bucket}/{source_object}").parse()?,
        );
        let response = self.execute(op, None).await?;
        Ok(PutObjectOutput {
            url: self.object_url(bucket, object),
            response,
        })
    }

    /// Download `object` into memory.
    ///
    /// `headers` pass through to the service, e.g. `Range` or
    /// `If-Modified-Since`.
    pub async fn get_object(
        &self,
        bucket: &str,
        object: &str,
        headers: HeaderMap,
    ) -> Result<Response> {
        let mut op = OperationRequest::new(Method::GET);
        op.bucket = Some(bucket.to_string());
        op.object = Some(object.to_string());
        op.headers = headers;
        self.execute(op, None).await
    }

    /// Download `object` into `sink`.
    ///
    /// The response body flows into the sink whatever the status was,
    /// and success is reported only after the sink flushed. The
    /// returned envelope carries status and headers with an empty body.
    pub async fn get_object_to(
        &self,
        bucket: &str,
        object: &str,
        headers: HeaderMap,
        sink: Sink,
    ) -> Result<Response> {
        let mut op = OperationRequest::new(Method::GET);
        op.bucket = Some(bucket.to_string());
        op.object = Some(object.to_string());
        op.headers = headers;
        self.execute(op, Some(sink)).await
    }

    /// Fetch `object`'s headers without its body.
    pub async fn head_object(&self, bucket: &str, object: &str) -> Result<Response> {
        let mut op = OperationRequest::new(Method::HEAD);
        op.bucket = Some(bucket.to_string());
        op.object = Some(object.to_string());
        self.execute(op, None).await
    }

    /// Delete one object. Succeeds whether or not the key existed.
    pub async fn delete_object(&self, bucket: &str, object: &str) -> Result<Response> {
        let mut op = OperationRequest::new(Method::DELETE);
        op.bucket = Some(bucket.to_string());
        op.object = Some(object.to_string());
        self.execute(op, None).await
    }

    /// Delete up to a thousand objects in one call.
    ///
    /// `quiet` asks the service to skip the per-key confirmation
    /// listing; the returned result is empty then.
    pub async fn delete_objects(
        &self,
        bucket: &str,
        objects: &[impl AsRef<str>],
        quiet: bool,
    ) -> Result<DeleteResult> {
        let body = model::delete_body(objects, quiet)?;
        let mut op = OperationRequest::new(Method::POST);
        op.bucket = Some(bucket.to_string());
        op.subresource = Some(SubResource::Delete);
        op.body = BodySource::Buffer(Bytes::from(body));

        let resp = self.execute(op, None).await?;
        match &resp.body {
            ResponseBody::None => Ok(DeleteResult::default()),
            _ => resp.xml(),
        }
    }
}
