//! Constants used across the client.

use std::time::Duration;

// Env values the config loader reads.
pub(crate) const ALIBABA_CLOUD_ACCESS_KEY_ID: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
pub(crate) const ALIBABA_CLOUD_ACCESS_KEY_SECRET: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";

// Endpoint defaults applied by `Config::default`.
pub(crate) const DEFAULT_HOST: &str = "oss-cn-hangzhou.aliyuncs.com";
pub(crate) const DEFAULT_PORT: u16 = 80;
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
pub(crate) const DEFAULT_MAX_CONNECTIONS: usize = 20;

// Headers without `http::header` constants.
pub(crate) const CONTENT_MD5: &str = "content-md5";
pub(crate) const X_OSS_ACL: &str = "x-oss-acl";
pub(crate) const X_OSS_COPY_SOURCE: &str = "x-oss-copy-source";

/// The only content type the service marks XML replies with.
pub(crate) const APPLICATION_XML: &str = "application/xml";
