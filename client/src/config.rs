use std::time::Duration;

use oss_client_core::Context;

use crate::constants::*;

/// Config carries everything the client needs to reach one endpoint.
///
/// All fields are fixed once the client is constructed.
#[derive(Clone, Debug)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `ALIBABA_CLOUD_ACCESS_KEY_ID`
    pub access_key_id: Option<String>,
    /// `access_key_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `ALIBABA_CLOUD_ACCESS_KEY_SECRET`
    pub access_key_secret: Option<String>,
    /// Endpoint host requests are addressed to. Bucket scoped requests
    /// go to `{bucket}.{host}`.
    pub host: String,
    /// Endpoint port. Ports other than 80 appear in the request URI.
    pub port: u16,
    /// Uniform per-request timeout, enforced by the transport.
    pub timeout: Duration,
    /// Connection pool cap handed through to the transport.
    pub max_connections: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key_id: None,
            access_key_secret: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    /// Load config from env, filling only the fields still unset.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_ACCESS_KEY_SECRET) {
            self.access_key_secret.get_or_insert(v);
        }
        self
    }
}
