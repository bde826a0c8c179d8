//! Logical operation descriptions and their two path renderings.
//!
//! Every operation renders its target twice: once as the raw resource
//! path the signature covers, and once as the percent encoded path that
//! goes on the wire. The two must stay consistent with each other or
//! the service rejects the signature.

use http::{HeaderMap, Method, Uri};
use oss_client_core::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::body::BodySource;

/// Characters that survive percent encoding untouched, the RFC 3986
/// unreserved set.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Sub-resource suffix riding on the resource path and the URL query.
/// At most one per request, and it suppresses list query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubResource {
    Acl,
    Delete,
}

impl SubResource {
    fn as_str(&self) -> &'static str {
        match self {
            SubResource::Acl => "acl",
            SubResource::Delete => "delete",
        }
    }
}

/// Query parameters accepted by the list objects operation.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsQuery {
    /// Only list objects whose keys start with this prefix.
    pub prefix: Option<String>,
    /// Start listing after this key.
    pub marker: Option<String>,
    /// Group keys up to the first occurrence of this delimiter.
    pub delimiter: Option<String>,
    /// Cap on the number of returned keys.
    pub max_keys: Option<u32>,
}

impl ListObjectsQuery {
    fn encode(&self) -> String {
        let mut params = Vec::new();
        if let Some(v) = &self.prefix {
            params.push(format!("prefix={}", utf8_percent_encode(v, ENCODE_SET)));
        }
        if let Some(v) = &self.marker {
            params.push(format!("marker={}", utf8_percent_encode(v, ENCODE_SET)));
        }
        if let Some(v) = &self.delimiter {
            params.push(format!("delimiter={}", utf8_percent_encode(v, ENCODE_SET)));
        }
        if let Some(v) = self.max_keys {
            params.push(format!("max-keys={v}"));
        }
        params.join("&")
    }
}

/// One logical call, described before signing and transport.
#[derive(Debug)]
pub(crate) struct OperationRequest {
    pub method: Method,
    pub bucket: Option<String>,
    pub object: Option<String>,
    pub query: Option<ListObjectsQuery>,
    pub subresource: Option<SubResource>,
    pub headers: HeaderMap,
    pub body: BodySource,
}

impl OperationRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            bucket: None,
            object: None,
            query: None,
            subresource: None,
            headers: HeaderMap::new(),
            body: BodySource::Empty,
        }
    }

    /// The path the signature covers: raw names, no percent encoding.
    ///
    /// A bucket without an object keeps its trailing slash, and a
    /// sub-resource rides along as a literal `?acl` or `?delete`.
    pub fn resource(&self) -> String {
        let mut resource = String::new();
        if let Some(bucket) = &self.bucket {
            resource.push('/');
            resource.push_str(bucket);
        }
        match &self.object {
            Some(object) => {
                resource.push('/');
                resource.push_str(object);
            }
            None => resource.push('/'),
        }
        if let Some(sub) = self.subresource {
            resource.push('?');
            resource.push_str(sub.as_str());
        }
        resource
    }

    /// The path sent on the wire: encoded object segments plus the
    /// query. The bucket lives in the authority, not here.
    pub fn url_path(&self) -> String {
        let mut path = String::new();
        if let Some(object) = &self.object {
            path.push('/');
            path.push_str(&encode_object_key(object));
        }

        let query = match self.subresource {
            Some(sub) => sub.as_str().to_string(),
            None => self.query.as_ref().map(|q| q.encode()).unwrap_or_default(),
        };
        if !query.is_empty() {
            path.push_str("/?");
            path.push_str(&query);
        }

        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// The authority requests are addressed to: `{bucket}.{host}` for
    /// bucket scoped calls, the bare host otherwise. Port 80 stays
    /// implicit.
    pub fn authority(&self, host: &str, port: u16) -> String {
        let host = match &self.bucket {
            Some(bucket) => format!("{bucket}.{host}"),
            None => host.to_string(),
        };
        if port == 80 {
            host
        } else {
            format!("{host}:{port}")
        }
    }

    /// Full request target.
    pub fn uri(&self, host: &str, port: u16) -> Result<Uri> {
        let target = format!("http://{}{}", self.authority(host, port), self.url_path());
        Ok(target.parse()?)
    }
}

/// Encode an object key for the wire, one `/` segment at a time so the
/// separators stay literal.
fn encode_object_key(key: &str) -> String {
    key.split('/')
        .map(|segment| utf8_percent_encode(segment, ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
