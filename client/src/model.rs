//! XML documents the service exchanges, plus the ACL vocabulary.
//!
//! Field names mirror the service's element names one to one, so the
//! structs read like the documents they decode.

use std::fmt;

use oss_client_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Canned access policies a bucket can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acl {
    /// Only the owner reads and writes.
    Private,
    /// World readable.
    PublicRead,
    /// World readable and writable.
    PublicReadWrite,
}

impl Acl {
    /// The header and XML form of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Acl::Private => "private",
            Acl::PublicRead => "public-read",
            Acl::PublicReadWrite => "public-read-write",
        }
    }
}

impl fmt::Display for Acl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `<Error>` envelope carried by failed calls.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}

/// Result of listing the buckets an account owns.
#[derive(Debug, Default, Deserialize)]
pub struct ListAllMyBucketsResult {
    /// Account that owns the listed buckets.
    #[serde(rename = "Owner")]
    pub owner: Option<Owner>,
    /// Wrapper element around the bucket entries.
    #[serde(rename = "Buckets", default)]
    pub buckets: Buckets,
}

/// Wrapper element around `<Bucket>` entries.
#[derive(Debug, Default, Deserialize)]
pub struct Buckets {
    /// The bucket entries.
    #[serde(rename = "Bucket", default)]
    pub bucket: Vec<Bucket>,
}

/// One bucket entry in an account listing.
#[derive(Debug, Default, Deserialize)]
pub struct Bucket {
    /// Bucket name.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Data center the bucket lives in, e.g. `oss-cn-hangzhou`.
    #[serde(rename = "Location", default)]
    pub location: String,
    /// Creation timestamp as reported by the service.
    #[serde(rename = "CreationDate", default)]
    pub creation_date: String,
}

/// Owner block on listings and access policies.
#[derive(Debug, Default, Deserialize)]
pub struct Owner {
    /// Owner id.
    #[serde(rename = "ID", default)]
    pub id: String,
    /// Owner display name.
    #[serde(rename = "DisplayName", default)]
    pub display_name: String,
}

/// Result of listing objects within a bucket.
#[derive(Debug, Default, Deserialize)]
pub struct ListBucketResult {
    /// Bucket that was listed.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Prefix the listing was filtered by.
    #[serde(rename = "Prefix", default)]
    pub prefix: String,
    /// Marker the listing started after.
    #[serde(rename = "Marker", default)]
    pub marker: String,
    /// Key cap the service applied.
    #[serde(rename = "MaxKeys", default)]
    pub max_keys: u32,
    /// Delimiter used for grouping, when any.
    #[serde(rename = "Delimiter", default)]
    pub delimiter: String,
    /// Whether more keys remained past the cap.
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
    /// Marker to resume from when truncated.
    #[serde(rename = "NextMarker")]
    pub next_marker: Option<String>,
    /// The object entries.
    #[serde(rename = "Contents", default)]
    pub contents: Vec<Contents>,
    /// Prefix groups folded by the delimiter.
    #[serde(rename = "CommonPrefixes", default)]
    pub common_prefixes: Vec<CommonPrefixes>,
}

/// One object entry in a listing.
#[derive(Debug, Default, Deserialize)]
pub struct Contents {
    /// Object key.
    #[serde(rename = "Key", default)]
    pub key: String,
    /// Last modified timestamp.
    #[serde(rename = "LastModified", default)]
    pub last_modified: String,
    /// Entity tag.
    #[serde(rename = "ETag", default)]
    pub etag: String,
    /// Object size in bytes.
    #[serde(rename = "Size", default)]
    pub size: u64,
    /// Storage tier the object sits in.
    #[serde(rename = "StorageClass", default)]
    pub storage_class: String,
    /// Object owner.
    #[serde(rename = "Owner")]
    pub owner: Option<Owner>,
}

/// One folded prefix group in a listing.
#[derive(Debug, Default, Deserialize)]
pub struct CommonPrefixes {
    /// The folded prefix.
    #[serde(rename = "Prefix", default)]
    pub prefix: String,
}

/// Result of reading a bucket's access policy.
#[derive(Debug, Default, Deserialize)]
pub struct AccessControlPolicy {
    /// Bucket owner.
    #[serde(rename = "Owner")]
    pub owner: Option<Owner>,
    /// Wrapper element around the grant.
    #[serde(rename = "AccessControlList", default)]
    pub access_control_list: AccessControlList,
}

/// Wrapper element around `<Grant>`.
#[derive(Debug, Default, Deserialize)]
pub struct AccessControlList {
    /// The granted policy, e.g. `public-read`.
    #[serde(rename = "Grant", default)]
    pub grant: String,
}

/// Result of a batch delete. Quiet mode returns an empty document.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteResult {
    /// Keys the service confirmed deleted.
    #[serde(rename = "Deleted", default)]
    pub deleted: Vec<Deleted>,
}

/// One confirmed deletion in a batch delete result.
#[derive(Debug, Default, Deserialize)]
pub struct Deleted {
    /// The deleted key.
    #[serde(rename = "Key", default)]
    pub key: String,
}

#[derive(Serialize)]
#[serde(rename = "Delete")]
struct Delete<'a> {
    #[serde(rename = "Quiet")]
    quiet: bool,
    #[serde(rename = "Object")]
    object: Vec<DeleteKey<'a>>,
}

#[derive(Serialize)]
struct DeleteKey<'a> {
    #[serde(rename = "Key")]
    key: &'a str,
}

/// Serialize the batch delete request document, declaration included.
pub(crate) fn delete_body(keys: &[impl AsRef<str>], quiet: bool) -> Result<String> {
    let doc = Delete {
        quiet,
        object: keys.iter().map(|k| DeleteKey { key: k.as_ref() }).collect(),
    };
    let body = quick_xml::se::to_string(&doc)
        .map_err(|e| Error::unexpected("failed to serialize delete request").with_source(e))?;
    Ok(format!(r#"<?xml version="1.0" encoding="UTF-8"?>{body}"#))
}
