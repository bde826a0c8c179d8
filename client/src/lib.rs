//! Aliyun OSS client.
//!
//! This crate implements the bucket and object operations of the Aliyun
//! Object Storage Service over its header signed REST API: canonical
//! string signing with HMAC-SHA1, virtual-host request assembly, bodies
//! that buffer or stream, and XML response classification.
//!
//! ## Quick Start
//!
//! ```no_run
//! use oss_client::{BodySource, Client, Config};
//! use oss_client_core::Context;
//! use oss_client_file_io_tokio::TokioFileIo;
//! use oss_client_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> oss_client_core::Result<()> {
//!     let config = Config {
//!         access_key_id: Some("access_key_id".to_string()),
//!         access_key_secret: Some("access_key_secret".to_string()),
//!         ..Default::default()
//!     };
//!
//!     let ctx = Context::new()
//!         .with_file_io(TokioFileIo)
//!         .with_http_send(ReqwestHttpSend::with_limits(
//!             config.timeout,
//!             config.max_connections,
//!         )?);
//!     let client = Client::new(ctx, config)?;
//!
//!     let put = client
//!         .put_object(
//!             "mybucket",
//!             "greeting.txt",
//!             BodySource::from("hello!"),
//!             Default::default(),
//!         )
//!         .await?;
//!     println!("uploaded to {}", put.url);
//!
//!     let listing = client.list_objects("mybucket", Default::default()).await?;
//!     for entry in &listing.contents {
//!         println!("{} ({} bytes)", entry.key, entry.size);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Operations
//!
//! Bucket level: [`Client::list_buckets`], [`Client::create_bucket`],
//! [`Client::delete_bucket`], [`Client::get_bucket_acl`],
//! [`Client::set_bucket_acl`], [`Client::list_objects`].
//!
//! Object level: [`Client::put_object`], [`Client::copy_object`],
//! [`Client::get_object`], [`Client::get_object_to`],
//! [`Client::head_object`], [`Client::delete_object`],
//! [`Client::delete_objects`].

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod body;
pub use body::BodySource;
mod client;
pub use client::{Client, PutObjectOutput};
mod config;
pub use config::Config;
mod constants;
mod credential;
pub use credential::Credential;
mod model;
pub use model::{
    AccessControlList, AccessControlPolicy, Acl, Bucket, Buckets, CommonPrefixes, Contents,
    DeleteResult, Deleted, ListAllMyBucketsResult, ListBucketResult, Owner,
};
mod request;
pub use request::ListObjectsQuery;
mod response;
pub use response::{Response, ResponseBody, Sink};
pub mod sign;
