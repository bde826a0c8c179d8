//! Core components for the OSS client.
//!
//! This crate carries the pieces every other `oss-client` crate builds
//! on: the error model, hashing and time helpers, streaming body types,
//! and the [`Context`] that holds pluggable I/O implementations.
//!
//! ## Overview
//!
//! - [`Context`]: container for the [`FileIo`], [`HttpSend`] and [`Env`]
//!   implementations an operation runs through
//! - [`HttpBody`] and [`ByteStream`]: request and response bodies that
//!   either buffer or stream, never both
//! - [`Error`]: one structured error type for every operation outcome
//!
//! ## Example
//!
//! ```
//! use oss_client_core::{Context, OsEnv};
//!
//! let ctx = Context::new().with_env(OsEnv);
//! assert!(ctx.env_var("PATH").is_some() || ctx.env_var("PATH").is_none());
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;

mod context;
pub use context::Context;
mod env;
pub use env::{Env, NoopEnv, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
mod fs;
pub use fs::{FileIo, NoopFileIo};
mod http;
pub use self::http::{ByteStream, HttpBody, HttpSend, NoopHttpSend};
