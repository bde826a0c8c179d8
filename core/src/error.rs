use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// The error type returned by every fallible operation in this crate
/// family.
///
/// Errors carry a kind for programmatic matching, a human readable
/// message, and, when the remote service produced them, the HTTP status
/// plus the service's own error code and request id.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    code: Option<String>,
    request_id: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration is missing or unusable, e.g. no access key pair.
    ConfigInvalid,
    /// Local filesystem failure while reading an upload body or
    /// draining a download.
    Io,
    /// Connection level failure reported by the HTTP client.
    Transport,
    /// A body declared as XML could not be parsed.
    XmlParse,
    /// The service rejected the request and sent a readable error
    /// document.
    Api,
    /// The service signalled an error status but its error document is
    /// unusable.
    ApiMalformed,
    /// Errors that we have no better classification for.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "config invalid"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::XmlParse => write!(f, "xml parse"),
            ErrorKind::Api => write!(f, "api"),
            ErrorKind::ApiMalformed => write!(f, "api malformed"),
            ErrorKind::Unexpected => write!(f, "unexpected"),
        }
    }
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            code: None,
            request_id: None,
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the HTTP status the service answered with.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status of the response this error came from, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Error code reported by the service, e.g. `NoSuchBucket`.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Request id reported by the service, useful when filing tickets.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

// Convenience constructors
impl Error {
    /// Create an error with kind [`ErrorKind::ConfigInvalid`].
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an error with kind [`ErrorKind::Io`].
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    /// Create an error with kind [`ErrorKind::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an error with kind [`ErrorKind::XmlParse`].
    pub fn xml_parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::XmlParse, message)
    }

    /// Create an error with kind [`ErrorKind::Unexpected`].
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create an error with kind [`ErrorKind::Api`] from a decoded
    /// service error document.
    pub fn api(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        let code = code.into();
        let message = message.into();
        Self {
            kind: ErrorKind::Api,
            message: format!("{code}: {message}"),
            status: Some(status),
            code: Some(code),
            request_id,
            source: None,
        }
    }

    /// Create an error with kind [`ErrorKind::ApiMalformed`].
    pub fn api_malformed(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ApiMalformed, message).with_status(status)
    }
}

/// Result type used across the crate family.
pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::unexpected(err.to_string()).with_source(err)
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Error::unexpected("format message failed").with_source(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Error::unexpected("failed to build http request").with_source(err)
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Error::unexpected("header value is invalid").with_source(err)
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Error::unexpected("header name is invalid").with_source(err)
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Error::unexpected("header value is not a valid string").with_source(err)
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Error::unexpected("uri is invalid").with_source(err)
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::unexpected("bytes are not valid utf-8").with_source(err)
    }
}
