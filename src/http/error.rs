//! Error types for request parsing and response writing.
//!
//! Every variant is built at the failure site and carries the offending
//! context (field name, version string, byte counts).

use thiserror::Error;

/// Fatal conditions raised while parsing a request.
///
/// None of these are recoverable within an exchange: the connection is closed
/// without writing a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Wrong token count, lower-case method, bad version syntax or non UTF-8 line.
    #[error("malformed request line: {0}")]
    MalformedRequestLine(String),

    /// A well-formed request line asking for anything other than HTTP/1.1.
    #[error("unsupported HTTP version {0:?}, only 1.1 is supported")]
    UnsupportedVersion(String),

    /// Invalid field name, missing colon or undecodable value.
    #[error("malformed header {0:?}")]
    MalformedHeader(String),

    #[error("invalid Content-Length value {0:?}")]
    InvalidContentLength(String),

    /// More body bytes arrived than `Content-Length` declared.
    #[error("body of {received} bytes exceeds declared Content-Length of {declared}")]
    BodyOverflow { declared: usize, received: usize },

    /// Read timeout, I/O failure or end of stream before the request completed.
    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

/// Returned by [`Headers::get`](crate::http::headers::Headers::get) when no
/// field with that name exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("header {0:?} not found")]
pub struct HeaderNotFound(pub String);

/// Failures of the asynchronous response writer.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A write was attempted in a phase that does not allow it.
    #[error("cannot write {attempted} during the {phase:?} phase")]
    OutOfOrder {
        attempted: &'static str,
        phase: crate::http::writer::WriterPhase,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
