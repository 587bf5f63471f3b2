//! HTTP/1.1 protocol implementation.
//!
//! This module parses requests incrementally from a raw byte stream and writes
//! responses, fixed-length or chunked, without relying on an HTTP library.
//!
//! # Architecture
//!
//! - **`headers`**: Header field collection with validation and comma-folding
//! - **`parser`**: Request-line parsing
//! - **`request`**: The request state machine fed from a byte buffer
//! - **`response`**: Status codes and reason phrases
//! - **`writer`**: Response encoders and the async response writer
//! - **`connection`**: Reads one request off a stream and hands it to a handler
//! - **`error`**: Parse and write error types
//!
//! # Request State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │    Init     │ ← Wait for `METHOD SP TARGET SP HTTP/1.1 CRLF`
//!        └──────┬──────┘
//!               │ Request line parsed
//!               ▼
//!        ┌─────────────┐
//!        │   Headers   │ ← One `Name: Value CRLF` per step
//!        └──────┬──────┘
//!               │ Blank line
//!               ▼
//!        ┌─────────────┐
//!        │    Body     │ ← Collect Content-Length bytes (none if absent)
//!        └──────┬──────┘
//!               │ Body complete
//!               ▼
//!        ┌─────────────┐
//!        │    Done     │
//!        └─────────────┘
//! ```
//!
//! Each step reports how many bytes it consumed from the front of the buffer;
//! zero means it needs more input.
//!
//! # Example
//!
//! ```
//! use httpfromtcp::http::request::{Request, RequestState};
//!
//! let mut buf: &[u8] = b"POST /submit HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi";
//! let mut request = Request::new();
//!
//! loop {
//!     let consumed = request.parse(buf).unwrap();
//!     if consumed == 0 {
//!         break;
//!     }
//!     buf = &buf[consumed..];
//! }
//!
//! assert_eq!(request.state(), RequestState::Done);
//! assert_eq!(request.body(), b"hi");
//! ```

pub mod connection;
pub mod error;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
