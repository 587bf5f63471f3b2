use std::fmt;

use crate::http::error::{HeaderNotFound, ParseError};
use crate::http::headers::Headers;
use crate::http::parser::{RequestLine, parse_request_line};

/// Parsing phase of a [`Request`].
///
/// Phases only ever move forward, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RequestState {
    /// Waiting for the request line.
    Init,
    /// Reading header lines until the blank line.
    Headers,
    /// Collecting `Content-Length` bytes of body.
    Body,
    /// Request fully parsed; further input is ignored.
    Done,
}

/// An HTTP/1.1 request assembled incrementally from a byte stream.
///
/// Feed it the unconsumed part of a read buffer through [`Request::parse`]
/// and slide the buffer by the returned count until it returns 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    state: RequestState,
    request_line: Option<RequestLine>,
    headers: Headers,
    body: Vec<u8>,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    pub fn new() -> Self {
        Self {
            state: RequestState::Init,
            request_line: None,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == RequestState::Done
    }

    /// The parsed request line, once the `Init` phase is over.
    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    pub fn method(&self) -> Option<&str> {
        self.request_line.as_ref().map(|l| l.method.as_str())
    }

    pub fn target(&self) -> Option<&str> {
        self.request_line.as_ref().map(|l| l.target.as_str())
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Advances the state machine with the currently unconsumed bytes.
    ///
    /// Returns how many bytes were consumed from the front of `data`. Zero
    /// means more input is needed, or nothing is left to extract this round.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] is fatal for the exchange.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        match self.state {
            RequestState::Init => match parse_request_line(data)? {
                Some((line, consumed)) => {
                    self.request_line = Some(line);
                    self.state = RequestState::Headers;
                    Ok(consumed)
                }
                None => Ok(0),
            },

            RequestState::Headers => {
                let (consumed, done) = self.headers.parse_one(data)?;
                if done {
                    self.state = RequestState::Body;
                }
                Ok(consumed)
            }

            RequestState::Body => self.parse_body(data),

            RequestState::Done => Ok(0),
        }
    }

    fn parse_body(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        let declared = match self.content_length()? {
            Some(n) => n,
            None => {
                self.state = RequestState::Done;
                return Ok(0);
            }
        };

        self.body.extend_from_slice(data);

        if self.body.len() > declared {
            return Err(ParseError::BodyOverflow {
                declared,
                received: self.body.len(),
            });
        }
        if self.body.len() == declared {
            self.state = RequestState::Done;
        }

        Ok(data.len())
    }

    /// Declared body length; `None` when the request has no `Content-Length`.
    pub fn content_length(&self) -> Result<Option<usize>, ParseError> {
        match self.headers.get("Content-Length") {
            Ok(value) => value
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ParseError::InvalidContentLength(value.to_string())),
            Err(HeaderNotFound(_)) => Ok(None),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.request_line {
            Some(line) => writeln!(f, "{}", line)?,
            None => writeln!(f, "<no request line>")?,
        }
        write!(f, "{}", self.headers)?;
        write!(f, "Body: {} bytes", self.body.len())
    }
}
