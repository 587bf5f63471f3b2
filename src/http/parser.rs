use std::fmt;

use crate::http::error::ParseError;
use crate::http::headers::{find_crlf, is_token_char};

const SUPPORTED_VERSION: &str = "1.1";

/// The first line of a request: method, request-target and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Upper-case method token, e.g. `GET`.
    pub method: String,
    /// Request-target exactly as sent; not validated against URI grammar.
    pub target: String,
    /// Version number without the scheme, always `1.1`.
    pub version: String,
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} HTTP/{}", self.method, self.target, self.version)
    }
}

/// Parses the request line at the front of `buf`.
///
/// Returns `Ok(None)` while no `\r\n` has been buffered. On success, returns
/// the line together with the number of bytes it took, terminator included.
pub fn parse_request_line(buf: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(line_end) = find_crlf(buf) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&buf[..line_end])
        .map_err(|_| ParseError::MalformedRequestLine("request line is not valid UTF-8".into()))?;

    let parts: Vec<&str> = line.split_ascii_whitespace().collect();
    let &[method, target, version] = parts.as_slice() else {
        return Err(ParseError::MalformedRequestLine(format!(
            "expected 3 parts, got {}",
            parts.len()
        )));
    };

    if !method.bytes().all(is_token_char) || method.to_ascii_uppercase() != method {
        return Err(ParseError::MalformedRequestLine(format!(
            "invalid method {:?}",
            method
        )));
    }

    let (_scheme, version) = version.split_once('/').ok_or_else(|| {
        ParseError::MalformedRequestLine(format!("invalid version {:?}", version))
    })?;

    if version != SUPPORTED_VERSION {
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }

    let request_line = RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
    };

    Ok(Some((request_line, line_end + 2)))
}
