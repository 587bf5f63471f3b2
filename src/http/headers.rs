use std::fmt;

use bytes::BufMut;

use crate::http::error::{HeaderNotFound, ParseError};

const CRLF: &[u8] = b"\r\n";

/// Returns true for bytes allowed in an RFC 7230 `token`.
pub fn is_token_char(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`'
            | b'|' | b'~' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z'
    )
}

/// Checks that `name` is a non-empty token with no trailing whitespace.
///
/// ```
/// # use httpfromtcp::http::headers::is_field_name_valid;
/// assert!(is_field_name_valid(b"Content-Type"));
/// assert!(!is_field_name_valid(b"Host "));
/// assert!(!is_field_name_valid(b"H\xc2\xa9st"));
/// ```
pub fn is_field_name_valid(name: &[u8]) -> bool {
    match name.last() {
        None => false,
        Some(b) if b.is_ascii_whitespace() => false,
        Some(_) => name.iter().all(|&b| is_token_char(b)),
    }
}

pub(crate) fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == CRLF)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    /// Lower-cased lookup key.
    key: String,
    /// Spelling the field was first added with.
    name: String,
    value: String,
}

/// Ordered collection of header fields with case-insensitive lookup.
///
/// Adding a name that is already present folds the new value into the old one
/// as a comma-separated list (RFC 7230 §3.2.2) instead of replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<Field>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.key.eq_ignore_ascii_case(name))
    }

    /// Adds a field, folding it into an existing one of the same name.
    pub fn add(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(i) => {
                let existing = &mut self.fields[i].value;
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => self.fields.push(Field {
                key: name.to_ascii_lowercase(),
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Inserts a field or replaces the value of an existing one.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(i) => self.fields[i].value = value.to_string(),
            None => self.add(name, value),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|i| self.fields.remove(i).value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Case-insensitive lookup.
    ///
    /// # Errors
    ///
    /// [`HeaderNotFound`] if no field has this name.
    pub fn get(&self, name: &str) -> Result<&str, HeaderNotFound> {
        self.position(name)
            .map(|i| self.fields[i].value.as_str())
            .ok_or_else(|| HeaderNotFound(name.to_ascii_lowercase()))
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
    }

    /// Parses at most one header line from the front of `data`.
    ///
    /// Returns the number of bytes consumed and whether the blank line ending
    /// the header section was reached. `(0, false)` means no complete line is
    /// buffered yet.
    pub fn parse_one(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(line_end) = find_crlf(data) else {
            return Ok((0, false));
        };

        if line_end == 0 {
            return Ok((CRLF.len(), true));
        }

        let line = &data[..line_end];
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or_else(|| ParseError::MalformedHeader(String::from_utf8_lossy(line).into_owned()))?;

        let name = line[..colon].trim_ascii_start();
        let value = line[colon + 1..].trim_ascii();

        if !is_field_name_valid(name) {
            return Err(ParseError::MalformedHeader(
                String::from_utf8_lossy(name).into_owned(),
            ));
        }

        // a valid name is plain ASCII
        let name = String::from_utf8_lossy(name).to_ascii_lowercase();
        let value = std::str::from_utf8(value)
            .map_err(|_| ParseError::MalformedHeader(name.clone()))?;

        self.add(&name, value);

        Ok((line_end + CRLF.len(), false))
    }

    /// Serializes every field as `name: value\r\n`, then the blank line.
    pub fn write<B: BufMut>(&self, dst: &mut B) {
        for (name, value) in self.iter() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(CRLF);
        }
        dst.put_slice(CRLF);
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Headers:")?;
        for (name, value) in self.iter() {
            writeln!(f, "- {}: {}", name, value)?;
        }
        Ok(())
    }
}
