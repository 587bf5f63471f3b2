use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::error::WriteError;
use crate::http::headers::Headers;
use crate::http::response::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.1";
const CRLF: &[u8] = b"\r\n";

/// Writes `HTTP/1.1 <code> [reason]\r\n`.
pub fn write_status_line<B: BufMut>(dst: &mut B, code: StatusCode) {
    let status_line = format!("{} {}\r\n", HTTP_VERSION, code);
    dst.put_slice(status_line.as_bytes());
}

/// Writes the header fields followed by the blank line.
pub fn write_headers<B: BufMut>(dst: &mut B, headers: &Headers) {
    headers.write(dst);
}

pub fn write_body<B: BufMut>(dst: &mut B, body: &[u8]) {
    dst.put_slice(body);
}

/// Writes a complete fixed-length response: status line, headers, body.
pub fn write_fixed<B: BufMut>(dst: &mut B, code: StatusCode, headers: &Headers, body: &[u8]) {
    write_status_line(dst, code);
    write_headers(dst, headers);
    write_body(dst, body);
}

/// Writes one chunked-encoding frame: `<hex len>\r\n<chunk>\r\n`.
///
/// An empty chunk writes nothing, since a zero-length frame would end the
/// body. Use [`write_chunked_trailer_end`] for that.
pub fn write_chunk<B: BufMut>(dst: &mut B, chunk: &[u8]) {
    if chunk.is_empty() {
        return;
    }
    dst.put_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
    dst.put_slice(chunk);
    dst.put_slice(CRLF);
}

/// Writes the terminating zero-length chunk, the optional trailers and the
/// final blank line.
pub fn write_chunked_trailer_end<B: BufMut>(dst: &mut B, trailers: Option<&Headers>) {
    dst.put_slice(b"0\r\n");
    match trailers {
        Some(trailers) => trailers.write(dst),
        None => dst.put_slice(CRLF),
    }
}

/// Sets `Content-Length` and `Connection: close` for a fixed-length response.
pub fn add_default_headers(headers: &mut Headers, content_length: usize) {
    headers.set("Content-Length", &content_length.to_string());
    headers.set("Connection", "close");
}

/// Position of a [`ResponseWriter`] in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterPhase {
    StatusLine,
    Headers,
    Body,
    Done,
}

/// Writes one response to an async sink, in wire order.
///
/// Each call encodes into an internal buffer and then flushes it, so nothing
/// reaches the sink for a call rejected as out of order.
pub struct ResponseWriter<W> {
    sink: W,
    buffer: BytesMut,
    phase: WriterPhase,
    written: usize,
}

impl<W: AsyncWrite + Unpin> ResponseWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            buffer: BytesMut::with_capacity(1024),
            phase: WriterPhase::StatusLine,
            written: 0,
        }
    }

    pub fn phase(&self) -> WriterPhase {
        self.phase
    }

    /// Total bytes handed to the sink so far.
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn expect(&self, phase: WriterPhase, attempted: &'static str) -> Result<(), WriteError> {
        if self.phase != phase {
            return Err(WriteError::OutOfOrder {
                attempted,
                phase: self.phase,
            });
        }
        Ok(())
    }

    async fn flush_buffer(&mut self) -> Result<(), WriteError> {
        let bytes = self.buffer.split();
        self.sink.write_all(&bytes).await?;
        self.sink.flush().await?;
        self.written += bytes.len();
        Ok(())
    }

    pub async fn write_status_line(&mut self, code: StatusCode) -> Result<(), WriteError> {
        self.expect(WriterPhase::StatusLine, "status line")?;
        write_status_line(&mut self.buffer, code);
        self.flush_buffer().await?;
        self.phase = WriterPhase::Headers;
        Ok(())
    }

    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), WriteError> {
        self.expect(WriterPhase::Headers, "headers")?;
        write_headers(&mut self.buffer, headers);
        self.flush_buffer().await?;
        self.phase = WriterPhase::Body;
        Ok(())
    }

    pub async fn write_body(&mut self, body: &[u8]) -> Result<(), WriteError> {
        self.expect(WriterPhase::Body, "body")?;
        write_body(&mut self.buffer, body);
        self.flush_buffer().await
    }

    /// Writes a whole fixed-length response and completes the writer.
    pub async fn write_fixed(
        &mut self,
        code: StatusCode,
        headers: &Headers,
        body: &[u8],
    ) -> Result<(), WriteError> {
        self.expect(WriterPhase::StatusLine, "fixed response")?;
        write_fixed(&mut self.buffer, code, headers, body);
        self.flush_buffer().await?;
        self.phase = WriterPhase::Done;
        Ok(())
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), WriteError> {
        self.expect(WriterPhase::Body, "chunk")?;
        write_chunk(&mut self.buffer, chunk);
        self.flush_buffer().await
    }

    /// Ends a chunked body. Must be called once, after the last chunk.
    pub async fn write_chunked_trailer_end(
        &mut self,
        trailers: Option<&Headers>,
    ) -> Result<(), WriteError> {
        self.expect(WriterPhase::Body, "chunked terminator")?;
        write_chunked_trailer_end(&mut self.buffer, trailers);
        self.flush_buffer().await?;
        self.phase = WriterPhase::Done;
        Ok(())
    }

    /// Marks a body written through [`write_body`](Self::write_body) as complete.
    pub fn finish(&mut self) -> Result<(), WriteError> {
        self.expect(WriterPhase::Body, "end of body")?;
        self.phase = WriterPhase::Done;
        Ok(())
    }
}
