use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::config::Config;
use crate::http::error::ParseError;
use crate::http::request::Request;
use crate::http::writer::{ResponseWriter, WriterPhase};
use crate::server::Handler;

/// How a connection reads its request off the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Longest wait for the next read before the exchange is aborted.
    pub read_timeout: Duration,
    /// Maximum number of bytes requested per read.
    pub read_chunk_size: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(250),
            read_chunk_size: 1500,
        }
    }
}

impl From<&Config> for ReadOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            read_timeout: cfg.read_timeout(),
            read_chunk_size: cfg.read_chunk_size.max(1),
        }
    }
}

/// Reads one request from `reader`, feeding the parser as bytes arrive.
///
/// # Errors
///
/// Parse errors are returned as is. A read timeout, a failed read, or the end
/// of the stream before the request is complete yield
/// [`ParseError::MalformedRequest`].
pub async fn read_request<R>(reader: &mut R, options: &ReadOptions) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = BytesMut::with_capacity(options.read_chunk_size);
    let mut chunk = vec![0u8; options.read_chunk_size];
    let mut request = Request::new();

    while !request.is_done() {
        let n = match timeout(options.read_timeout, reader.read(&mut chunk)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => {
                return Err(ParseError::MalformedRequest(format!("read failed: {}", e)));
            }
            Err(_) => {
                return Err(ParseError::MalformedRequest(format!(
                    "no data received within {:?}",
                    options.read_timeout
                )));
            }
        };

        if n == 0 {
            return Err(ParseError::MalformedRequest(format!(
                "connection closed during {:?} phase",
                request.state()
            )));
        }

        buffer.extend_from_slice(&chunk[..n]);

        loop {
            let consumed = request.parse(&buffer)?;
            if consumed == 0 {
                break;
            }
            buffer.advance(consumed);
        }

        tracing::trace!(
            read = n,
            buffered = buffer.len(),
            state = ?request.state(),
            "Fed request parser"
        );
    }

    if !buffer.is_empty() {
        tracing::debug!(trailing = buffer.len(), "Discarding bytes after complete request");
    }

    Ok(request)
}

pub enum ConnectionState {
    Reading,
    Handling(Request),
    Closed,
}

/// One client exchange: read a request, let the handler answer, close.
///
/// Connections are never reused; the stream is shut down whatever the outcome.
pub struct Connection<S> {
    stream: S,
    peer: String,
    options: ReadOptions,
    state: ConnectionState,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S, peer: impl Into<String>, options: ReadOptions) -> Self {
        Self {
            stream,
            peer: peer.into(),
            options,
            state: ConnectionState::Reading,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub async fn run<H: Handler>(&mut self, handler: &H) -> anyhow::Result<()> {
        let result = self.drive(handler).await;

        self.state = ConnectionState::Closed;
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(peer = %self.peer, error = %e, "Shutdown failed");
        }

        result
    }

    async fn drive<H: Handler>(&mut self, handler: &H) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let request = read_request(&mut self.stream, &self.options).await?;

                    tracing::info!(
                        peer = %self.peer,
                        method = request.method().unwrap_or_default(),
                        request_target = request.target().unwrap_or_default(),
                        body_len = request.body().len(),
                        "Request received"
                    );

                    self.state = ConnectionState::Handling(request);
                }

                ConnectionState::Handling(request) => {
                    let mut writer = ResponseWriter::new(&mut self.stream);
                    handler.handle(&request, &mut writer).await?;

                    if writer.phase() != WriterPhase::Done {
                        tracing::warn!(
                            peer = %self.peer,
                            phase = ?writer.phase(),
                            "Handler returned before completing its response"
                        );
                    }

                    tracing::debug!(
                        peer = %self.peer,
                        bytes = writer.bytes_written(),
                        "Response written"
                    );
                    // no keep-alive: state stays Closed
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }
}
