//! Demo handler served by the `httpfromtcp` binary.
//!
//! Routes on the request target:
//!
//! - `/yourproblem` → 400 page
//! - `/myproblem` → 500 page
//! - `/chunked` → paced chunked body with `X-Content-SHA256` and
//!   `X-Content-Length` trailers
//! - anything else → 200 page

use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio::io::AsyncWrite;

use crate::http::error::WriteError;
use crate::http::headers::Headers;
use crate::http::request::Request;
use crate::http::response::StatusCode;
use crate::http::writer::{ResponseWriter, add_default_headers};
use crate::server::Handler;

const CHUNK_COUNT: u8 = 100;

const BAD_REQUEST_PAGE: &str = "<html>
  <head>
    <title>400 Bad Request</title>
  </head>
  <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
  </body>
</html>";

const INTERNAL_ERROR_PAGE: &str = "<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
  </body>
</html>";

const OK_PAGE: &str = "<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
  </body>
</html>";

#[derive(Debug, Clone)]
pub struct DemoHandler {
    chunk_interval: Duration,
}

impl DemoHandler {
    /// `chunk_interval` is the pause between chunks on `/chunked`.
    pub fn new(chunk_interval: Duration) -> Self {
        Self { chunk_interval }
    }

    async fn write_chunked<W>(&self, writer: &mut ResponseWriter<W>) -> Result<(), WriteError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut headers = Headers::new();
        headers.add("Transfer-Encoding", "chunked");
        headers.add("Content-Type", "text/plain");
        headers.add("Trailer", "X-Content-SHA256, X-Content-Length");
        headers.add("Connection", "close");

        writer.write_status_line(StatusCode::OK).await?;
        writer.write_headers(&headers).await?;

        let mut hasher = Sha256::new();
        let mut content_length = 0usize;

        for i in 0..CHUNK_COUNT {
            let chunk = demo_chunk(i);
            writer.write_chunk(&chunk).await?;
            hasher.update(&chunk);
            content_length += chunk.len();

            if !self.chunk_interval.is_zero() {
                tokio::time::sleep(self.chunk_interval).await;
            }
        }

        let mut trailers = Headers::new();
        trailers.add("X-Content-SHA256", &format!("{:x}", hasher.finalize()));
        trailers.add("X-Content-Length", &content_length.to_string());

        writer.write_chunked_trailer_end(Some(&trailers)).await
    }
}

/// Chunk `i` of the `/chunked` body: `i + 1` copies of byte `i`.
pub fn demo_chunk(i: u8) -> Vec<u8> {
    vec![i; usize::from(i) + 1]
}

async fn write_html<W>(
    writer: &mut ResponseWriter<W>,
    code: StatusCode,
    page: &str,
) -> Result<(), WriteError>
where
    W: AsyncWrite + Unpin + Send,
{
    let mut headers = Headers::new();
    headers.add("Content-Type", "text/html");
    add_default_headers(&mut headers, page.len());

    writer.write_fixed(code, &headers, page.as_bytes()).await
}

impl Handler for DemoHandler {
    async fn handle<W>(&self, request: &Request, writer: &mut ResponseWriter<W>) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let target = request.target().unwrap_or("/");

        match target {
            "/yourproblem" => write_html(writer, StatusCode::BAD_REQUEST, BAD_REQUEST_PAGE).await?,
            "/myproblem" => {
                write_html(writer, StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_PAGE).await?
            }
            "/chunked" => self.write_chunked(writer).await?,
            _ => write_html(writer, StatusCode::OK, OK_PAGE).await?,
        }

        tracing::info!(request_target = %target, "Response sent");
        Ok(())
    }
}
