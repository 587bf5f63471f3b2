//! TCP server: accept loop and the handler contract.

use std::future::Future;

use tokio::io::AsyncWrite;

use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

pub mod listener;

/// Application logic answering parsed requests.
///
/// A handler must produce exactly one complete response, fixed or chunked,
/// before its future resolves. The connection is closed afterwards whatever
/// the outcome.
pub trait Handler: Send + Sync + 'static {
    fn handle<W>(
        &self,
        request: &Request,
        writer: &mut ResponseWriter<W>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send
    where
        W: AsyncWrite + Unpin + Send;
}
