use std::path::Path;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router;

/// One client connection serving exactly one request.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    root: Arc<Path>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps `stream`; file routes resolve names under `root`.
    pub fn new(stream: S, root: Arc<Path>, read_buffer_size: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(read_buffer_size),
            root,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    None => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = router::dispatch(req, &self.root).await;
                    tracing::info!(
                        method = req.method.map(|m| m.as_str()).unwrap_or("-"),
                        target = %req.target,
                        status = %response.status,
                        encoding = ?response.encoding,
                        "Request handled"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    tracing::debug!(bytes = writer.len(), "Response written");

                    // One request per connection.
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Performs the connection's single read and parses what arrived.
    ///
    /// Returns `None` when the client closed without sending anything. Data
    /// beyond what one read returns is not waited for.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let n = self.stream.read_buf(&mut self.buffer).await?;

        if n == 0 {
            return Ok(None);
        }

        tracing::debug!(bytes = n, "Request bytes read");

        let request = parse_request(&self.buffer[..n]);
        tracing::debug!(?request, "Request parsed");

        Ok(Some(request))
    }
}
