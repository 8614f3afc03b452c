use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::encoding::{Encoding, gzip};
use crate::http::response::{Response, StatusCode, TEXT_PLAIN};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response described by its parts.
pub fn serialize(status: StatusCode, content_type: &str, body: &[u8], encoding: Encoding) -> Vec<u8> {
    let mut buf = Vec::new();
    write_response(&mut buf, status, content_type, body, encoding, gzip);
    buf
}

/// Serializes a response, gzip-compressing the body when its encoding asks for it.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    serialize_with(resp, gzip)
}

/// Serializes a response using `compress` for gzip bodies.
///
/// If `compress` fails the response is replaced by an uncompressed 500 whose
/// body is the error text.
pub fn serialize_with<F>(resp: &Response, compress: F) -> Vec<u8>
where
    F: FnOnce(&[u8]) -> io::Result<Vec<u8>>,
{
    let mut buf = Vec::new();
    write_response(
        &mut buf,
        resp.status,
        &resp.content_type,
        &resp.body,
        resp.encoding,
        compress,
    );
    buf
}

fn write_response<F>(
    buf: &mut Vec<u8>,
    status: StatusCode,
    content_type: &str,
    body: &[u8],
    encoding: Encoding,
    compress: F,
) where
    F: FnOnce(&[u8]) -> io::Result<Vec<u8>>,
{
    if !encoding.compresses() {
        write_head(buf, status, content_type, false, body.len());
        buf.extend_from_slice(body);
        return;
    }

    match compress(body) {
        Ok(compressed) => {
            write_head(buf, status, content_type, true, compressed.len());
            buf.extend_from_slice(&compressed);
        }
        Err(e) => {
            tracing::error!(error = %e, status = %status, "Failed to compress response body");
            let msg = e.to_string();
            write_head(buf, StatusCode::SERVER_ERROR, TEXT_PLAIN, false, msg.len());
            buf.extend_from_slice(msg.as_bytes());
        }
    }
}

fn write_head(
    buf: &mut Vec<u8>,
    status: StatusCode,
    content_type: &str,
    gzipped: bool,
    content_length: usize,
) {
    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    buf.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    if gzipped {
        buf.extend_from_slice(b"Content-Encoding: gzip\r\n");
    }
    buf.extend_from_slice(format!("Content-Length: {content_length}\r\n").as_bytes());

    // Header/body separator
    buf.extend_from_slice(b"\r\n");
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    /// Total number of bytes this writer sends.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
