//! Content-encoding negotiation and gzip compression.

use std::collections::HashMap;
use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Header the directive is negotiated from, in its stored (lower-cased) form.
const ACCEPT_ENCODING: &str = "accept-encoding";

/// Compression directive attached to a request and honoured by the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// No `Accept-Encoding` header was sent
    #[default]
    Plain,
    /// The client accepts gzip
    Gzip,
    /// `Accept-Encoding` was sent without gzip; answered uncompressed like `Plain`
    Invalid,
}

impl Encoding {
    /// Whether response bodies must be gzip-compressed.
    pub fn compresses(&self) -> bool {
        matches!(self, Encoding::Gzip)
    }
}

/// Picks the response encoding from a request's headers.
///
/// The header value is split on commas and each token trimmed. Only the exact,
/// case-sensitive token `gzip` selects compression.
///
/// # Example
///
/// ```
/// # use std::collections::HashMap;
/// # use wren::http::encoding::{negotiate, Encoding};
/// let mut headers = HashMap::new();
/// assert_eq!(negotiate(&headers), Encoding::Plain);
///
/// headers.insert("accept-encoding".to_string(), "foo, gzip, bar".to_string());
/// assert_eq!(negotiate(&headers), Encoding::Gzip);
/// ```
pub fn negotiate(headers: &HashMap<String, String>) -> Encoding {
    match headers.get(ACCEPT_ENCODING) {
        None => Encoding::Plain,
        Some(value) if value.split(',').any(|token| token.trim() == "gzip") => Encoding::Gzip,
        Some(_) => Encoding::Invalid,
    }
}

/// Compresses `body` into a single gzip member at the default level.
pub fn gzip(body: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body)?;
    encoder.finish()
}
