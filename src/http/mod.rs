//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, no
//! chunked bodies, optional gzip on responses.
//!
//! # Architecture
//!
//! - **`lines`**: Splits a raw buffer on CRLF
//! - **`parser`**: Turns those lines into a [`Request`](request::Request)
//! - **`encoding`**: Negotiates gzip from `Accept-Encoding` and compresses bodies
//! - **`request`**: HTTP request representation
//! - **`response`**: Status codes and the handler-level response
//! - **`writer`**: Serializes responses onto the wire
//! - **`connection`**: Drives one connection from read to write
//!
//! # Parser Stages
//!
//! ```text
//!        ┌─────────────┐
//!        │   Initial   │ ← Skip lines until `METHOD TARGET HTTP/x.y`
//!        └──────┬──────┘
//!               │ Request line matched
//!               ▼
//!        ┌─────────────┐
//!        │   Headers   │ ← `Name: value`, others skipped
//!        └──────┬──────┘
//!               │ Empty line
//!               ▼
//!        ┌─────────────┐
//!        │    Body     │ ← Remaining lines joined without CRLF
//!        └─────────────┘
//! ```
//!
//! Because the body is re-split on CRLF and joined back without it, a body
//! that itself contains CRLF reaches handlers with those bytes removed.
//!
//! # Connection State Machine
//!
//! ```text
//!   Reading ──▶ Processing ──▶ Writing ──▶ Closed
//!      │                                     ▲
//!      └──────── client sent nothing ────────┘
//! ```

pub mod connection;
pub mod encoding;
pub mod lines;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
