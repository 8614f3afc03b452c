//! Wren - Minimal HTTP/1.1 Server
//!
//! Core library for request parsing, response serialization and routing.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
