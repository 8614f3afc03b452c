use std::collections::HashMap;
use std::fmt;

use crate::http::encoding::{Encoding, negotiate};

/// HTTP request methods.
///
/// Only the methods the server routes on are recognised. A request line with
/// any other method never matches and is skipped by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
}

/// Represents a parsed HTTP request from a client.
///
/// Built in one go by [`parse_request`](crate::http::parser::parse_request) and
/// not modified afterwards. `method` stays `None` when the buffer never
/// contained a recognisable request line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method, if a request line was matched
    pub method: Option<Method>,
    /// The request target (e.g., "/files/notes.txt")
    pub target: String,
    /// Request headers keyed by lower-cased name; the last occurrence wins
    pub headers: HashMap<String, String>,
    /// Everything after the blank line, with line terminators removed
    pub body: Vec<u8>,
    /// Response compression negotiated from `Accept-Encoding`
    pub encoding: Encoding,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Example
    ///
    /// ```
    /// # use wren::http::request::Method;
    /// assert_eq!(Method::from_str("PUT"), Some(Method::PUT));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("DELETE"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the request, negotiating its encoding from the headers set so far.
    pub fn build(self) -> Result<Request, &'static str> {
        let encoding = negotiate(&self.headers);

        Ok(Request {
            method: Some(self.method.ok_or("method missing")?),
            target: self.target.ok_or("target missing")?,
            headers: self.headers,
            body: self.body,
            encoding,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// The `User-Agent` header, or an empty string when the client sent none.
    pub fn user_agent(&self) -> &str {
        self.header("User-Agent").unwrap_or("")
    }
}
