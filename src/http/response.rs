use std::fmt;

use crate::http::encoding::Encoding;

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Reason phrases for the statuses the server produces.
static REASON_PHRASES: &[(u16, &str)] = &[
    (200, "OK"),
    (201, "Created"),
    (404, "Not Found"),
    (500, "Server Error"),
];

/// HTTP status code.
///
/// Any value can be carried; only the statuses in the reason table render
/// with a reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// 200 OK
    pub const OK: StatusCode = StatusCode(200);
    /// 201 Created
    pub const CREATED: StatusCode = StatusCode(201);
    /// 404 Not Found
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    /// 500 Server Error
    pub const SERVER_ERROR: StatusCode = StatusCode(500);

    /// Returns the numeric HTTP status code.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the reason phrase for this status code.
    ///
    /// Unknown codes get an empty phrase.
    ///
    /// # Example
    ///
    /// ```
    /// # use wren::http::response::StatusCode;
    /// assert_eq!(StatusCode::OK.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::SERVER_ERROR.reason_phrase(), "Server Error");
    /// assert_eq!(StatusCode(418).reason_phrase(), "");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        REASON_PHRASES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, phrase)| *phrase)
            .unwrap_or("")
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A response as produced by a route handler, before wire encoding.
///
/// The writer decides from `encoding` whether the body is compressed and
/// derives `Content-Length` from whatever it ends up sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Value of the Content-Type header
    pub content_type: String,
    /// Uncompressed response body
    pub body: Vec<u8>,
    /// Compression directive inherited from the request
    pub encoding: Encoding,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::OK)
///     .content_type("application/octet-stream")
///     .body(bytes)
///     .encoding(request.encoding)
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: String,
    body: Vec<u8>,
    encoding: Encoding,
}

impl ResponseBuilder {
    /// Creates a new plain-text response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN.to_string(),
            body: Vec::new(),
            encoding: Encoding::Plain,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            body: self.body,
            encoding: self.encoding,
        }
    }
}

impl Response {
    /// Creates a 200 OK plain-text response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::OK).body(body).build()
    }

    /// Creates an empty 201 Created response.
    pub fn created() -> Self {
        ResponseBuilder::new(StatusCode::CREATED).build()
    }

    /// Creates a 404 Not Found response with the given body.
    pub fn not_found(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::NOT_FOUND).body(body).build()
    }

    /// Creates a 500 Server Error response with the given body.
    pub fn server_error(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::SERVER_ERROR)
            .body(body)
            .build()
    }

    /// Returns the same response carrying `encoding`.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}
