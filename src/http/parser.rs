use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::http::encoding::negotiate;
use crate::http::lines::split_lines;
use crate::http::request::{Method, Request};

// Byte-oriented (`-u`): `.` matches any byte but `\n`, so non-UTF-8 lines still match.
static REQUEST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^(GET|POST|PUT) (.+?) HTTP/(\d(?:\.?\d)?)$").expect("request line pattern")
});

static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^([A-Za-z-]+): (.+)$").expect("header line pattern"));

/// Where the parser is within a request.
///
/// Stages only move forward: `Initial` until a request line matches, `Headers`
/// until the first empty line, then `Body` for the rest of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Initial,
    Headers,
    Body,
}

impl Stage {
    /// Feeds one line to `request` and returns the stage for the next line.
    ///
    /// Lines that do not match the current stage's pattern are dropped. Bytes
    /// that are not UTF-8 in a target or header value become U+FFFD.
    pub fn advance(self, line: &[u8], request: &mut Request) -> Stage {
        match self {
            Stage::Initial => {
                let Some((method, target)) = match_request_line(line) else {
                    return Stage::Initial;
                };
                request.method = Some(method);
                request.target = String::from_utf8_lossy(target).into_owned();
                Stage::Headers
            }

            Stage::Headers if line.is_empty() => Stage::Body,

            Stage::Headers => {
                if let Some((name, value)) = match_header_line(line) {
                    let value = String::from_utf8_lossy(value).into_owned();
                    request.headers.insert(name.to_ascii_lowercase(), value);
                }
                Stage::Headers
            }

            Stage::Body => {
                request.body.extend_from_slice(line);
                Stage::Body
            }
        }
    }
}

/// Matches `METHOD TARGET HTTP/VERSION`, returning the method and raw target.
pub fn match_request_line(line: &[u8]) -> Option<(Method, &[u8])> {
    let caps = REQUEST_LINE.captures(line)?;
    let method = std::str::from_utf8(caps.get(1)?.as_bytes())
        .ok()
        .and_then(Method::from_str)?;

    Some((method, caps.get(2)?.as_bytes()))
}

/// Matches `Name: value`, returning the name as written and the raw value.
pub fn match_header_line(line: &[u8]) -> Option<(&str, &[u8])> {
    let caps = HEADER_LINE.captures(line)?;
    // The name pattern is ASCII only.
    let name = std::str::from_utf8(caps.get(1)?.as_bytes()).ok()?;

    Some((name, caps.get(2)?.as_bytes()))
}

/// Parses a whole request buffer.
///
/// Never fails: unrecognised lines are skipped and a buffer without a request
/// line produces a request with no method and an empty target. The negotiated
/// response encoding is attached before returning.
pub fn parse_request(buf: &[u8]) -> Request {
    let mut request = Request::default();

    split_lines(buf).fold(Stage::Initial, |stage, line| {
        stage.advance(line, &mut request)
    });

    request.encoding = negotiate(&request.headers);
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = parse_request(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");

        assert_eq!(req.method, Some(Method::GET));
        assert_eq!(req.target, "/");
        assert_eq!(req.header("Host"), Some("example.com"));
    }

    #[test]
    fn initial_skips_unmatched_line() {
        let mut req = Request::default();
        let next = Stage::Initial.advance(b"garbage", &mut req);

        assert_eq!(next, Stage::Initial);
        assert_eq!(req, Request::default());
    }

    #[test]
    fn headers_switch_to_body_on_empty_line() {
        let mut req = Request::default();

        assert_eq!(Stage::Headers.advance(b"", &mut req), Stage::Body);
        assert!(req.body.is_empty());
    }

    #[test]
    fn body_keeps_header_like_lines() {
        let mut req = Request::default();
        let next = Stage::Body.advance(b"Host: not-a-header", &mut req);

        assert_eq!(next, Stage::Body);
        assert!(req.headers.is_empty());
        assert_eq!(req.body, b"Host: not-a-header");
    }

    #[test]
    fn headers_keep_non_utf8_values() {
        let mut req = Request::default();
        let next = Stage::Headers.advance(b"User-Agent: caf\xe9", &mut req);

        assert_eq!(next, Stage::Headers);
        assert_eq!(req.header("User-Agent"), Some("caf\u{FFFD}"));
    }
}
