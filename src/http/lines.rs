//! Splits a raw request buffer into protocol lines.

const CRLF: &[u8] = b"\r\n";

/// Iterator over the CRLF-separated lines of a buffer.
///
/// Cloning the iterator restarts iteration from the clone's position, so the
/// same buffer can be walked any number of times.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: Option<&'a [u8]>,
}

/// Splits `buf` on every CRLF.
///
/// An empty buffer yields a single empty line and a trailing CRLF yields a
/// trailing empty line. A CRLF inside the body splits the body as well.
pub fn split_lines(buf: &[u8]) -> Lines<'_> {
    Lines { rest: Some(buf) }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;

        match find_crlf(rest) {
            Some(pos) => {
                self.rest = Some(&rest[pos + CRLF.len()..]);
                Some(&rest[..pos])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}
