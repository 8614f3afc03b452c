//! Request routing
//!
//! Maps a parsed request onto one of the built-in handlers:
//!
//! | Target            | Handler                                    |
//! |-------------------|--------------------------------------------|
//! | `/`               | empty 200                                  |
//! | `/echo/<text>`    | `<text>` as `text/plain`                   |
//! | `/user-agent`     | the `User-Agent` header as `text/plain`    |
//! | `/files/<name>`   | GET reads `<name>`, other methods write it |
//! | anything else     | empty 404                                  |

pub mod files;

use std::path::Path;

use crate::http::request::{Method, Request};
use crate::http::response::Response;

const ECHO_PREFIX: &str = "/echo/";
const FILES_PREFIX: &str = "/files/";

/// The handler a request is routed to, borrowing what it needs from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    Echo(&'a str),
    UserAgent,
    ReadFile(&'a str),
    WriteFile(&'a str),
    NotFound,
}

impl<'a> Route<'a> {
    pub fn resolve(req: &'a Request) -> Self {
        let target = req.target.as_str();

        if let Some(text) = target.strip_prefix(ECHO_PREFIX) {
            return Route::Echo(text);
        }

        if let Some(name) = target.strip_prefix(FILES_PREFIX) {
            return match req.method {
                Some(Method::GET) => Route::ReadFile(name),
                _ => Route::WriteFile(name),
            };
        }

        match target {
            "/" => Route::Root,
            "/user-agent" => Route::UserAgent,
            _ => Route::NotFound,
        }
    }
}

/// Runs the handler for `req` and tags the response with the request's encoding.
pub async fn dispatch(req: &Request, root: &Path) -> Response {
    let response = match Route::resolve(req) {
        Route::Root => Response::ok(Vec::new()),
        Route::Echo(text) => Response::ok(text),
        Route::UserAgent => Response::ok(req.user_agent()),
        Route::ReadFile(name) => files::read_file(root, name).await,
        Route::WriteFile(name) => files::write_file(root, name, &req.body).await,
        Route::NotFound => Response::not_found(Vec::new()),
    };

    response.with_encoding(req.encoding)
}
