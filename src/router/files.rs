//! Static file handlers rooted at the configured directory.

use std::path::{Component, Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::http::response::{OCTET_STREAM, Response, ResponseBuilder, StatusCode};

/// Joins `name` onto `root`, dropping any root or drive prefix so an absolute
/// name still lands inside `root`. `..` segments are kept as written.
pub fn under_root(root: &Path, name: &str) -> PathBuf {
    let relative: PathBuf = Path::new(name)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.join(relative)
}

/// Reads `name` under `root` and returns its bytes.
///
/// A file that cannot be opened is a 404, one that cannot be read after
/// opening is a 500.
pub async fn read_file(root: &Path, name: &str) -> Response {
    let path = under_root(root, name);

    let mut file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to open file");
            return Response::not_found("error opening file");
        }
    };

    let mut body = Vec::new();
    if let Err(e) = file.read_to_end(&mut body).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to read file");
        return Response::server_error("error reading file");
    }

    ResponseBuilder::new(StatusCode::OK)
        .content_type(OCTET_STREAM)
        .body(body)
        .build()
}

/// Creates or truncates `name` under `root` and fills it with `body`.
pub async fn write_file(root: &Path, name: &str, body: &[u8]) -> Response {
    let path = under_root(root, name);

    let mut file = match File::create(&path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to open file for writing");
            return Response::not_found("error opening file for writing");
        }
    };

    tracing::info!(path = %path.display(), bytes = body.len(), "Writing file");

    let written = async {
        file.write_all(body).await?;
        file.flush().await
    };
    if let Err(e) = written.await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to write file");
        return Response::server_error("error writing file");
    }

    Response::created()
}
