//! End-to-end tests: raw request bytes in, raw response bytes out

use flate2::read::GzDecoder;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use wren::config::Config;
use wren::http::connection::Connection;
use wren::server::listener::serve;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wren-conn-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn exchange(raw: &[u8], root: &Path) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    client.write_all(raw).await.unwrap();

    let root: Arc<Path> = Arc::from(root);
    let handle = tokio::spawn(async move {
        let mut conn = Connection::new(server, root, 1024 * 1024);
        conn.run().await
    });

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    handle.await.unwrap().unwrap();
    out
}

fn split_response(bytes: &[u8]) -> (String, Vec<u8>) {
    let end = bytes
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("missing header terminator");
    (
        String::from_utf8(bytes[..end].to_vec()).unwrap(),
        bytes[end + 4..].to_vec(),
    )
}

#[tokio::test]
async fn test_echo_request() {
    let out = exchange(
        b"GET /echo/abc HTTP/1.1\r\nHost: x\r\n\r\n",
        &scratch_dir("echo"),
    )
    .await;

    assert_eq!(
        out,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc".to_vec()
    );
}

#[tokio::test]
async fn test_user_agent_request() {
    let out = exchange(
        b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-client/1.0\r\n\r\n",
        &scratch_dir("agent"),
    )
    .await;
    let (head, body) = split_response(&out);

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, b"test-client/1.0".to_vec());
}

#[tokio::test]
async fn test_missing_file_request() {
    let out = exchange(
        b"GET /files/missing.txt HTTP/1.1\r\n\r\n",
        &scratch_dir("missing"),
    )
    .await;
    let (head, _) = split_response(&out);

    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn test_file_upload_then_download() {
    let dir = scratch_dir("upload");

    let out = exchange(
        b"POST /files/new.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
        &dir,
    )
    .await;
    let (head, _) = split_response(&out);
    assert!(head.starts_with("HTTP/1.1 201 Created\r\n"));
    assert_eq!(std::fs::read(dir.join("new.txt")).unwrap(), b"hello".to_vec());

    let out = exchange(b"GET /files/new.txt HTTP/1.1\r\n\r\n", &dir).await;
    let (head, body) = split_response(&out);
    assert!(head.contains("Content-Type: application/octet-stream"));
    assert_eq!(body, b"hello".to_vec());
}

#[tokio::test]
async fn test_gzip_response() {
    let out = exchange(
        b"GET /echo/compress-me HTTP/1.1\r\nAccept-Encoding: deflate, gzip\r\n\r\n",
        &scratch_dir("gzip"),
    )
    .await;
    let (head, body) = split_response(&out);

    assert!(head.contains("\r\nContent-Encoding: gzip\r\n"));
    assert!(head.contains(&format!("Content-Length: {}", body.len())));

    let mut decoded = String::new();
    GzDecoder::new(&body[..])
        .read_to_string(&mut decoded)
        .unwrap();
    assert_eq!(decoded, "compress-me");
}

#[tokio::test]
async fn test_unsupported_encoding_is_plain() {
    let out = exchange(
        b"GET /echo/abc HTTP/1.1\r\nAccept-Encoding: invalid-encoding\r\n\r\n",
        &scratch_dir("invalid"),
    )
    .await;
    let (head, body) = split_response(&out);

    assert!(!head.contains("Content-Encoding"));
    assert_eq!(body, b"abc".to_vec());
}

#[tokio::test]
async fn test_garbage_request_is_not_found() {
    let out = exchange(b"definitely not http", &scratch_dir("garbage")).await;

    assert_eq!(
        out,
        b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 0\r\n\r\n".to_vec()
    );
}

#[tokio::test]
async fn test_client_closing_without_data_gets_no_response() {
    let (mut client, server) = tokio::io::duplex(1024);
    client.shutdown().await.unwrap();

    let root: Arc<Path> = Arc::from(scratch_dir("silent").as_path());
    let mut conn = Connection::new(server, root, 1024);
    conn.run().await.unwrap();
    drop(conn);

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_listener_serves_tcp_clients() {
    let dir = scratch_dir("tcp");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cfg = Config {
        listen_addr: addr.to_string(),
        directory: dir,
        ..Config::default()
    };
    tokio::spawn(async move { serve(listener, &cfg).await });

    for text in ["one", "two"] {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(format!("GET /echo/{text} HTTP/1.1\r\n\r\n").as_bytes())
            .await
            .unwrap();

        let mut out = Vec::new();
        stream.read_to_end(&mut out).await.unwrap();
        let (head, body) = split_response(&out);

        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert_eq!(body, text.as_bytes().to_vec());
    }
}
