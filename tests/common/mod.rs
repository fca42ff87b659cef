//! Shared utilities for integration and load testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use connbench::config::{ClosePolicy, ServerConfig};
use connbench::lifecycle::Shutdown;
use connbench::net::connection::ConnectionTracker;
use connbench::net::listener::Listener;
use connbench::server::FixedResponseServer;

/// Spawn a fixed-response server on an ephemeral port.
///
/// Returns the bound address, the server's connection tracker (for observing
/// reuse), and the shutdown handle that stops it.
pub async fn start_server(mut config: ServerConfig) -> (SocketAddr, ConnectionTracker, Shutdown) {
    config.bind_address = "127.0.0.1:0".to_string();
    let listener = Listener::bind(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = FixedResponseServer::new(config).unwrap();
    let tracker = server.tracker();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, tracker, shutdown)
}

/// Server config matching the close-policy benchmark variant ("Hello" body,
/// no persistence).
pub fn close_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.response.body = "Hello".to_string();
    config
}

/// Server config holding idle connections open for `keep_alive_timeout_ms`.
pub fn keep_alive_config(keep_alive_timeout_ms: u64) -> ServerConfig {
    let mut config = close_config();
    config.connection.close_policy = ClosePolicy::KeepAlive;
    config.connection.keep_alive_timeout_ms = keep_alive_timeout_ms;
    config
}

/// Write one HTTP/1.1 GET on the socket and read back the complete response.
#[allow(dead_code)]
pub async fn raw_get(stream: &mut TcpStream) -> String {
    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    read_response(stream).await
}

/// Read one full response (status line + headers + Content-Length body)
/// without consuming past it, so the socket can be reused.
#[allow(dead_code)]
pub async fn read_response(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before a full response arrived");
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = find_header_end(&buf) {
            let head = std::str::from_utf8(&buf[..header_end]).unwrap();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);

            if buf.len() >= header_end + 4 + content_length {
                return String::from_utf8(buf).unwrap();
            }
        }
    }
}

#[allow(dead_code)]
fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
