//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use inventory_cache::config::{CacheConfig, UpstreamConfig};
use inventory_cache::{DocumentStore, HttpServer, Shutdown};

/// Read an HTTP request head (up to the blank line) from `socket`.
async fn read_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// `f` receives the raw request head and returns the status and body.
/// Status `0` closes the connection without answering.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        let (status, body) = f(head).await;
                        if status == 0 {
                            let _ = socket.shutdown().await;
                            return;
                        }
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock upstream that always returns `body` with status 200.
#[allow(dead_code)]
pub async fn start_fixed_upstream(body: &'static str) -> SocketAddr {
    start_programmable_upstream(move |_| async move { (200, body.to_string()) }).await
}

/// Start a mock upstream that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_hanging_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Upstream settings pointing at a local mock.
pub fn upstream_config(addr: SocketAddr) -> UpstreamConfig {
    UpstreamConfig {
        url: format!("http://{}/map/v1/mtl/map-inventory", addr),
        timeout_secs: 2,
        system_proxy: false,
        ..UpstreamConfig::default()
    }
}

/// Serve `store` on an ephemeral port until `shutdown` triggers.
#[allow(dead_code)]
pub async fn start_server(
    config: &CacheConfig,
    store: DocumentStore,
    shutdown: &Shutdown,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, store);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    addr
}

/// HTTP client that never goes through a proxy and never decompresses.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
