//! Shared helpers for gateway integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use rpc_gateway::config::GatewayConfig;
use rpc_gateway::http::GatewayServer;
use rpc_gateway::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Start the gateway on an ephemeral port. Returns its address and the
/// shutdown coordinator; trigger it at the end of the test.
pub async fn spawn_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = GatewayServer::new(config, None).unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// HTTP client for talking to the gateway under test.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Base test config pointing at the given upstream address.
pub fn gateway_config(upstream: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.url = format!("http://{upstream}");
    config.upstream.request_timeout_ms = 2_000;
    config
}

/// Start a mock upstream that answers every request with the given status
/// and body. Returns its address and a counter of handled connections.
#[allow(dead_code)]
pub async fn start_mock_upstream(status: u16, body: &'static str) -> (SocketAddr, Arc<AtomicU32>) {
    start_programmable_upstream(move || async move { Some((status, body.to_string())) }).await
}

/// Start a mock upstream that slams every connection shut without a
/// response, so each forward fails at the transport level.
#[allow(dead_code)]
pub async fn start_failing_upstream() -> (SocketAddr, Arc<AtomicU32>) {
    start_programmable_upstream(|| async { None }).await
}

/// Start a programmable mock upstream. The closure decides per connection:
/// `Some((status, body))` sends an HTTP response, `None` closes the socket.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> (SocketAddr, Arc<AtomicU32>)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<(u16, String)>> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let f = Arc::new(f);

    let accept_hits = hits.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    accept_hits.fetch_add(1, Ordering::SeqCst);
                    let f = f.clone();
                    tokio::spawn(async move {
                        match f().await {
                            Some((status, body)) => {
                                read_request(&mut socket).await;
                                let status_text = match status {
                                    200 => "200 OK",
                                    500 => "500 Internal Server Error",
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
                            }
                            None => {}
                        }
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, hits)
}

/// Read one HTTP request (head plus Content-Length body) off the socket so
/// the client is never interrupted mid-write.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if let Some(header_end) = find_subsequence(&buf, b"\r\n\r\n") {
                    let body_start = header_end + 4;
                    let expected = content_length(&buf[..header_end]);
                    if buf.len() >= body_start + expected {
                        break;
                    }
                }
            }
        }
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn content_length(head: &[u8]) -> usize {
    let head = String::from_utf8_lossy(head);
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())?
        })
        .unwrap_or(0)
}
