//! OllamaProvider against a local HTTP server whose first embed call stalls.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sakumon_core::errors::{EmbeddingError, SakumonError};
use sakumon_core::traits::IEmbeddingProvider;
use sakumon_embeddings::OllamaProvider;

const EMBED_BODY: &str = r#"{"embeddings":[[0.25,0.5,0.75]]}"#;

/// Answers `/api/tags` at once and `/api/embed` after `first_embed_delay`
/// the first time, immediately afterwards.
struct StallingServer {
    url: String,
    embed_requests: Arc<AtomicUsize>,
}

impl StallingServer {
    fn start(first_embed_delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let embed_requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&embed_requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let counter = Arc::clone(&counter);
                thread::spawn(move || handle(stream, &counter, first_embed_delay));
            }
        });
        Self {
            url,
            embed_requests,
        }
    }

    fn embed_requests(&self) -> usize {
        self.embed_requests.load(Ordering::SeqCst)
    }
}

fn handle(mut stream: TcpStream, embeds: &AtomicUsize, first_embed_delay: Duration) {
    let Some(path) = read_request_path(&mut stream) else {
        return;
    };
    let body = if path.starts_with("/api/embed") {
        if embeds.fetch_add(1, Ordering::SeqCst) == 0 {
            thread::sleep(first_embed_delay);
        }
        EMBED_BODY
    } else {
        r#"{"models":[]}"#
    };
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    // The client may have hung up after its timeout.
    let _ = stream.write_all(response.as_bytes());
}

/// Read one request (headers plus `Content-Length` body) and return its path.
fn read_request_path(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    head.split_whitespace().nth(1).map(str::to_string)
}

#[test]
fn timed_out_request_does_not_disable_provider() {
    let server = StallingServer::start(Duration::from_millis(800));
    let provider = OllamaProvider::new("nomic".into(), 3, Some(server.url.clone()), 200);
    assert!(provider.health_check());

    let err = provider.embed("二次関数の最小値").unwrap_err();
    assert!(
        matches!(err, SakumonError::Embedding(EmbeddingError::Timeout { timeout_ms: 200, .. })),
        "{err}"
    );
    assert!(err.is_backend_unavailable());
    assert!(provider.is_available());

    let embedding = provider.embed("二次関数の最小値").unwrap();
    assert_eq!(embedding, vec![0.25, 0.5, 0.75]);
    assert_eq!(server.embed_requests(), 2);
}

#[test]
fn embed_requests_are_bounded_by_timeout() {
    let server = StallingServer::start(Duration::from_secs(5));
    let provider = OllamaProvider::new("nomic".into(), 3, Some(server.url.clone()), 150);
    assert!(provider.health_check());

    let started = std::time::Instant::now();
    assert!(provider.embed("x").is_err());
    assert!(started.elapsed() < Duration::from_secs(2));
}
