//! OllamaProvider against a minimal local HTTP responder.

use quarry_core::errors::EmbeddingError;
use quarry_core::models::BackendReply;
use quarry_core::traits::IEmbeddingProvider;
use quarry_core::QuarryError;
use quarry_embeddings::OllamaProvider;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Serve `status` + `body` to every connection; returns the base URL.
async fn serve(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(respond(stream, status, body));
        }
    });
    format!("http://{addr}")
}

async fn respond(mut stream: TcpStream, status: &str, body: &str) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn parses_embeddings_reply() {
    let url = serve("200 OK", r#"{"embeddings":[[0.1,0.2],[0.3,0.4]]}"#).await;
    let provider = OllamaProvider::new("nomic-embed-text".into(), 2, Some(url));

    let reply = provider.embed_batch(&texts(&["a", "b"])).await.unwrap();

    assert_eq!(
        reply,
        BackendReply::Embeddings(vec![vec![0.1, 0.2], vec![0.3, 0.4]])
    );
    assert!(provider.is_available());
}

#[test]
fn name_is_the_backend_not_the_model() {
    let provider = OllamaProvider::new("nomic-embed-text".into(), 768, None);

    assert_eq!(provider.name(), "ollama");
    assert_eq!(provider.model(), "nomic-embed-text");
}

#[tokio::test]
async fn missing_field_is_malformed() {
    let url = serve("200 OK", r#"{"embedding":[0.1,0.2]}"#).await;
    let provider = OllamaProvider::new("m".into(), 2, Some(url));

    let reply = provider.embed_batch(&texts(&["a"])).await.unwrap();

    assert!(matches!(reply, BackendReply::Malformed { .. }));
}

#[tokio::test]
async fn server_error_carries_status() {
    let url = serve("503 Service Unavailable", r#"{"error":"loading model"}"#).await;
    let provider = OllamaProvider::new("m".into(), 2, Some(url));

    let err = provider.embed_batch(&texts(&["a"])).await.unwrap_err();

    match err {
        QuarryError::EmbeddingError(e @ EmbeddingError::Http { status: 503, .. }) => {
            assert!(e.is_transient());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn health_check_hits_tags_endpoint() {
    let url = serve("200 OK", r#"{"models":[]}"#).await;
    let provider = OllamaProvider::new("m".into(), 2, Some(format!("{url}/")));

    assert!(!provider.is_available());
    assert!(provider.health_check().await);
    assert!(provider.is_available());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let provider = OllamaProvider::new("m".into(), 2, Some("http://127.0.0.1:9".into()));

    assert!(!provider.health_check().await);
    let err = provider.embed_batch(&texts(&["a"])).await.unwrap_err();
    assert!(matches!(
        err,
        QuarryError::EmbeddingError(EmbeddingError::Transport { .. })
    ));
}
