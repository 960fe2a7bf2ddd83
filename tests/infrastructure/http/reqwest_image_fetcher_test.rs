use std::time::Duration;

use batchpress::application::ports::{ImageFetchError, ImageFetcher};
use batchpress::infrastructure::http::ReqwestImageFetcher;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHUNK_SIZE: usize = 64 * 1024;

/// Serves one chunked response without Content-Length and returns its URL.
async fn chunked_server(chunks: usize, chunk_size: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;

        let head = "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nTransfer-Encoding: chunked\r\n\r\n";
        if socket.write_all(head.as_bytes()).await.is_err() {
            return;
        }
        let chunk = vec![7u8; chunk_size];
        for _ in 0..chunks {
            let frame_head = format!("{:x}\r\n", chunk_size);
            if socket.write_all(frame_head.as_bytes()).await.is_err()
                || socket.write_all(&chunk).await.is_err()
                || socket.write_all(b"\r\n").await.is_err()
            {
                return;
            }
        }
        let _ = socket.write_all(b"0\r\n\r\n").await;
    });

    format!("http://{}/image.png", addr)
}

fn fetcher(max_bytes: u64) -> ReqwestImageFetcher {
    ReqwestImageFetcher::new(Duration::from_secs(5), max_bytes).expect("fetcher should build")
}

#[tokio::test]
async fn given_reachable_image_when_fetched_then_body_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
        .mount(&server)
        .await;

    let body = fetcher(1024)
        .fetch(&format!("{}/a.png", server.uri()))
        .await
        .expect("fetch should succeed");

    assert_eq!(body.as_ref(), &[1u8, 2, 3]);
}

#[tokio::test]
async fn given_error_status_when_fetched_then_status_error_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = fetcher(1024).fetch(&format!("{}/a.png", server.uri())).await;

    assert!(matches!(result, Err(ImageFetchError::Status(503))));
}

#[tokio::test]
async fn given_oversized_body_when_fetched_then_too_large_error_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 2048]))
        .mount(&server)
        .await;

    let result = fetcher(1024).fetch(&format!("{}/big.png", server.uri())).await;

    assert!(matches!(
        result,
        Err(ImageFetchError::TooLarge { limit: 1024, .. })
    ));
}

#[tokio::test]
async fn given_unreachable_host_when_fetched_then_request_error_is_returned() {
    let result = fetcher(1024).fetch("http://127.0.0.1:1/a.png").await;

    assert!(matches!(result, Err(ImageFetchError::RequestFailed(_))));
}

#[tokio::test]
async fn given_chunked_body_over_limit_when_fetched_then_download_stops_early() {
    let total = 128 * CHUNK_SIZE;
    let url = chunked_server(128, CHUNK_SIZE).await;

    let result = fetcher(1024).fetch(&url).await;

    match result {
        Err(ImageFetchError::TooLarge { size, limit }) => {
            assert_eq!(limit, 1024);
            assert!(size > 1024);
            assert!(
                size <= (1024 + CHUNK_SIZE) as u64,
                "read {} bytes of a {} byte body before rejecting",
                size,
                total
            );
        }
        other => panic!("expected too large, got {:?}", other),
    }
}

#[tokio::test]
async fn given_chunked_body_within_limit_when_fetched_then_all_chunks_are_joined() {
    let url = chunked_server(3, 100).await;

    let body = fetcher(1024).fetch(&url).await.expect("fetch should succeed");

    assert_eq!(body.len(), 300);
    assert!(body.iter().all(|b| *b == 7));
}
