use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::TryStreamExt;
use swatch_config::RemoteConfig;
use swatch_host_http::{HttpError, RemoteClient};

async fn spawn_upstream() -> SocketAddr {
  let app = Router::new()
    .route(
      "/swatch.webp",
      get(|| async { ([(header::CONTENT_TYPE, "image/webp")], "RIFFWEBP") }),
    )
    .route("/plain", get(|| async { "plain bytes" }))
    .route("/gone", get(|| async { StatusCode::GONE.into_response() }))
    .route(
      "/slow",
      get(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
      }),
    );

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  addr
}

fn client(timeout_ms: u64) -> RemoteClient {
  RemoteClient::new(&RemoteConfig {
    timeout_ms,
    ..Default::default()
  })
  .unwrap()
}

#[tokio::test]
async fn test_get_streams_body_and_type() {
  let addr = spawn_upstream().await;
  let response = client(2_000)
    .get(&format!("http://{}/swatch.webp", addr))
    .await
    .unwrap();

  assert_eq!(response.status, 200);
  assert_eq!(response.content_type.as_deref(), Some("image/webp"));
  assert_eq!(response.content_length, Some(8));

  let chunks: Vec<_> = response.body.try_collect().await.unwrap();
  assert_eq!(chunks.concat(), b"RIFFWEBP");
}

#[tokio::test]
async fn test_error_status() {
  let addr = spawn_upstream().await;
  let err = client(2_000)
    .get(&format!("http://{}/gone", addr))
    .await
    .unwrap_err();
  assert!(matches!(err, HttpError::Status(410)));

  let err = client(2_000)
    .head(&format!("http://{}/missing", addr))
    .await
    .unwrap_err();
  assert!(matches!(err, HttpError::Status(404)));
}

#[tokio::test]
async fn test_head_ok() {
  let addr = spawn_upstream().await;
  let status = client(2_000)
    .head(&format!("http://{}/plain", addr))
    .await
    .unwrap();
  assert_eq!(status, 200);
}

#[tokio::test]
async fn test_header_timeout() {
  let addr = spawn_upstream().await;
  let err = client(100)
    .get(&format!("http://{}/slow", addr))
    .await
    .unwrap_err();
  assert!(matches!(err, HttpError::Timeout));
}

#[tokio::test]
async fn test_connection_refused() {
  let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let err = client(2_000)
    .get(&format!("http://{}/swatch.webp", addr))
    .await
    .unwrap_err();
  assert!(matches!(err, HttpError::Request(_)));
}

#[tokio::test]
async fn test_rejects_non_http() {
  let err = client(2_000).get("ftp://example.com/a.png").await.unwrap_err();
  assert!(matches!(err, HttpError::UnsupportedScheme(_)));
}
