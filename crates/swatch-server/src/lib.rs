//! Swatch Server
//!
//! Axum router for the asset proxy:
//! - `GET|HEAD /assets/{collection}/{id}/image`
//! - `GET|HEAD /assets/{collection}/{id}/pdf`
//! - `GET /assets/object?key=...`
//! - `GET /assets/{collection}`
//! - `GET /healthz`
//!
//! Asset bodies are streamed straight from the resolved source. Failure
//! responses carry short fixed messages only.

mod error;
mod handlers;
mod listing;
mod response;

pub use error::ApiError;
pub use response::{asset_response, content_disposition};

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use swatch_fetch::Resolver;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Build the proxy router.
pub fn router(resolver: Arc<Resolver>) -> Router {
  Router::new()
    .route("/healthz", get(handlers::healthz))
    .route("/assets/object", get(handlers::get_object))
    .route("/assets/{collection}", get(listing::list_collection))
    .route(
      "/assets/{collection}/{id}/image",
      get(handlers::get_image).head(handlers::head_asset),
    )
    .route(
      "/assets/{collection}/{id}/pdf",
      get(handlers::get_pdf).head(handlers::head_asset),
    )
    .with_state(resolver)
}

/// Serve `app` until `cancel` fires, then finish in-flight requests.
pub async fn serve(
  listener: TcpListener,
  app: Router,
  cancel: CancellationToken,
) -> std::io::Result<()> {
  if let Ok(addr) = listener.local_addr() {
    info!(%addr, "asset proxy listening");
  }

  axum::serve(listener, app)
    .with_graceful_shutdown(async move { cancel.cancelled().await })
    .await
}
