use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use swatch_fetch::{AssetContext, ResolveError, Resolver};
use swatch_record::Collection;
use tracing::debug;

use crate::error::ApiError;
use crate::response::asset_response;

pub(crate) async fn healthz() -> &'static str {
  "ok"
}

pub(crate) async fn get_image(
  State(resolver): State<Arc<Resolver>>,
  Path((collection, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
  fetch_asset(&resolver, &collection, &id, AssetContext::Image).await
}

pub(crate) async fn get_pdf(
  State(resolver): State<Arc<Resolver>>,
  Path((collection, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
  fetch_asset(&resolver, &collection, &id, AssetContext::Pdf).await
}

/// Availability check for either asset endpoint. Never transfers payload bytes.
pub(crate) async fn head_asset(
  State(resolver): State<Arc<Resolver>>,
  Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
  let Some(collection) = Collection::parse(&collection) else {
    return Ok(StatusCode::NOT_FOUND);
  };

  match resolver.probe(collection, &id).await? {
    true => Ok(StatusCode::OK),
    false => Ok(StatusCode::NOT_FOUND),
  }
}

pub(crate) async fn get_object(
  State(resolver): State<Arc<Resolver>>,
  Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
  let key = params
    .get("key")
    .filter(|k| !k.is_empty())
    .ok_or(ApiError::MissingKey)?;

  let fetched = resolver.fetch_object(key).await.map_err(ApiError::Object)?;
  Ok(asset_response(fetched))
}

async fn fetch_asset(
  resolver: &Resolver,
  collection: &str,
  id: &str,
  context: AssetContext,
) -> Result<Response, ApiError> {
  let collection = Collection::parse(collection).ok_or(ResolveError::NotFound)?;
  let fetched = resolver.fetch(collection, id, context).await?;
  debug!(%collection, kind = %fetched.kind, "streaming asset");
  Ok(asset_response(fetched))
}
