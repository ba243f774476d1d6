//! Handlers for `/matches` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/matches` | Newest first |
//! | `POST` | `/matches` | Body: [`MatchEntry`]; 201 + stored match, JSON error if invalid |
//! | `GET`  | `/matches/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use foosball_core::{
  entry::MatchEntry,
  record::Match,
  store::{MatchStore, ingest},
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /matches`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Match>>, ApiError>
where
  S: MatchStore,
{
  let matches = store.list_all().await.map_err(ApiError::store)?;
  Ok(Json(matches))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /matches` — body: [`MatchEntry`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  payload: Result<Json<MatchEntry>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MatchStore,
{
  let Json(entry) = payload?;
  let stored = ingest(store.as_ref(), entry).await.inspect_err(|e| {
    tracing::info!(error = %e, "rejected match entry");
  })?;
  tracing::info!(match_id = %stored.match_id(), "recorded match");
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /matches/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Match>, ApiError>
where
  S: MatchStore,
{
  let found = store
    .get_match(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("match {id} not found")))?;
  Ok(Json(found))
}
