//! Handler for `GET /stats[?sort=team|matches|total_score]`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use foosball_core::{
  stats::{StatsOrder, TeamRow, ranked},
  store::{MatchStore, standings},
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct StatsParams {
  #[serde(default)]
  pub sort: StatsOrder,
}

/// Per-team totals recomputed from the full history.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<StatsParams>,
) -> Result<Json<Vec<TeamRow>>, ApiError>
where
  S: MatchStore,
{
  let totals = standings(store.as_ref()).await.map_err(ApiError::store)?;
  Ok(Json(ranked(&totals, params.sort)))
}
