//! The `MatchStore` trait and the operations built on top of it.
//!
//! Storage backends (e.g. `foosball-store-sqlite`) implement the trait. Entry
//! surfaces go through [`ingest`] so that nothing unvalidated is appended.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::{
  entry::MatchEntry,
  error::ValidationError,
  record::{Match, NewMatch},
  stats::{Standings, aggregate},
};

/// Abstraction over an append-only match history.
pub trait MatchStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a validated match. The store assigns the match id, the
  /// insertion sequence number and the `recorded_at` timestamp.
  fn append(
    &self,
    new_match: NewMatch,
  ) -> impl Future<Output = Result<Match, Self::Error>> + Send + '_;

  /// Retrieve a match by id. Returns `None` if not found.
  fn get_match(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Match>, Self::Error>> + Send + '_;

  /// The full history, newest first by date and then by insertion order.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Match>, Self::Error>> + Send + '_;
}

/// Failure to ingest a match entry.
#[derive(Debug, Error)]
pub enum IngestError<E> {
  /// The entry was rejected and nothing was written.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] E),
}

/// Validate `entry` and append it to `store`.
pub async fn ingest<S: MatchStore>(
  store: &S,
  entry: MatchEntry,
) -> Result<Match, IngestError<S::Error>> {
  let new_match = entry.validate()?;
  store.append(new_match).await.map_err(IngestError::Store)
}

/// Recompute per-team statistics from the store's full history.
pub async fn standings<S: MatchStore>(store: &S) -> Result<Standings, S::Error> {
  let history = store.list_all().await?;
  Ok(aggregate(&history))
}
