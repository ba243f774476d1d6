//! Error types for `foosball-core`.

use std::str::Utf8Error;

use thiserror::Error;

/// A match entry that cannot be accepted into the history.
///
/// Raised at ingestion; a record that fails validation is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error(
    "teams, scores and comments disagree in length ({teams} teams, {scores} \
     scores, {comments} comments)"
  )]
  LengthMismatch {
    teams:    usize,
    scores:   usize,
    comments: usize,
  },

  #[error("a match needs at least two sides, got {found}")]
  TooFewSides { found: usize },

  #[error("side {}: roster is empty", .position + 1)]
  EmptyTeam { position: usize },

  #[error("side {}: score {score} is negative", .position + 1)]
  NegativeScore { position: usize, score: i64 },

  #[error("side {}: score {score} is out of range", .position + 1)]
  ScoreOutOfRange { position: usize, score: i64 },

  #[error("score {input:?} is not an integer")]
  InvalidScore { input: String },
}

/// A roster label that could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
  #[error("roster label is not valid UTF-8: {0}")]
  NotText(#[from] Utf8Error),
}

/// Any core failure; used by storage backends decoding stored rows.
#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid match: {0}")]
  Validation(#[from] ValidationError),

  #[error("invalid roster: {0}")]
  Normalization(#[from] NormalizationError),
}
