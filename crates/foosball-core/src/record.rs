//! Match records — the append-only history everything else is derived from.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ValidationError, team::TeamId};

/// Fewest sides a match may have.
pub const MIN_SIDES: usize = 2;

/// One side of a match: a team, the score it made, and a free-text comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
  pub team:    TeamId,
  pub score:   u32,
  #[serde(default)]
  pub comment: String,
}

// ─── NewMatch ────────────────────────────────────────────────────────────────

/// A validated match that has not been stored yet.
///
/// Only produced by [`MatchEntry::validate`](crate::entry::MatchEntry::validate),
/// so a `NewMatch` always has at least [`MIN_SIDES`] sides with normalized
/// teams and non-negative scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
  pub(crate) date:  NaiveDate,
  pub(crate) sides: Vec<Side>,
}

impl NewMatch {
  pub fn date(&self) -> NaiveDate { self.date }

  pub fn sides(&self) -> &[Side] { &self.sides }

  /// Attach the identity the store assigned on insert.
  pub fn into_match(
    self,
    match_id: Uuid,
    seq: i64,
    recorded_at: DateTime<Utc>,
  ) -> Match {
    Match {
      match_id,
      seq,
      date: self.date,
      recorded_at,
      sides: self.sides,
    }
  }
}

// ─── Match ───────────────────────────────────────────────────────────────────

/// A stored match. Immutable once written.
///
/// Conceptually the record holds three parallel sequences (teams, scores,
/// comments); they are kept as one sequence of [`Side`]s so index `i` in each
/// always refers to the same side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
  match_id:    Uuid,
  /// Store-assigned insertion order.
  seq:         i64,
  date:        NaiveDate,
  recorded_at: DateTime<Utc>,
  sides:       Vec<Side>,
}

impl Match {
  /// Reassemble a match read back from storage.
  ///
  /// Storage can be written by other producers, so the side count is checked
  /// again here rather than trusted.
  pub fn from_parts(
    match_id: Uuid,
    seq: i64,
    date: NaiveDate,
    recorded_at: DateTime<Utc>,
    sides: Vec<Side>,
  ) -> Result<Self, ValidationError> {
    if sides.len() < MIN_SIDES {
      return Err(ValidationError::TooFewSides { found: sides.len() });
    }
    Ok(Self { match_id, seq, date, recorded_at, sides })
  }

  pub fn match_id(&self) -> Uuid { self.match_id }

  pub fn seq(&self) -> i64 { self.seq }

  pub fn date(&self) -> NaiveDate { self.date }

  pub fn recorded_at(&self) -> DateTime<Utc> { self.recorded_at }

  pub fn sides(&self) -> &[Side] { &self.sides }

  pub fn teams(&self) -> impl Iterator<Item = &TeamId> {
    self.sides.iter().map(|s| &s.team)
  }

  pub fn scores(&self) -> impl Iterator<Item = u32> {
    self.sides.iter().map(|s| s.score)
  }

  pub fn comments(&self) -> impl Iterator<Item = &str> {
    self.sides.iter().map(|s| s.comment.as_str())
  }
}
