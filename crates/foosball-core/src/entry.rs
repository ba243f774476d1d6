//! Ingestion — turning raw presentation-layer input into a [`NewMatch`].
//!
//! Entry surfaces hand over parallel sequences exactly as the user typed
//! them. Nothing reaches a store until [`MatchEntry::validate`] accepts it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  error::ValidationError,
  record::{MIN_SIDES, NewMatch, Side},
  team::normalize,
};

/// A score as it arrived from an entry surface: typed as a number, or as text
/// still to be parsed. Checked by [`MatchEntry::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreInput {
  Integer(i64),
  Text(String),
  /// Any other JSON number (fractional or beyond `i64`); always rejected.
  Fractional(f64),
}

impl ScoreInput {
  fn to_integer(&self) -> Result<i64, ValidationError> {
    match self {
      Self::Integer(n) => Ok(*n),
      Self::Text(s) => parse_score(s),
      Self::Fractional(f) => {
        Err(ValidationError::InvalidScore { input: f.to_string() })
      }
    }
  }
}

impl From<i64> for ScoreInput {
  fn from(n: i64) -> Self { Self::Integer(n) }
}

impl From<String> for ScoreInput {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<&str> for ScoreInput {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

/// Raw match input: one roster label, score and comment per side.
///
/// `comments` may be left empty, meaning no side has a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
  pub date:     NaiveDate,
  pub teams:    Vec<String>,
  pub scores:   Vec<ScoreInput>,
  #[serde(default)]
  pub comments: Vec<String>,
}

impl MatchEntry {
  pub fn new(date: NaiveDate) -> Self {
    Self {
      date,
      teams: Vec::new(),
      scores: Vec::new(),
      comments: Vec::new(),
    }
  }

  /// Append a side, keeping the three sequences aligned.
  pub fn side(
    mut self,
    team: impl Into<String>,
    score: i64,
    comment: impl Into<String>,
  ) -> Self {
    self.teams.push(team.into());
    self.scores.push(ScoreInput::Integer(score));
    self.comments.push(comment.into());
    self
  }

  /// Check the entry and normalize its rosters.
  ///
  /// An empty comment list stands for an empty comment on every side. Fails
  /// if the sequences otherwise disagree in length, if there are fewer than
  /// two sides, if a roster is blank, or if a score is not an integer, is
  /// negative, or does not fit in a `u32`.
  pub fn validate(mut self) -> Result<NewMatch, ValidationError> {
    if self.comments.is_empty() {
      self.comments = vec![String::new(); self.teams.len()];
    }
    let (teams, scores, comments) =
      (self.teams.len(), self.scores.len(), self.comments.len());
    if teams != scores || teams != comments {
      return Err(ValidationError::LengthMismatch { teams, scores, comments });
    }
    if teams < MIN_SIDES {
      return Err(ValidationError::TooFewSides { found: teams });
    }

    let sides = self
      .teams
      .iter()
      .zip(&self.scores)
      .zip(self.comments)
      .enumerate()
      .map(|(position, ((label, score), comment))| {
        let team = normalize(label);
        if team.is_empty() {
          return Err(ValidationError::EmptyTeam { position });
        }
        let score = score.to_integer()?;
        if score < 0 {
          return Err(ValidationError::NegativeScore { position, score });
        }
        let score = u32::try_from(score)
          .map_err(|_| ValidationError::ScoreOutOfRange { position, score })?;
        Ok(Side { team, score, comment: comment.trim().to_owned() })
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(NewMatch { date: self.date, sides })
  }
}

/// Parse a score typed as text.
///
/// Only the integer syntax is checked here; the sign and range are checked by
/// [`MatchEntry::validate`].
pub fn parse_score(input: &str) -> Result<i64, ValidationError> {
  input
    .trim()
    .parse()
    .map_err(|_| ValidationError::InvalidScore { input: input.to_owned() })
}
