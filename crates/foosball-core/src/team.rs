//! Team identity — the order-independent canonical form of a roster label.
//!
//! A roster label is free text naming the players on one side, separated by
//! whitespace. "Bob Alice" and "Alice Bob" are the same team, so every label
//! is normalized before it is stored or used as an aggregation key.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use crate::error::NormalizationError;

/// The canonical identity of a team.
///
/// Only obtainable through [`normalize`], so holding a `TeamId` means the
/// tokens are already sorted and single-space separated. Deserializing a
/// `TeamId` normalizes the incoming string.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", from = "String")]
pub struct TeamId(String);

impl TeamId {
  pub fn as_str(&self) -> &str { &self.0 }

  /// The player names making up this roster, in canonical order.
  pub fn players(&self) -> impl Iterator<Item = &str> {
    self.0.split(' ').filter(|p| !p.is_empty())
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl fmt::Display for TeamId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for TeamId {
  fn as_ref(&self) -> &str { &self.0 }
}

// Hash and Eq are derived from the inner `String`, so lookups by `&str` agree
// with lookups by `TeamId`.
impl Borrow<str> for TeamId {
  fn borrow(&self) -> &str { &self.0 }
}

impl From<String> for TeamId {
  fn from(label: String) -> Self { normalize(&label) }
}

impl From<&str> for TeamId {
  fn from(label: &str) -> Self { normalize(label) }
}

impl From<TeamId> for String {
  fn from(id: TeamId) -> Self { id.0 }
}

/// Canonicalize a roster label.
///
/// Splits on whitespace, sorts the tokens lexicographically and rejoins them
/// with a single space. Duplicate tokens are kept.
pub fn normalize(label: &str) -> TeamId {
  let mut players: Vec<&str> = label.split_whitespace().collect();
  players.sort();
  TeamId(players.join(" "))
}

/// Canonicalize a roster label from its raw byte representation.
///
/// Used where the label comes from a source that does not guarantee text,
/// such as a database column written by another producer.
pub fn normalize_bytes(raw: &[u8]) -> Result<TeamId, NormalizationError> {
  let label = std::str::from_utf8(raw)?;
  Ok(normalize(label))
}
