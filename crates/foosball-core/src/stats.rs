//! Per-team statistics derived from the match history.
//!
//! Statistics are never stored. Every read folds the full history again, so
//! the history stays the single source of truth.

use std::{cmp::Reverse, collections::HashMap};

use serde::{Deserialize, Serialize};

use crate::{record::Match, team::TeamId};

/// Running totals for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
  pub matches:     u32,
  pub total_score: u64,
}

impl TeamStats {
  fn record(&mut self, score: u32) {
    self.matches += 1;
    self.total_score += u64::from(score);
  }

  /// Mean score per match played; zero for a team with no matches.
  pub fn average_score(&self) -> f64 {
    if self.matches == 0 {
      0.0
    } else {
      self.total_score as f64 / f64::from(self.matches)
    }
  }
}

/// Team identity to totals. Iteration order is unspecified.
pub type Standings = HashMap<TeamId, TeamStats>;

/// Fold a match history into per-team totals.
///
/// Every side of every match counts once for its team, including a match in
/// which two sides normalize to the same team. The result does not depend on
/// the order of the history or of the sides within a match.
pub fn aggregate<'a, I>(history: I) -> Standings
where
  I: IntoIterator<Item = &'a Match>,
{
  let mut standings = Standings::new();
  for m in history {
    for side in m.sides() {
      standings
        .entry(side.team.clone())
        .or_default()
        .record(side.score);
    }
  }
  standings
}

// ─── Display ordering ────────────────────────────────────────────────────────

/// Explicit ordering for presenting [`Standings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsOrder {
  /// Alphabetical by team identity.
  #[default]
  Team,
  /// Most matches played first.
  Matches,
  /// Highest total score first.
  TotalScore,
}

/// One row of a ranked statistics table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRow {
  pub team:          TeamId,
  pub matches:       u32,
  pub total_score:   u64,
  pub average_score: f64,
}

/// Sort standings for display. Ties fall back to team identity so the output
/// is deterministic.
pub fn ranked(standings: &Standings, order: StatsOrder) -> Vec<TeamRow> {
  let mut entries: Vec<(&TeamId, &TeamStats)> = standings.iter().collect();
  match order {
    StatsOrder::Team => entries.sort_by(|a, b| a.0.cmp(b.0)),
    StatsOrder::Matches => {
      entries.sort_by_key(|(team, stats)| (Reverse(stats.matches), *team))
    }
    StatsOrder::TotalScore => {
      entries.sort_by_key(|(team, stats)| (Reverse(stats.total_score), *team))
    }
  }

  entries
    .into_iter()
    .map(|(team, stats)| TeamRow {
      team:          team.clone(),
      matches:       stats.matches,
      total_score:   stats.total_score,
      average_score: stats.average_score(),
    })
    .collect()
}
