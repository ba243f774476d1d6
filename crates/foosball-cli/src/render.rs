//! Plain-text rendering of match history and team statistics.

use foosball_core::{record::Match, stats::TeamRow, team::TeamId};
use tabled::{Table, Tabled};

const BAR_WIDTH: usize = 40;

// ─── Tables ───────────────────────────────────────────────────────────────────

/// Display row for one match.
#[derive(Debug, Tabled)]
struct MatchLine {
  #[tabled(rename = "DATE")]
  date:     String,
  #[tabled(rename = "TEAMS")]
  teams:    String,
  #[tabled(rename = "SCORE")]
  score:    String,
  #[tabled(rename = "COMMENTS")]
  comments: String,
}

impl From<&Match> for MatchLine {
  fn from(m: &Match) -> Self {
    let teams: Vec<&str> = m.teams().map(TeamId::as_str).collect();
    let scores: Vec<String> = m.scores().map(|s| s.to_string()).collect();
    let comments: Vec<&str> = m.comments().filter(|c| !c.is_empty()).collect();
    Self {
      date:     m.date().to_string(),
      teams:    teams.join(" vs "),
      score:    scores.join("-"),
      comments: comments.join("; "),
    }
  }
}

/// Display row for one team's statistics.
#[derive(Debug, Tabled)]
struct StatsLine {
  #[tabled(rename = "TEAM")]
  team:        String,
  #[tabled(rename = "MATCHES")]
  matches:     u32,
  #[tabled(rename = "TOTAL SCORE")]
  total_score: u64,
  #[tabled(rename = "AVG")]
  average:     String,
}

impl From<&TeamRow> for StatsLine {
  fn from(r: &TeamRow) -> Self {
    Self {
      team:        r.team.to_string(),
      matches:     r.matches,
      total_score: r.total_score,
      average:     format!("{:.1}", r.average_score),
    }
  }
}

/// One line per match: date, teams, scores and any comments.
pub fn matches_table(matches: &[Match]) -> String {
  Table::new(matches.iter().map(MatchLine::from)).to_string()
}

pub fn stats_table(rows: &[TeamRow]) -> String {
  Table::new(rows.iter().map(StatsLine::from)).to_string()
}

// ─── Charts ───────────────────────────────────────────────────────────────────

/// Horizontal bar chart; the largest value spans the full bar width.
pub fn bar_chart(title: &str, bars: &[(&str, u64)]) -> String {
  let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
  let max = bars.iter().map(|&(_, v)| v).max().unwrap_or(0);

  let mut out = format!("{title}\n");
  for &(label, value) in bars {
    let len = if max == 0 {
      0
    } else {
      // Round to nearest so small non-zero values stay visible.
      ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
    };
    let len = if value > 0 { len.max(1) } else { 0 };
    let bar = "█".repeat(len);
    out.push_str(&format!("{label:<label_width$}  {bar} {value}\n"));
  }
  out
}

/// The two charts shown under the statistics table.
pub fn stats_charts(rows: &[TeamRow]) -> String {
  let played: Vec<(&str, u64)> = rows
    .iter()
    .map(|r| (r.team.as_str(), u64::from(r.matches)))
    .collect();
  let scored: Vec<(&str, u64)> =
    rows.iter().map(|r| (r.team.as_str(), r.total_score)).collect();

  format!(
    "{}\n{}",
    bar_chart("Matches played by team", &played),
    bar_chart("Total score by team", &scored)
  )
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Utc};
  use foosball_core::{
    entry::MatchEntry,
    stats::{StatsOrder, aggregate, ranked},
  };
  use uuid::Uuid;

  use super::*;

  fn history() -> Vec<Match> {
    let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
    vec![
      MatchEntry::new(date)
        .side("Bob Alice", 10, "comeback")
        .side("Carol Dave", 7, "")
        .validate()
        .unwrap()
        .into_match(uuid_for(1), 1, Utc::now()),
      MatchEntry::new(date)
        .side("Dave Carol", 5, "")
        .side("Alice Bob", 9, "")
        .validate()
        .unwrap()
        .into_match(uuid_for(2), 2, Utc::now()),
    ]
  }

  fn uuid_for(n: u128) -> Uuid { Uuid::from_u128(n) }

  /// The table line that mentions `needle`.
  fn line_with<'a>(out: &'a str, needle: &str) -> (usize, &'a str) {
    out
      .lines()
      .enumerate()
      .find(|(_, line)| line.contains(needle))
      .unwrap_or_else(|| panic!("no line with {needle:?} in\n{out}"))
  }

  #[test]
  fn matches_table_lists_every_match() {
    let out = matches_table(&history());
    let (header, line) = line_with(&out, "DATE");
    assert!(line.contains("TEAMS") && line.contains("COMMENTS"), "{out}");

    let (first, line) = line_with(&out, "Alice Bob vs Carol Dave");
    assert!(line.contains("2024-02-10"), "{out}");
    assert!(line.contains("10-7"), "{out}");
    assert!(line.contains("comeback"), "{out}");

    let (second, line) = line_with(&out, "Carol Dave vs Alice Bob");
    assert!(line.contains("5-9"), "{out}");

    assert!(header < first && first < second, "{out}");
  }

  #[test]
  fn stats_table_formats_average() {
    let rows = ranked(&aggregate(&history()), StatsOrder::Team);
    let out = stats_table(&rows);
    assert!(line_with(&out, "TEAM").1.contains("TOTAL SCORE"), "{out}");

    let (alice, line) = line_with(&out, "Alice Bob");
    assert!(line.contains(" 19 ") && line.contains(" 9.5 "), "{out}");
    let (carol, line) = line_with(&out, "Carol Dave");
    assert!(line.contains(" 12 ") && line.contains(" 6.0 "), "{out}");
    assert!(alice < carol, "{out}");
  }

  #[test]
  fn bars_scale_to_the_largest_value() {
    let out = bar_chart("t", &[("a", 10), ("bb", 5), ("c", 0)]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "t");
    assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
    assert_eq!(lines[2].matches('█').count(), BAR_WIDTH / 2);
    assert_eq!(lines[3].matches('█').count(), 0);
    assert!(lines[2].starts_with("bb  "));
    assert!(lines[3].ends_with(" 0"));
  }

  #[test]
  fn tiny_values_still_get_a_bar() {
    let out = bar_chart("t", &[("a", 1000), ("b", 1)]);
    assert_eq!(out.lines().nth(2).unwrap().matches('█').count(), 1);
  }

  #[test]
  fn empty_chart_is_just_the_title() {
    assert_eq!(bar_chart("nothing", &[]), "nothing\n");
  }

  #[test]
  fn charts_cover_every_team() {
    let rows = ranked(&aggregate(&history()), StatsOrder::Team);
    let out = stats_charts(&rows);
    assert_eq!(out.matches("Alice Bob").count(), 2);
    assert_eq!(out.matches("Carol Dave").count(), 2);
  }
}
