//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Match dates are stored as `YYYY-MM-DD` so they sort lexically; timestamps
//! as RFC 3339 strings; UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use foosball_core::{
  ValidationError,
  record::{Match, Side},
  team::normalize_bytes,
};
use rusqlite::{Row, types::ValueRef};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read from one `match_sides` row.
pub struct RawSide {
  /// Kept as bytes: rows written by other producers may not hold text.
  pub team:    Vec<u8>,
  pub score:   i64,
  pub comment: String,
}

impl RawSide {
  /// Read the side columns of a `matches LEFT JOIN match_sides` row, starting
  /// at column `first`. Returns `None` when the match has no side row.
  pub fn from_row(row: &Row<'_>, first: usize) -> rusqlite::Result<Option<Self>> {
    let team = match row.get_ref(first)? {
      ValueRef::Null => return Ok(None),
      ValueRef::Text(bytes) | ValueRef::Blob(bytes) => bytes.to_vec(),
      other => {
        return Err(rusqlite::Error::InvalidColumnType(
          first,
          "team".to_owned(),
          other.data_type(),
        ));
      }
    };
    Ok(Some(Self {
      team,
      score: row.get(first + 1)?,
      comment: row.get::<_, Option<String>>(first + 2)?.unwrap_or_default(),
    }))
  }

  fn into_side(self, position: usize) -> Result<Side> {
    let team = normalize_bytes(&self.team).map_err(foosball_core::Error::from)?;
    let score = u32::try_from(self.score).map_err(|_| {
      let err = if self.score < 0 {
        ValidationError::NegativeScore { position, score: self.score }
      } else {
        ValidationError::ScoreOutOfRange { position, score: self.score }
      };
      foosball_core::Error::from(err)
    })?;
    Ok(Side { team, score, comment: self.comment })
  }
}

/// Raw values for one match and all of its sides, in position order.
pub struct RawMatch {
  pub seq:         i64,
  pub match_id:    String,
  pub date:        String,
  pub recorded_at: String,
  pub sides:       Vec<RawSide>,
}

impl RawMatch {
  pub fn into_match(self) -> Result<Match> {
    let sides = self
      .sides
      .into_iter()
      .enumerate()
      .map(|(position, raw)| raw.into_side(position))
      .collect::<Result<Vec<_>>>()?;

    Match::from_parts(
      decode_uuid(&self.match_id)?,
      self.seq,
      decode_date(&self.date)?,
      decode_dt(&self.recorded_at)?,
      sides,
    )
    .map_err(|e| Error::Core(e.into()))
  }
}
