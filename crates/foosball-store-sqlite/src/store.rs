//! [`SqliteStore`] — the SQLite implementation of [`MatchStore`].

use std::path::Path;

use chrono::Utc;
use foosball_core::{
  record::{Match, NewMatch},
  store::MatchStore,
};
use uuid::Uuid;

use crate::{
  Result,
  encode::{RawMatch, RawSide, encode_date, encode_dt, encode_uuid},
  schema::SCHEMA,
};

/// Columns shared by every match read; sides start at column 4.
const SELECT_MATCHES: &str = "
  SELECT m.seq, m.match_id, m.date, m.recorded_at,
         s.team, s.score, s.comment
  FROM matches m
  LEFT JOIN match_sides s ON s.match_seq = m.seq";

const ORDER_NEWEST_FIRST: &str =
  "ORDER BY m.date DESC, m.seq DESC, s.position ASC";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A match history backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// Safe to call on an existing store; the schema is only created once.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening match store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  pub(crate) async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a match query and group the joined rows by match.
  ///
  /// Rows arrive ordered so that all sides of one match are adjacent.
  async fn query_matches(
    &self,
    filter: &'static str,
    param: Option<String>,
  ) -> Result<Vec<Match>> {
    let raws: Vec<RawMatch> = self
      .conn
      .call(move |conn| {
        let sql = format!("{SELECT_MATCHES} {filter} {ORDER_NEWEST_FIRST}");
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = match &param {
          Some(p) => stmt.query(rusqlite::params![p])?,
          None => stmt.query([])?,
        };

        let mut raws: Vec<RawMatch> = Vec::new();
        while let Some(row) = rows.next()? {
          let seq: i64 = row.get(0)?;
          let side = RawSide::from_row(row, 4)?;
          match raws.last_mut() {
            Some(current) if current.seq == seq => current.sides.extend(side),
            _ => raws.push(RawMatch {
              seq,
              match_id: row.get(1)?,
              date: row.get(2)?,
              recorded_at: row.get(3)?,
              sides: side.into_iter().collect(),
            }),
          }
        }
        Ok(raws)
      })
      .await?;

    raws.into_iter().map(RawMatch::into_match).collect()
  }
}

// ─── MatchStore impl ─────────────────────────────────────────────────────────

impl MatchStore for SqliteStore {
  type Error = crate::Error;

  async fn append(&self, new_match: NewMatch) -> Result<Match> {
    let match_id    = Uuid::new_v4();
    let recorded_at = Utc::now();

    let match_id_str    = encode_uuid(match_id);
    let date_str        = encode_date(new_match.date());
    let recorded_at_str = encode_dt(recorded_at);
    let sides: Vec<(String, u32, String)> = new_match
      .sides()
      .iter()
      .map(|s| (s.team.to_string(), s.score, s.comment.clone()))
      .collect();

    let seq: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO matches (match_id, date, recorded_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![match_id_str, date_str, recorded_at_str],
        )?;
        let seq = tx.last_insert_rowid();
        for (position, (team, score, comment)) in sides.iter().enumerate() {
          tx.execute(
            "INSERT INTO match_sides (match_seq, position, team, score, comment)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![seq, position as i64, team, score, comment],
          )?;
        }
        tx.commit()?;
        Ok(seq)
      })
      .await?;

    tracing::debug!(%match_id, seq, sides = new_match.sides().len(), "appended match");
    Ok(new_match.into_match(match_id, seq, recorded_at))
  }

  async fn get_match(&self, id: Uuid) -> Result<Option<Match>> {
    let mut found = self
      .query_matches("WHERE m.match_id = ?1", Some(encode_uuid(id)))
      .await?;
    Ok(found.pop())
  }

  async fn list_all(&self) -> Result<Vec<Match>> {
    self.query_matches("", None).await
  }
}
