//! SQL schema for the match history.
//!
//! Executed on every open; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Matches are strictly append-only.
-- No UPDATE or DELETE is ever issued against these tables.
CREATE TABLE IF NOT EXISTS matches (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,  -- insertion order
    match_id    TEXT NOT NULL UNIQUE,
    date        TEXT NOT NULL,   -- YYYY-MM-DD
    recorded_at TEXT NOT NULL    -- RFC 3339 UTC; store-assigned
);

-- One row per side; `position` is the side's index within the match.
CREATE TABLE IF NOT EXISTS match_sides (
    match_seq INTEGER NOT NULL REFERENCES matches(seq),
    position  INTEGER NOT NULL,
    team      TEXT NOT NULL,     -- normalized roster label
    score     INTEGER NOT NULL CHECK (score >= 0),
    comment   TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (match_seq, position)
);

CREATE INDEX IF NOT EXISTS matches_date_idx ON matches(date);

PRAGMA user_version = 1;
";
