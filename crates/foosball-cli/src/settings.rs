//! Runtime configuration.
//!
//! Layered lowest to highest: built-in defaults, the TOML file given with
//! `--config` (optional), then `FOOSBALL_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite file holding the match history. A leading `~/` is expanded.
  pub store_path: PathBuf,
  /// Bind address for `foosball serve`.
  pub host:       String,
  pub port:       u16,
}

impl Settings {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    let mut settings: Settings = config::Config::builder()
      .set_default("store_path", "foosball.db")?
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("FOOSBALL"))
      .build()?
      .try_deserialize()?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
