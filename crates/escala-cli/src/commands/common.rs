//! Shared helpers for CLI commands.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use escala_core::{Config, Database};
use std::path::PathBuf;

/// Open the database: explicit `--db` path first, then the configured
/// override, then the default location.
pub fn open_db(path: Option<PathBuf>) -> Result<Database, Box<dyn std::error::Error>> {
    let path = match path {
        Some(path) => path,
        None => match Config::load()?.database.path {
            Some(path) => path,
            None => return Ok(Database::open()?),
        },
    };
    Ok(Database::open_at(&path)?)
}

/// Parse a datetime given as RFC3339 or `YYYY-MM-DD HH:MM`.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").map_err(|_| {
        format!("invalid datetime '{raw}' (expected RFC3339 or 'YYYY-MM-DD HH:MM')")
    })?;
    Ok(Utc.from_utc_datetime(&naive))
}
