//! SQLite-based roster and event storage.
//!
//! Provides persistent storage for:
//! - Musician accounts, profiles, and penalty/participation counters
//! - Per-musician weekly availability (stored as a JSON text column)
//! - Scheduled events
//!
//! Availability text is decoded through the fail-open
//! [`AvailabilityMap::from_json`] boundary on every read, so corrupt
//! stored data degrades to "available everywhere" instead of erroring.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::data_dir;
use crate::error::DatabaseError;
use crate::roster::{AvailabilityMap, Event, EventKind, Musician, Profile, Role};
use crate::slot::Slot;

/// SQLite database for roster and event storage.
pub struct Database {
    conn: Connection,
}

/// Raw musician row, converted after the rusqlite closure returns.
struct MusicianRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    role: String,
    church_id: Option<String>,
    penalty_points: i64,
    active: i64,
    blocked: i64,
    instruments: String,
    vocals: String,
    total_events: i64,
    availability: Option<String>,
}

const MUSICIAN_COLUMNS: &str = "id, name, email, phone, role, church_id, penalty_points, \
     active, blocked, instruments, vocals, total_events, availability";

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/escala/escala.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let dir = data_dir()?;
        Self::open_at(&dir.join("escala.db"))
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS musicians (
                    id             TEXT PRIMARY KEY,
                    name           TEXT NOT NULL,
                    email          TEXT NOT NULL,
                    phone          TEXT,
                    role           TEXT NOT NULL,
                    church_id      TEXT,
                    penalty_points INTEGER NOT NULL DEFAULT 0,
                    active         INTEGER NOT NULL DEFAULT 1,
                    blocked        INTEGER NOT NULL DEFAULT 0,
                    instruments    TEXT NOT NULL DEFAULT '[]',
                    vocals         TEXT NOT NULL DEFAULT '[]',
                    total_events   INTEGER NOT NULL DEFAULT 0,
                    availability   TEXT
                );

                CREATE TABLE IF NOT EXISTS events (
                    id        TEXT PRIMARY KEY,
                    church_id TEXT,
                    title     TEXT NOT NULL,
                    starts_at TEXT NOT NULL,
                    kind      TEXT
                );

                -- Roster reads always filter by church
                CREATE INDEX IF NOT EXISTS idx_musicians_church ON musicians(church_id);
                CREATE INDEX IF NOT EXISTS idx_events_church_starts ON events(church_id, starts_at);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Insert a musician.
    pub fn add_musician(&self, musician: &Musician) -> Result<(), DatabaseError> {
        let instruments = serde_json::to_string(musician.instruments())
            .unwrap_or_else(|_| "[]".to_string());
        let vocals =
            serde_json::to_string(musician.vocals()).unwrap_or_else(|_| "[]".to_string());
        self.conn.execute(
            "INSERT INTO musicians (id, name, email, phone, role, church_id, penalty_points, \
             active, blocked, instruments, vocals, total_events, availability) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                musician.id,
                musician.name,
                musician.email,
                musician.phone,
                musician.role.as_str(),
                musician.church_id,
                musician.penalty_points,
                musician.active as i64,
                musician.blocked as i64,
                instruments,
                vocals,
                musician.total_events(),
                musician.availability.to_json(),
            ],
        )?;
        Ok(())
    }

    /// Fetch one musician by id.
    pub fn get_musician(&self, id: &str) -> Result<Musician, DatabaseError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {MUSICIAN_COLUMNS} FROM musicians WHERE id = ?1"),
                params![id],
                Self::read_musician_row,
            )
            .optional()?
            .ok_or_else(|| DatabaseError::NotFound {
                entity: "musician",
                id: id.to_string(),
            })?;
        Self::row_to_musician(row)
    }

    /// The roster for a church: active, unblocked accounts in
    /// musician-like roles, ordered by name.
    pub fn roster(&self, church_id: &str) -> Result<Vec<Musician>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {MUSICIAN_COLUMNS} FROM musicians \
             WHERE church_id = ?1 AND active = 1 AND blocked = 0 \
             AND role IN ('musician', 'singer', 'instrumentalist') \
             ORDER BY name"
        ))?;
        let rows = stmt.query_map(params![church_id], Self::read_musician_row)?;

        let mut roster = Vec::new();
        for row in rows {
            roster.push(Self::row_to_musician(row?)?);
        }
        Ok(roster)
    }

    /// Overwrite a musician's availability map.
    pub fn set_availability(
        &self,
        id: &str,
        availability: &AvailabilityMap,
    ) -> Result<(), DatabaseError> {
        self.touch_musician(
            id,
            "UPDATE musicians SET availability = ?2 WHERE id = ?1",
            params![id, availability.to_json()],
        )
    }

    /// Record a missed commitment: increment penalty points.
    pub fn add_penalty(&self, id: &str, points: u32) -> Result<(), DatabaseError> {
        self.touch_musician(
            id,
            "UPDATE musicians SET penalty_points = penalty_points + ?2 WHERE id = ?1",
            params![id, points],
        )
    }

    /// Record a completed participation: increment the lifetime event count.
    pub fn record_participation(&self, id: &str) -> Result<(), DatabaseError> {
        self.touch_musician(
            id,
            "UPDATE musicians SET total_events = total_events + 1 WHERE id = ?1",
            params![id],
        )
    }

    fn touch_musician(
        &self,
        id: &str,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(sql, params)?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "musician",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Insert an event.
    pub fn add_event(&self, event: &Event) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO events (id, church_id, title, starts_at, kind) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id,
                event.church_id,
                event.title,
                event.starts_at.to_rfc3339(),
                event.kind.map(|k| k.as_str()),
            ],
        )?;
        Ok(())
    }

    /// Fetch one event by id.
    pub fn get_event(&self, id: &str) -> Result<Event, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, church_id, title, starts_at, kind FROM events WHERE id = ?1",
                params![id],
                Self::read_event_row,
            )
            .optional()?
            .ok_or_else(|| DatabaseError::NotFound {
                entity: "event",
                id: id.to_string(),
            })?
    }

    /// Events for a church, soonest first.
    pub fn list_events(&self, church_id: &str) -> Result<Vec<Event>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, church_id, title, starts_at, kind FROM events \
             WHERE church_id = ?1 ORDER BY starts_at",
        )?;
        let rows = stmt.query_map(params![church_id], Self::read_event_row)?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row??);
        }
        Ok(events)
    }

    fn read_musician_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MusicianRow> {
        Ok(MusicianRow {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            role: row.get(4)?,
            church_id: row.get(5)?,
            penalty_points: row.get(6)?,
            active: row.get(7)?,
            blocked: row.get(8)?,
            instruments: row.get(9)?,
            vocals: row.get(10)?,
            total_events: row.get(11)?,
            availability: row.get(12)?,
        })
    }

    fn row_to_musician(row: MusicianRow) -> Result<Musician, DatabaseError> {
        let role: Role = row
            .role
            .parse()
            .map_err(|_| DatabaseError::QueryFailed(format!("unknown role '{}'", row.role)))?;
        Ok(Musician {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            role,
            church_id: row.church_id,
            penalty_points: row.penalty_points.max(0) as u32,
            active: row.active != 0,
            blocked: row.blocked != 0,
            profile: Some(Profile {
                instruments: parse_tags(&row.instruments),
                vocals: parse_tags(&row.vocals),
                total_events: row.total_events.max(0) as u32,
            }),
            availability: AvailabilityMap::from_json(row.availability.as_deref()),
        })
    }

    fn read_event_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Result<Event, DatabaseError>> {
        let id: String = row.get(0)?;
        let church_id: Option<String> = row.get(1)?;
        let title: String = row.get(2)?;
        let starts_at: String = row.get(3)?;
        let kind: Option<String> = row.get(4)?;

        Ok(Self::build_event(id, church_id, title, starts_at, kind))
    }

    fn build_event(
        id: String,
        church_id: Option<String>,
        title: String,
        starts_at: String,
        kind: Option<String>,
    ) -> Result<Event, DatabaseError> {
        let starts_at = DateTime::parse_from_rfc3339(&starts_at)
            .map_err(|e| DatabaseError::QueryFailed(format!("bad timestamp: {e}")))?
            .with_timezone(&Utc);
        // Unknown kind tags fall back to date/time inference
        let kind = kind.and_then(|k| k.parse::<EventKind>().ok());
        Ok(Event {
            id,
            church_id,
            title,
            starts_at,
            kind,
        })
    }

    /// Availability flags for one musician, keyed for display.
    pub fn availability_of(&self, id: &str) -> Result<Vec<(Slot, bool)>, DatabaseError> {
        let musician = self.get_musician(id)?;
        Ok(Slot::ALL
            .into_iter()
            .map(|slot| (slot, musician.availability.is_available(slot)))
            .collect())
    }
}

/// Decode a stored JSON tag array; corrupt data degrades to no tags.
fn parse_tags(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
