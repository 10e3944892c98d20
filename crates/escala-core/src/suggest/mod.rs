//! Suggestion pipeline: classify → filter → rank → assemble.
//!
//! Both public operations share the same four stages:
//! - classify the event into its recurring slot
//! - drop roster members who explicitly marked the slot unavailable
//! - rank the remainder by reliability
//! - cap and shape the result (a flat list, or singer/instrumentalist
//!   sub-lists for a full scale)
//!
//! The whole pipeline is a pure, request-scoped computation over a single
//! roster read. Nothing is cached or persisted.

use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::error::{CoreError, DatabaseError};
use crate::roster::{Event, Musician};
use crate::scoring::{rank_by_reliability, reliability};
use crate::slot::{day_name, Slot};
use crate::storage::Database;

/// Caps applied when assembling suggestion lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionCaps {
    /// Maximum entries in a generic suggestion
    pub generic: usize,
    /// Maximum singers in a full scale
    pub singers: usize,
    /// Maximum instrumentalists in a full scale
    pub instrumentalists: usize,
}

impl Default for SuggestionCaps {
    fn default() -> Self {
        Self {
            generic: 8,
            singers: 4,
            instrumentalists: 6,
        }
    }
}

/// One suggested musician, annotated for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub musician_id: String,
    pub name: String,
    pub email: String,
    pub instruments: Vec<String>,
    pub vocals: Vec<String>,
    pub penalty_points: u32,
    pub reliability: i64,
}

impl SuggestionItem {
    fn from_musician(musician: &Musician) -> Self {
        Self {
            musician_id: musician.id.clone(),
            name: musician.name.clone(),
            email: musician.email.clone(),
            instruments: musician.instruments().to_vec(),
            vocals: musician.vocals().to_vec(),
            penalty_points: musician.penalty_points,
            reliability: reliability(musician),
        }
    }
}

/// Result of a generic suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub slot: Slot,
    pub day_name: String,
    pub total_musicians: usize,
    pub total_available: usize,
    pub suggestions: Vec<SuggestionItem>,
}

/// Result of full-scale generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalePlan {
    pub slot: Slot,
    pub day_name: String,
    pub singers: Vec<SuggestionItem>,
    pub instrumentalists: Vec<SuggestionItem>,
    pub total_musicians: usize,
    pub total_available: usize,
    pub unavailable_count: usize,
}

/// Suggestion engine, parameterized by assembly caps.
pub struct SuggestionEngine {
    caps: SuggestionCaps,
}

impl SuggestionEngine {
    /// Create an engine with default caps.
    pub fn new() -> Self {
        Self {
            caps: SuggestionCaps::default(),
        }
    }

    /// Create with custom caps.
    pub fn with_caps(caps: SuggestionCaps) -> Self {
        Self { caps }
    }

    pub fn caps(&self) -> SuggestionCaps {
        self.caps
    }

    /// Roster members not explicitly unavailable for `slot`.
    ///
    /// Missing or corrupt availability data never excludes anyone; only a
    /// stored `false` for the target slot does.
    pub fn filter_available(&self, roster: &[Musician], slot: Slot) -> Vec<Musician> {
        roster
            .iter()
            .filter(|m| m.availability.is_available(slot))
            .cloned()
            .collect()
    }

    /// Generic suggestion: one reliability-ranked list, capped.
    ///
    /// Expects a roster already restricted to active, unblocked accounts
    /// in musician-like roles.
    pub fn suggest(&self, event: &Event, roster: &[Musician]) -> Suggestion {
        let slot = Slot::classify(event.starts_at, event.kind);
        let mut available = self.filter_available(roster, slot);
        rank_by_reliability(&mut available);

        let total_available = available.len();
        available.truncate(self.caps.generic);

        Suggestion {
            slot,
            day_name: day_name(event.starts_at).to_string(),
            total_musicians: roster.len(),
            total_available,
            suggestions: available.iter().map(SuggestionItem::from_musician).collect(),
        }
    }

    /// Full-scale generation: independent singer and instrumentalist
    /// sub-lists, each reliability-ranked and capped.
    ///
    /// A musician qualifying for both sub-lists appears in both; that is
    /// accepted behavior, not deduplicated.
    pub fn generate_scale(&self, event: &Event, roster: &[Musician]) -> ScalePlan {
        let slot = Slot::classify(event.starts_at, event.kind);
        let available = self.filter_available(roster, slot);
        let total_available = available.len();
        let unavailable_count = roster.len() - total_available;

        let mut singers: Vec<Musician> =
            available.iter().filter(|m| m.sings()).cloned().collect();
        let mut instrumentalists: Vec<Musician> =
            available.iter().filter(|m| m.plays()).cloned().collect();

        rank_by_reliability(&mut singers);
        rank_by_reliability(&mut instrumentalists);
        singers.truncate(self.caps.singers);
        instrumentalists.truncate(self.caps.instrumentalists);

        ScalePlan {
            slot,
            day_name: day_name(event.starts_at).to_string(),
            singers: singers.iter().map(SuggestionItem::from_musician).collect(),
            instrumentalists: instrumentalists
                .iter()
                .map(SuggestionItem::from_musician)
                .collect(),
            total_musicians: roster.len(),
            total_available,
            unavailable_count,
        }
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch the event in the caller's church scope, or NotFound.
fn scoped_event(db: &Database, church_id: &str, event_id: &str) -> Result<Event, CoreError> {
    let event = db.get_event(event_id)?;
    if event.church_id.as_deref() != Some(church_id) {
        return Err(DatabaseError::NotFound {
            entity: "event",
            id: event_id.to_string(),
        }
        .into());
    }
    Ok(event)
}

/// Run a generic suggestion for an event, with authorization and scoping.
///
/// Rejections (role, missing church, unknown event) happen before the
/// pipeline runs; the computation itself cannot fail.
pub fn suggest_for_event(
    ctx: &RequestContext,
    db: &Database,
    engine: &SuggestionEngine,
    event_id: &str,
) -> Result<Suggestion, CoreError> {
    ctx.require_director()?;
    let church_id = ctx.require_church()?;
    let event = scoped_event(db, church_id, event_id)?;
    let roster = db.roster(church_id)?;
    Ok(engine.suggest(&event, &roster))
}

/// Generate a full scale for an event, with authorization and scoping.
pub fn scale_for_event(
    ctx: &RequestContext,
    db: &Database,
    engine: &SuggestionEngine,
    event_id: &str,
) -> Result<ScalePlan, CoreError> {
    ctx.require_director()?;
    let church_id = ctx.require_church()?;
    let event = scoped_event(db, church_id, event_id)?;
    let roster = db.roster(church_id)?;
    Ok(engine.generate_scale(&event, &roster))
}
