//! Roster domain types: musicians, profiles, roles, and events.
//!
//! These are the read-side inputs of the suggestion pipeline. Musicians
//! are owned by a church and mutated elsewhere (profile updates, penalty
//! tracking); the pipeline itself never writes them.

pub mod availability;

pub use availability::AvailabilityMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::slot::Slot;

/// Account role enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Worship director (creates events, generates scales)
    Director,
    /// Church administrator
    Admin,
    /// Generic musician (plays, may also sing)
    Musician,
    /// Singer
    Singer,
    /// Instrumentalist
    Instrumentalist,
}

impl Role {
    /// Roles that can appear on a scale.
    pub fn is_musician_like(&self) -> bool {
        matches!(self, Role::Musician | Role::Singer | Role::Instrumentalist)
    }

    /// Roles allowed to run suggestion/scale generation.
    pub fn can_direct(&self) -> bool {
        matches!(self, Role::Director | Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "director",
            Role::Admin => "admin",
            Role::Musician => "musician",
            Role::Singer => "singer",
            Role::Instrumentalist => "instrumentalist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "director" => Ok(Role::Director),
            "admin" => Ok(Role::Admin),
            "musician" => Ok(Role::Musician),
            "singer" => Ok(Role::Singer),
            "instrumentalist" => Ok(Role::Instrumentalist),
            _ => Err(ValidationError::UnknownValue {
                field: "role",
                value: s.to_string(),
            }),
        }
    }
}

/// Musical profile: tag sets plus lifetime participation count.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Instrument tags (free-form: "violao", "teclado", ...)
    #[serde(default)]
    pub instruments: Vec<String>,
    /// Vocal-range tags (free-form: "soprano", "tenor", ...)
    #[serde(default)]
    pub vocals: Vec<String>,
    /// Lifetime count of events participated in
    #[serde(default)]
    pub total_events: u32,
}

/// A musician account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Musician {
    /// Unique identifier
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    /// Owning church; accounts without one never reach a roster read
    pub church_id: Option<String>,
    /// Incremented by penalty tracking on missed commitments
    pub penalty_points: u32,
    pub active: bool,
    pub blocked: bool,
    pub profile: Option<Profile>,
    /// Weekly availability; empty map means available everywhere
    #[serde(default)]
    pub availability: AvailabilityMap,
}

impl Musician {
    /// Create a new active, unblocked musician with a fresh id.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            phone: None,
            role,
            church_id: None,
            penalty_points: 0,
            active: true,
            blocked: false,
            profile: None,
            availability: AvailabilityMap::default(),
        }
    }

    /// Instrument tags; empty when no profile exists.
    pub fn instruments(&self) -> &[String] {
        self.profile
            .as_ref()
            .map(|p| p.instruments.as_slice())
            .unwrap_or(&[])
    }

    /// Vocal tags; empty when no profile exists.
    pub fn vocals(&self) -> &[String] {
        self.profile
            .as_ref()
            .map(|p| p.vocals.as_slice())
            .unwrap_or(&[])
    }

    /// Lifetime event count; zero when no profile exists.
    pub fn total_events(&self) -> u32 {
        self.profile.as_ref().map(|p| p.total_events).unwrap_or(0)
    }

    /// Whether this musician qualifies for the singers sub-list.
    pub fn sings(&self) -> bool {
        self.role == Role::Singer || !self.vocals().is_empty()
    }

    /// Whether this musician qualifies for the instrumentalists sub-list.
    pub fn plays(&self) -> bool {
        matches!(self.role, Role::Instrumentalist | Role::Musician)
            || !self.instruments().is_empty()
    }
}

/// Kind of church service an event represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Sabbath school (Saturday morning)
    EscolaSabatina,
    /// Divine service (Saturday morning)
    CultoDivino,
    /// Youth service (Saturday afternoon)
    CultoJovem,
    /// Midweek service (Wednesday evening)
    CultoQuarta,
    /// Rehearsal
    Ensaio,
    /// Anything else
    Outro,
}

impl EventKind {
    /// Slot this kind pins the event to, when it names a fixed service.
    pub fn slot_override(self) -> Option<Slot> {
        match self {
            EventKind::EscolaSabatina | EventKind::CultoDivino => Some(Slot::SabadoManha),
            EventKind::CultoJovem => Some(Slot::SabadoTarde),
            EventKind::CultoQuarta => Some(Slot::QuartaNoite),
            EventKind::Ensaio | EventKind::Outro => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::EscolaSabatina => "escola_sabatina",
            EventKind::CultoDivino => "culto_divino",
            EventKind::CultoJovem => "culto_jovem",
            EventKind::CultoQuarta => "culto_quarta",
            EventKind::Ensaio => "ensaio",
            EventKind::Outro => "outro",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "escola_sabatina" => Ok(EventKind::EscolaSabatina),
            "culto_divino" => Ok(EventKind::CultoDivino),
            "culto_jovem" => Ok(EventKind::CultoJovem),
            "culto_quarta" => Ok(EventKind::CultoQuarta),
            "ensaio" => Ok(EventKind::Ensaio),
            "outro" => Ok(EventKind::Outro),
            _ => Err(ValidationError::UnknownValue {
                field: "event kind",
                value: s.to_string(),
            }),
        }
    }
}

/// A scheduled occurrence needing musicians.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub church_id: Option<String>,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub kind: Option<EventKind>,
}

impl Event {
    /// Create a new event with a fresh id.
    pub fn new(title: impl Into<String>, starts_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            church_id: None,
            title: title.into(),
            starts_at,
            kind: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_roundtrip() {
        for role in [
            Role::Director,
            Role::Admin,
            Role::Musician,
            Role::Singer,
            Role::Instrumentalist,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("pastor".parse::<Role>().is_err());
    }

    #[test]
    fn musician_without_profile_defaults() {
        let m = Musician::new("Ana", "ana@example.com", Role::Singer);
        assert!(m.instruments().is_empty());
        assert!(m.vocals().is_empty());
        assert_eq!(m.total_events(), 0);
        assert!(m.sings());
        assert!(!m.plays());
    }

    #[test]
    fn role_and_tags_decide_sublists() {
        let mut m = Musician::new("Beto", "beto@example.com", Role::Singer);
        m.profile = Some(Profile {
            instruments: vec!["violao".into()],
            vocals: vec![],
            total_events: 0,
        });
        // Singer by role, instrumentalist by tag
        assert!(m.sings());
        assert!(m.plays());
    }

    #[test]
    fn musician_serialization() {
        let mut m = Musician::new("Carla", "carla@example.com", Role::Musician);
        m.church_id = Some("igreja-1".into());
        m.profile = Some(Profile {
            instruments: vec!["teclado".into()],
            vocals: vec!["contralto".into()],
            total_events: 12,
        });
        let json = serde_json::to_string(&m).unwrap();
        let decoded: Musician = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.total_events(), 12);
        assert_eq!(decoded.role, Role::Musician);
    }
}
