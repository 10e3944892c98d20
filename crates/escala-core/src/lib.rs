//! # Escala Core Library
//!
//! This library provides the core business logic for Escala, a worship
//! team scheduling engine. All operations are available through a
//! standalone CLI binary; any richer frontend is a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Slot classification**: maps an event's kind and timestamp to one
//!   of six recurring weekly slots
//! - **Suggestion pipeline**: availability filtering, reliability
//!   ranking, and capped assembly of suggestion lists
//! - **Storage**: SQLite-based roster/event storage and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`Slot`]: recurring weekly period identifiers and classification
//! - [`SuggestionEngine`]: the classify → filter → rank → assemble pipeline
//! - [`Database`]: roster and event persistence
//! - [`Config`]: application configuration management

pub mod context;
pub mod error;
pub mod roster;
pub mod scoring;
pub mod slot;
pub mod storage;
pub mod suggest;

pub use context::RequestContext;
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use roster::{AvailabilityMap, Event, EventKind, Musician, Profile, Role};
pub use scoring::{rank_by_reliability, reliability};
pub use slot::{day_name, Slot};
pub use storage::{Config, Database};
pub use suggest::{
    scale_for_event, suggest_for_event, ScalePlan, Suggestion, SuggestionCaps, SuggestionEngine,
    SuggestionItem,
};
