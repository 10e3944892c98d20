//! Integration tests for roster/event storage and the database-backed
//! suggestion entry points.

use chrono::{TimeZone, Utc};
use escala_core::{
    scale_for_event, suggest_for_event, AvailabilityMap, CoreError, Database, DatabaseError,
    Event, EventKind, Musician, Profile, RequestContext, Role, Slot, SuggestionEngine,
    ValidationError,
};

const CHURCH: &str = "igreja-central";

fn seed_musician(db: &Database, name: &str, role: Role, events: u32, penalties: u32) -> String {
    let mut m = Musician::new(name, format!("{name}@example.com"), role);
    m.church_id = Some(CHURCH.to_string());
    m.penalty_points = penalties;
    m.profile = Some(Profile {
        total_events: events,
        ..Profile::default()
    });
    db.add_musician(&m).unwrap();
    m.id
}

fn seed_event(db: &Database, kind: Option<EventKind>) -> String {
    // 2025-03-01 09:00 is Saturday morning
    let mut event = Event::new("Culto", Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
    event.church_id = Some(CHURCH.to_string());
    event.kind = kind;
    db.add_event(&event).unwrap();
    event.id
}

fn director() -> RequestContext {
    RequestContext::new("dir-1", Role::Director, Some(CHURCH.to_string()))
}

#[test]
fn roster_filters_inactive_blocked_and_non_musicians() {
    let db = Database::open_memory().unwrap();
    seed_musician(&db, "ativa", Role::Singer, 3, 0);

    let mut inactive = Musician::new("inativa", "inativa@example.com", Role::Singer);
    inactive.church_id = Some(CHURCH.to_string());
    inactive.active = false;
    db.add_musician(&inactive).unwrap();

    let mut blocked = Musician::new("bloqueada", "bloqueada@example.com", Role::Musician);
    blocked.church_id = Some(CHURCH.to_string());
    blocked.blocked = true;
    db.add_musician(&blocked).unwrap();

    let mut dir = Musician::new("diretora", "diretora@example.com", Role::Director);
    dir.church_id = Some(CHURCH.to_string());
    db.add_musician(&dir).unwrap();

    let mut other_church = Musician::new("visitante", "v@example.com", Role::Musician);
    other_church.church_id = Some("outra-igreja".to_string());
    db.add_musician(&other_church).unwrap();

    let roster = db.roster(CHURCH).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "ativa");
}

#[test]
fn penalty_and_participation_counters() {
    let db = Database::open_memory().unwrap();
    let id = seed_musician(&db, "ana", Role::Musician, 2, 0);

    db.add_penalty(&id, 3).unwrap();
    db.record_participation(&id).unwrap();

    let m = db.get_musician(&id).unwrap();
    assert_eq!(m.penalty_points, 3);
    assert_eq!(m.total_events(), 3);
    assert_eq!(escala_core::reliability(&m), 0);
}

#[test]
fn availability_survives_storage() {
    let db = Database::open_memory().unwrap();
    let id = seed_musician(&db, "beto", Role::Musician, 0, 0);

    let mut map = AvailabilityMap::default();
    map.set(Slot::QuartaNoite, false);
    db.set_availability(&id, &map).unwrap();

    let m = db.get_musician(&id).unwrap();
    assert!(!m.availability.is_available(Slot::QuartaNoite));
    assert!(m.availability.is_available(Slot::SabadoManha));
}

#[test]
fn corrupt_stored_availability_fails_open() {
    let db = Database::open_memory().unwrap();
    let id = seed_musician(&db, "carla", Role::Musician, 0, 0);

    db.conn()
        .execute(
            "UPDATE musicians SET availability = 'not valid json' WHERE id = ?1",
            [id.as_str()],
        )
        .unwrap();

    let m = db.get_musician(&id).unwrap();
    for slot in Slot::ALL {
        assert!(m.availability.is_available(slot));
    }
}

#[test]
fn event_roundtrip_keeps_kind_and_timestamp() {
    let db = Database::open_memory().unwrap();
    let id = seed_event(&db, Some(EventKind::CultoDivino));

    let event = db.get_event(&id).unwrap();
    assert_eq!(event.kind, Some(EventKind::CultoDivino));
    assert_eq!(event.starts_at, Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());

    let listed = db.list_events(CHURCH).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
}

#[test]
fn suggest_for_event_end_to_end() {
    let db = Database::open_memory().unwrap();
    seed_musician(&db, "confiavel", Role::Musician, 10, 2);
    seed_musician(&db, "nova", Role::Singer, 0, 0);
    let event_id = seed_event(&db, None);

    let result =
        suggest_for_event(&director(), &db, &SuggestionEngine::new(), &event_id).unwrap();
    assert_eq!(result.slot, Slot::SabadoManha);
    assert_eq!(result.total_musicians, 2);
    assert_eq!(result.suggestions[0].name, "confiavel");
}

#[test]
fn scale_for_event_end_to_end() {
    let db = Database::open_memory().unwrap();
    seed_musician(&db, "cantora", Role::Singer, 4, 0);
    seed_musician(&db, "tecladista", Role::Instrumentalist, 6, 1);
    let event_id = seed_event(&db, None);

    let plan = scale_for_event(&director(), &db, &SuggestionEngine::new(), &event_id).unwrap();
    assert_eq!(plan.singers.len(), 1);
    assert_eq!(plan.instrumentalists.len(), 1);
    assert_eq!(plan.total_available + plan.unavailable_count, plan.total_musicians);
}

#[test]
fn suggestion_requires_director_role() {
    let db = Database::open_memory().unwrap();
    let event_id = seed_event(&db, None);

    let ctx = RequestContext::new("m-1", Role::Musician, Some(CHURCH.to_string()));
    let err = suggest_for_event(&ctx, &db, &SuggestionEngine::new(), &event_id).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::NotAuthorized { .. })
    ));
}

#[test]
fn suggestion_requires_church_scope() {
    let db = Database::open_memory().unwrap();
    let event_id = seed_event(&db, None);

    let ctx = RequestContext::new("dir-2", Role::Director, None);
    let err = suggest_for_event(&ctx, &db, &SuggestionEngine::new(), &event_id).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::MissingChurchScope)
    ));
}

#[test]
fn event_outside_church_scope_is_not_found() {
    let db = Database::open_memory().unwrap();
    let event_id = seed_event(&db, None);

    let ctx = RequestContext::new("dir-3", Role::Director, Some("outra-igreja".to_string()));
    let err = suggest_for_event(&ctx, &db, &SuggestionEngine::new(), &event_id).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Database(DatabaseError::NotFound { entity: "event", .. })
    ));
}

#[test]
fn unknown_event_is_not_found() {
    let db = Database::open_memory().unwrap();
    let err =
        suggest_for_event(&director(), &db, &SuggestionEngine::new(), "nope").unwrap_err();
    assert!(matches!(
        err,
        CoreError::Database(DatabaseError::NotFound { entity: "event", .. })
    ));
}
