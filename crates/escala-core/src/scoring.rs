//! Reliability scoring for suggestion ranking.
//!
//! The score is lifetime participation minus penalty points, both
//! defaulting to zero. It is deliberately unnormalized: a brand-new
//! musician (0 events, 0 penalties) ranks above a long-tenured one whose
//! penalties outnumber their events. This matches the observed production
//! behavior and is kept as-is.

use std::cmp::Reverse;

use crate::roster::Musician;

/// Reliability score: total events minus penalty points. Higher is better.
pub fn reliability(musician: &Musician) -> i64 {
    i64::from(musician.total_events()) - i64::from(musician.penalty_points)
}

/// Sort a roster descending by reliability.
///
/// The sort is stable: musicians with equal scores keep their input order.
pub fn rank_by_reliability(roster: &mut [Musician]) {
    roster.sort_by_key(|m| Reverse(reliability(m)));
}
