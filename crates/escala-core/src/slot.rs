//! Recurring weekly slots and period classification.
//!
//! Every event maps to exactly one of six recurring slots. Classification
//! is a total function: an event-kind tag takes priority when it names a
//! fixed service, otherwise the slot is inferred from weekday and hour.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::roster::EventKind;

/// One of the six recurring weekly time periods.
///
/// Slot identifiers double as the keys of the per-musician availability
/// map, so the serde names are stable wire values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Saturday morning (Sabbath school, divine service)
    SabadoManha,
    /// Saturday afternoon
    SabadoTarde,
    /// Saturday evening
    SabadoNoite,
    /// Wednesday afternoon
    QuartaTarde,
    /// Wednesday evening (midweek service)
    QuartaNoite,
    /// Anything outside the fixed weekly services
    Outros,
}

impl Slot {
    /// All slots, in availability-form display order.
    pub const ALL: [Slot; 6] = [
        Slot::SabadoManha,
        Slot::SabadoTarde,
        Slot::SabadoNoite,
        Slot::QuartaTarde,
        Slot::QuartaNoite,
        Slot::Outros,
    ];

    /// Stable identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::SabadoManha => "sabado_manha",
            Slot::SabadoTarde => "sabado_tarde",
            Slot::SabadoNoite => "sabado_noite",
            Slot::QuartaTarde => "quarta_tarde",
            Slot::QuartaNoite => "quarta_noite",
            Slot::Outros => "outros",
        }
    }

    /// Classify an event into its recurring slot.
    ///
    /// A recognized event kind overrides date/time inference; otherwise
    /// the weekday and hour of `when` decide. Total: every timestamp maps
    /// to exactly one slot.
    pub fn classify(when: DateTime<Utc>, kind: Option<EventKind>) -> Slot {
        if let Some(slot) = kind.and_then(EventKind::slot_override) {
            return slot;
        }

        match when.weekday() {
            Weekday::Sat => match when.hour() {
                8..=11 => Slot::SabadoManha,
                12..=17 => Slot::SabadoTarde,
                _ => Slot::SabadoNoite,
            },
            Weekday::Wed => {
                if when.hour() >= 18 {
                    Slot::QuartaNoite
                } else {
                    Slot::QuartaTarde
                }
            }
            _ => Slot::Outros,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sabado_manha" => Ok(Slot::SabadoManha),
            "sabado_tarde" => Ok(Slot::SabadoTarde),
            "sabado_noite" => Ok(Slot::SabadoNoite),
            "quarta_tarde" => Ok(Slot::QuartaTarde),
            "quarta_noite" => Ok(Slot::QuartaNoite),
            "outros" => Ok(Slot::Outros),
            _ => Err(ValidationError::UnknownValue {
                field: "slot",
                value: s.to_string(),
            }),
        }
    }
}

/// Human-readable Portuguese weekday name for presentation.
pub fn day_name(when: DateTime<Utc>) -> &'static str {
    match when.weekday() {
        Weekday::Sun => "Domingo",
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn saturday_hour_bands() {
        // 2025-03-01 is a Saturday
        assert_eq!(Slot::classify(at(2025, 3, 1, 8, 0), None), Slot::SabadoManha);
        assert_eq!(Slot::classify(at(2025, 3, 1, 11, 59), None), Slot::SabadoManha);
        assert_eq!(Slot::classify(at(2025, 3, 1, 12, 0), None), Slot::SabadoTarde);
        assert_eq!(Slot::classify(at(2025, 3, 1, 17, 59), None), Slot::SabadoTarde);
        assert_eq!(Slot::classify(at(2025, 3, 1, 18, 0), None), Slot::SabadoNoite);
        assert_eq!(Slot::classify(at(2025, 3, 1, 7, 59), None), Slot::SabadoNoite);
    }

    #[test]
    fn wednesday_splits_at_18() {
        // 2025-03-05 is a Wednesday
        assert_eq!(Slot::classify(at(2025, 3, 5, 17, 59), None), Slot::QuartaTarde);
        assert_eq!(Slot::classify(at(2025, 3, 5, 18, 0), None), Slot::QuartaNoite);
        assert_eq!(Slot::classify(at(2025, 3, 5, 6, 0), None), Slot::QuartaTarde);
    }

    #[test]
    fn other_weekdays_are_outros() {
        // Monday through Friday (minus Wednesday) and Sunday
        assert_eq!(Slot::classify(at(2025, 3, 2, 10, 0), None), Slot::Outros);
        assert_eq!(Slot::classify(at(2025, 3, 3, 19, 0), None), Slot::Outros);
        assert_eq!(Slot::classify(at(2025, 3, 4, 9, 0), None), Slot::Outros);
        assert_eq!(Slot::classify(at(2025, 3, 6, 20, 0), None), Slot::Outros);
        assert_eq!(Slot::classify(at(2025, 3, 7, 18, 0), None), Slot::Outros);
    }

    #[test]
    fn event_kind_overrides_inference() {
        // Tuesday tagged as divine service still lands on Saturday morning
        let tuesday = at(2025, 3, 4, 15, 0);
        assert_eq!(
            Slot::classify(tuesday, Some(EventKind::CultoDivino)),
            Slot::SabadoManha
        );
        assert_eq!(
            Slot::classify(tuesday, Some(EventKind::EscolaSabatina)),
            Slot::SabadoManha
        );
        assert_eq!(
            Slot::classify(tuesday, Some(EventKind::CultoJovem)),
            Slot::SabadoTarde
        );
        assert_eq!(
            Slot::classify(tuesday, Some(EventKind::CultoQuarta)),
            Slot::QuartaNoite
        );
        // Kinds without a fixed service fall back to inference
        assert_eq!(
            Slot::classify(tuesday, Some(EventKind::Ensaio)),
            Slot::Outros
        );
    }

    #[test]
    fn slot_parse_roundtrip() {
        for slot in Slot::ALL {
            assert_eq!(slot.as_str().parse::<Slot>().unwrap(), slot);
        }
        assert!("sabado".parse::<Slot>().is_err());
    }

    #[test]
    fn day_names_are_portuguese() {
        assert_eq!(day_name(at(2025, 3, 1, 9, 0)), "Sábado");
        assert_eq!(day_name(at(2025, 3, 5, 9, 0)), "Quarta-feira");
        assert_eq!(day_name(at(2025, 3, 2, 9, 0)), "Domingo");
    }

    proptest! {
        #[test]
        fn classification_is_total_and_consistent(secs in 0i64..4_102_444_800i64) {
            let when = Utc.timestamp_opt(secs, 0).unwrap();
            let slot = Slot::classify(when, None);
            match when.weekday() {
                Weekday::Sat => prop_assert!(matches!(
                    slot,
                    Slot::SabadoManha | Slot::SabadoTarde | Slot::SabadoNoite
                )),
                Weekday::Wed => prop_assert!(matches!(
                    slot,
                    Slot::QuartaTarde | Slot::QuartaNoite
                )),
                _ => prop_assert_eq!(slot, Slot::Outros),
            }
        }
    }
}
