//! Per-musician weekly availability.
//!
//! The availability map is the one place where loosely-typed stored data
//! crosses into the typed domain. Decoding is fail-open: missing text,
//! malformed JSON, unknown keys, or non-boolean values never exclude a
//! musician. Only an explicit stored `false` for a slot does.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::slot::Slot;

/// Map of slot → available flag. Absent slots are available.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AvailabilityMap {
    flags: HashMap<Slot, bool>,
}

impl AvailabilityMap {
    /// Decode from stored JSON text.
    ///
    /// Fail-open: `None`, unparseable input, or a non-object value yield
    /// an empty map; entries with unknown keys or non-boolean values are
    /// skipped.
    pub fn from_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) else {
            return Self::default();
        };
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let mut flags = HashMap::new();
        for (key, value) in object {
            if let (Ok(slot), Some(flag)) = (key.parse::<Slot>(), value.as_bool()) {
                flags.insert(slot, flag);
            }
        }
        Self { flags }
    }

    /// Encode to JSON text for storage, with deterministic key order.
    pub fn to_json(&self) -> String {
        let ordered: BTreeMap<&'static str, bool> = self
            .flags
            .iter()
            .map(|(slot, flag)| (slot.as_str(), *flag))
            .collect();
        // A map of str → bool cannot fail to serialize
        serde_json::to_string(&ordered).unwrap_or_else(|_| "{}".to_string())
    }

    /// Whether the musician is available for `slot`.
    ///
    /// False only on an explicit stored `false`.
    pub fn is_available(&self, slot: Slot) -> bool {
        !matches!(self.flags.get(&slot), Some(false))
    }

    /// Record availability for a slot.
    pub fn set(&mut self, slot: Slot, available: bool) {
        self.flags.insert(slot, available);
    }

    /// True when no slot has an explicit flag.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_map_is_fully_available() {
        let map = AvailabilityMap::from_json(None);
        for slot in Slot::ALL {
            assert!(map.is_available(slot));
        }
    }

    #[test]
    fn malformed_json_is_fully_available() {
        for raw in ["not json", "{\"sabado_manha\": fal", "[true]", "42", "null"] {
            let map = AvailabilityMap::from_json(Some(raw));
            assert!(map.is_empty(), "expected fail-open for {raw:?}");
            for slot in Slot::ALL {
                assert!(map.is_available(slot));
            }
        }
    }

    #[test]
    fn explicit_false_excludes_only_that_slot() {
        let map = AvailabilityMap::from_json(Some(r#"{"sabado_manha": false}"#));
        assert!(!map.is_available(Slot::SabadoManha));
        for slot in Slot::ALL.into_iter().filter(|s| *s != Slot::SabadoManha) {
            assert!(map.is_available(slot));
        }
    }

    #[test]
    fn unknown_keys_and_non_bools_are_skipped() {
        let raw = r#"{"domingo_manha": false, "sabado_noite": "nope", "quarta_noite": false}"#;
        let map = AvailabilityMap::from_json(Some(raw));
        assert!(map.is_available(Slot::SabadoNoite));
        assert!(!map.is_available(Slot::QuartaNoite));
    }

    #[test]
    fn json_roundtrip_preserves_flags() {
        let mut map = AvailabilityMap::default();
        map.set(Slot::SabadoTarde, false);
        map.set(Slot::QuartaNoite, true);
        let decoded = AvailabilityMap::from_json(Some(&map.to_json()));
        assert_eq!(decoded, map);
    }

    #[test]
    fn explicit_true_stays_available() {
        let map = AvailabilityMap::from_json(Some(r#"{"outros": true}"#));
        assert!(map.is_available(Slot::Outros));
    }
}
