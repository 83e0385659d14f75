use crate::puzzle::TILES;
use std::collections::HashMap;

/// Default entry ceiling, a memory cap rather than a tuning knob.
pub const DEFAULT_CAPACITY: usize = 1_000_000;

/// Capacity-capped map from raw tile bytes to the best remaining-depth budget
/// recorded for that state.
pub struct TranspositionTable {
    entries: HashMap<[u8; TILES], i32>,
    capacity: usize,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    /// The budget recorded for `key`, if any. Lookups keep working for every
    /// entry inserted before the ceiling was hit.
    pub fn probe(&self, key: &[u8; TILES]) -> Option<i32> {
        self.entries.get(key).copied()
    }

    /// Records `budget` for `key`. Existing entries are always updated; new
    /// entries above the capacity ceiling are silently dropped.
    pub fn store(&mut self, key: [u8; TILES], budget: i32) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            return;
        }
        self.entries.insert(key, budget);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
