use serde::{Deserialize, Serialize};

use crate::time::SECONDS_PER_MINUTE;

/// Rides a heap holds unless configured otherwise.
pub const DEFAULT_MAX_CAPACITY: usize = 20;

/// Passengers a single vehicle can carry.
pub const MAX_PASSENGERS: usize = 6;

/// Rides on the same route scheduled within this many minutes of each other
/// are merged into one vehicle.
pub const CONSOLIDATION_WINDOW_MINUTES: u32 = 10;

pub const CONSOLIDATION_WINDOW_SECS: u32 = CONSOLIDATION_WINDOW_MINUTES * SECONDS_PER_MINUTE;

/// Heap construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeapConfig {
    /// Maximum number of rides (the backing sequence holds one extra unused slot).
    pub max_capacity: usize,
    /// When false, every admitted ride takes its own slot.
    pub consolidate: bool,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
            consolidate: true,
        }
    }
}

impl HeapConfig {
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    pub fn with_consolidation(mut self, consolidate: bool) -> Self {
        self.consolidate = consolidate;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_capacity == 0 {
            return Err("max_capacity must be a positive integer".to_string());
        }
        Ok(())
    }
}
