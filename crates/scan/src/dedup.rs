//! Repeat-scan suppression.

use std::time::{Duration, Instant};

/// Cooldown during which a repeated identical scan is suppressed.
pub const DEFAULT_SCAN_COOLDOWN: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
struct ScanRecord {
    value: String,
    admitted_at: Instant,
}

/// Suppresses repeat notifications for the same decoded value.
///
/// The window is anchored at admission time: suppressed repeats do not
/// extend it, so the same value scanned again after the cooldown
/// re-triggers. A different value interrupts suppression immediately and
/// starts its own window. Single-consumer, single-writer only.
#[derive(Debug)]
pub struct ScanDeduper {
    last: Option<ScanRecord>,
    cooldown: Duration,
}

impl Default for ScanDeduper {
    fn default() -> Self {
        Self::with_cooldown(DEFAULT_SCAN_COOLDOWN)
    }
}

impl ScanDeduper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            last: None,
            cooldown,
        }
    }

    /// Decide whether `value` should be surfaced now.
    pub fn admit(&mut self, value: &str) -> bool {
        self.admit_at(value, Instant::now())
    }

    /// Deterministic variant used by tests.
    pub fn admit_at(&mut self, value: &str, now: Instant) -> bool {
        if let Some(record) = &self.last {
            if record.value == value && now.duration_since(record.admitted_at) < self.cooldown {
                return false;
            }
        }
        self.last = Some(ScanRecord {
            value: value.to_string(),
            admitted_at: now,
        });
        true
    }

    /// Forget the last admitted value (screen teardown).
    pub fn reset(&mut self) {
        self.last = None;
    }
}
