//! De-duplicator plus router, glued together for the QR screen.

use crate::barcode::Barcode;
use crate::dedup::ScanDeduper;
use crate::route::{ScanOutcome, ScanRouter};

/// Consumer-side scan pipeline: empty records are discarded, repeats are
/// suppressed by the cooldown, admitted values are routed.
pub struct QrScanPipeline {
    dedup: ScanDeduper,
    router: ScanRouter,
}

impl QrScanPipeline {
    pub fn new(router: ScanRouter) -> Self {
        Self {
            dedup: ScanDeduper::new(),
            router,
        }
    }

    pub fn with_deduper(router: ScanRouter, dedup: ScanDeduper) -> Self {
        Self { dedup, router }
    }

    /// Handle one decoded record. Returns what it turned into, if anything.
    pub fn handle(&mut self, barcode: &Barcode) -> Option<(String, ScanOutcome)> {
        let value = barcode.value()?;
        if !self.dedup.admit(value) {
            tracing::debug!(value, "suppressed repeat scan");
            return None;
        }
        let outcome = self.router.route(value);
        Some((value.to_string(), outcome))
    }

    /// Clear suppression state (screen teardown).
    pub fn reset(&mut self) {
        self.dedup.reset();
    }
}
