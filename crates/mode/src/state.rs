//! Mode state with capability override support.

use markerview_capability::CapabilityResult;
use serde::{Deserialize, Serialize};

use crate::mode::{effective_mode, Mode, ScreenMode};

/// User intent plus resolved capability, with a sticky fallback switch.
///
/// When the capability first resolves to unsupported, the user's stored mode
/// is force-set to QR exactly once, so a later capability re-check does not
/// silently snap the screen back to AR.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModeState {
    capability: CapabilityResult,
    user_mode: Mode,
    auto_switched: bool,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capability(&self) -> CapabilityResult {
        self.capability
    }

    pub fn user_mode(&self) -> Mode {
        self.user_mode
    }

    /// Derived display mode; never stored independently.
    pub fn screen_mode(&self) -> ScreenMode {
        effective_mode(self.capability, self.user_mode)
    }

    /// Whether the AR toggle is interactive.
    pub fn ar_toggle_enabled(&self) -> bool {
        self.capability != CapabilityResult::Unsupported
    }

    /// Whether the QR screen shows the "AR unavailable" fallback banner.
    pub fn fallback_active(&self) -> bool {
        self.capability == CapabilityResult::Unsupported
    }

    /// Record a resolved capability probe.
    ///
    /// Returns true if the stored state changed.
    pub fn apply_capability(&mut self, result: CapabilityResult) -> bool {
        let changed = self.capability != result;
        self.capability = result;

        if result == CapabilityResult::Unsupported && !self.auto_switched {
            // One-directional auto-switch, applied at the moment
            // unsupported is first observed.
            self.auto_switched = true;
            if self.user_mode != Mode::Qr {
                tracing::info!("AR unsupported, switching default mode to QR");
                self.user_mode = Mode::Qr;
                return true;
            }
        }

        changed
    }

    /// Apply a user toggle. Ignored while AR is unsupported.
    ///
    /// Returns true if the stored intent changed.
    pub fn select(&mut self, mode: Mode) -> bool {
        if mode == Mode::Ar && !self.ar_toggle_enabled() {
            tracing::debug!("ignoring AR toggle while unsupported");
            return false;
        }
        if self.user_mode == mode {
            return false;
        }
        self.user_mode = mode;
        true
    }
}
