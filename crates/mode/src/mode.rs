//! Mode definitions and resolution logic.

use markerview_capability::CapabilityResult;
use serde::{Deserialize, Serialize};

/// The user's selectable experience mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Marker-tracked video overlay. The default experience.
    #[default]
    Ar,
    /// Camera QR scanning, also the fallback when AR is unsupported.
    Qr,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Ar => "AR",
            Mode::Qr => "QR",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The screen mode actually displayed, after applying the capability override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenMode {
    /// Capability probe still in flight; only the AR path shows this.
    Loading,
    Ar,
    Qr,
}

/// Resolve the displayed mode from capability and user intent.
///
/// Priority:
/// 1. Capability unknown - Loading, but only on the AR path; the QR screen
///    has no dependency on capability resolution
/// 2. Capability unsupported - QR, regardless of user intent
/// 3. Otherwise - the user's last explicit choice
///
/// This is pure business logic - no I/O.
pub fn effective_mode(capability: CapabilityResult, user_mode: Mode) -> ScreenMode {
    match (capability, user_mode) {
        (CapabilityResult::Unknown, Mode::Ar) => ScreenMode::Loading,
        (CapabilityResult::Unsupported, _) | (_, Mode::Qr) => ScreenMode::Qr,
        (_, Mode::Ar) => ScreenMode::Ar,
    }
}
