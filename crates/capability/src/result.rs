//! Capability result and platform types.

use serde::{Deserialize, Serialize};

/// Platform family the app is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Modern revisions in scope all ship the native AR framework.
    Ios,
    /// AR support depends on the API level and a per-device vendor check.
    Android,
    /// Anything else never gets the AR view.
    Other,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
            Platform::Other => "Other",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of the device capability check.
///
/// Starts at `Unknown` and transitions to a terminal value exactly once per
/// session when the probe resolves. Re-queried only on an explicit retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityResult {
    /// Probe has not resolved yet.
    #[default]
    Unknown,
    /// The device can run the AR experience.
    Supported,
    /// The device cannot run the AR experience; QR fallback only.
    Unsupported,
}

impl CapabilityResult {
    /// True once the probe has reached a terminal value.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, CapabilityResult::Unknown)
    }
}
