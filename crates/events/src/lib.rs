//! Shared event contracts for the markerview session.
//!
//! Defines the formal DTOs for events flowing from the gating/scanning core
//! to whatever frontend hosts it. Using shared types prevents runtime
//! deserialization errors from mismatched field names.
//!
//! Also provides the `EventBus` trait for decoupled event emission.

mod bus;

pub use bus::{EventBus, EventBusRef, NullEventBus, RecordingEventBus};

use markerview_capability::CapabilityResult;
use markerview_mode::{Mode, ScreenMode};
use markerview_permission::PermissionState;
use serde::{Deserialize, Serialize};

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Emitted once per session when the capability probe resolves.
///
/// Producers: session host
/// Consumers: frontend (loading indicator, toggle enablement)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityResolvedEvent {
    pub result: CapabilityResult,
    pub timestamp_ms: i64,
}

impl CapabilityResolvedEvent {
    pub fn now(result: CapabilityResult) -> Self {
        Self {
            result,
            timestamp_ms: now_ms(),
        }
    }
}

/// Emitted whenever the derived screen mode or the stored intent changes.
///
/// Producers: session host
/// Consumers: frontend (screen switching)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeChangedEvent {
    /// Derived display mode after the capability override.
    pub mode: ScreenMode,
    /// Stored user intent, preserved even while overridden.
    pub user_mode: Mode,
    /// Whether the QR fallback banner is active.
    pub fallback_active: bool,
    pub timestamp_ms: i64,
}

impl ModeChangedEvent {
    pub fn now(mode: ScreenMode, user_mode: Mode, fallback_active: bool) -> Self {
        Self {
            mode,
            user_mode,
            fallback_active,
            timestamp_ms: now_ms(),
        }
    }
}

/// Emitted when the QR screen's permission state settles or changes.
///
/// Producers: QR screen
/// Consumers: frontend (camera view vs. request/settings prompts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionChangedEvent {
    pub state: PermissionState,
    pub timestamp_ms: i64,
}

impl PermissionChangedEvent {
    pub fn now(state: PermissionState) -> Self {
        Self {
            state,
            timestamp_ms: now_ms(),
        }
    }
}

/// Emitted for each admitted (de-duplicated) scan.
///
/// Producers: QR screen
/// Consumers: frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEvent {
    /// The surfaced value (display form preferred).
    pub value: String,
    /// Whether it was handed to the external URL opener.
    pub is_url: bool,
    pub timestamp_ms: i64,
}

impl ScanEvent {
    pub fn now(value: impl Into<String>, is_url: bool) -> Self {
        Self {
            value: value.into(),
            is_url,
            timestamp_ms: now_ms(),
        }
    }
}

/// Anchor lifecycle reported by the AR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorEventKind {
    Found,
    Removed,
}

/// Emitted when the tracked marker is found or lost.
///
/// Producers: AR scene
/// Consumers: frontend (overlay visibility, playback controls)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorEvent {
    pub kind: AnchorEventKind,
    /// Registered tracking target name.
    pub target: String,
    pub timestamp_ms: i64,
}

impl AnchorEvent {
    pub fn now(kind: AnchorEventKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            timestamp_ms: now_ms(),
        }
    }
}

/// Everything the session core can emit, one variant per wire topic.
///
/// The topic string is derived from the variant, so a producer cannot pair
/// a payload with the wrong topic. Serialization happens at the bus
/// boundary, via [`Event::payload`], only for sinks that need JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Event {
    CapabilityResolved(CapabilityResolvedEvent),
    ModeChanged(ModeChangedEvent),
    PermissionChanged(PermissionChangedEvent),
    Scan(ScanEvent),
    Anchor(AnchorEvent),
}

impl Event {
    /// Wire topic for this event.
    pub fn topic(&self) -> &'static str {
        match self {
            Event::CapabilityResolved(_) => event_names::CAPABILITY_RESOLVED,
            Event::ModeChanged(_) => event_names::MODE_CHANGED,
            Event::PermissionChanged(_) => event_names::PERMISSION_CHANGED,
            Event::Scan(_) => event_names::SCAN_DETECTED,
            Event::Anchor(_) => event_names::AR_ANCHOR,
        }
    }

    /// JSON payload for frontends that speak `(topic, payload)` pairs.
    pub fn payload(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<CapabilityResolvedEvent> for Event {
    fn from(event: CapabilityResolvedEvent) -> Self {
        Event::CapabilityResolved(event)
    }
}

impl From<ModeChangedEvent> for Event {
    fn from(event: ModeChangedEvent) -> Self {
        Event::ModeChanged(event)
    }
}

impl From<PermissionChangedEvent> for Event {
    fn from(event: PermissionChangedEvent) -> Self {
        Event::PermissionChanged(event)
    }
}

impl From<ScanEvent> for Event {
    fn from(event: ScanEvent) -> Self {
        Event::Scan(event)
    }
}

impl From<AnchorEvent> for Event {
    fn from(event: AnchorEvent) -> Self {
        Event::Anchor(event)
    }
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Capability probe resolved.
    pub const CAPABILITY_RESOLVED: &str = "capability:resolved";
    /// Screen mode changed.
    pub const MODE_CHANGED: &str = "mode:changed";
    /// Camera permission state changed.
    pub const PERMISSION_CHANGED: &str = "permission:changed";
    /// Admitted scan.
    pub const SCAN_DETECTED: &str = "scan:detected";
    /// AR anchor found/removed.
    pub const AR_ANCHOR: &str = "ar:anchor";
}
