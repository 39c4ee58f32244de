//! AR tracking target registration.
//!
//! The engine needs exactly one named image target registered before first
//! use. Registration is global, side-effecting vendor setup, so it runs at
//! most once per registry lifetime and its failures are swallowed at the
//! boundary: a missing target degrades the overlay, it must not take down
//! the app.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Physical orientation of the printed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetOrientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

/// A named image target for the AR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingTarget {
    /// Name the engine reports back in anchor events.
    pub name: String,
    /// Bundled marker image.
    pub image_path: String,
    pub orientation: TargetOrientation,
    /// Printed width of the marker in meters.
    pub physical_width_m: f32,
}

impl TrackingTarget {
    /// The poster marker the app ships with.
    pub fn poster() -> Self {
        Self {
            name: "poster".into(),
            image_path: "assets/marker.jpg".into(),
            orientation: TargetOrientation::Up,
            physical_width_m: 0.15,
        }
    }
}

/// Vendor registration failure.
#[derive(Debug, thiserror::Error)]
#[error("target registration failed: {0}")]
pub struct RegistrationError(pub String);

/// Vendor seam for registering tracking targets with the AR engine.
pub trait TargetRegistrar: Send + Sync {
    fn register(&self, target: &TrackingTarget) -> Result<(), RegistrationError>;
}

/// Idempotent, once-per-process target registration.
///
/// Keep one registry per process; repeated `register_once` calls after the
/// first (successful or not) are no-ops.
pub struct TargetRegistry {
    registrar: Arc<dyn TargetRegistrar>,
    registered: AtomicBool,
}

impl TargetRegistry {
    pub fn new(registrar: Arc<dyn TargetRegistrar>) -> Self {
        Self {
            registrar,
            registered: AtomicBool::new(false),
        }
    }

    /// Register the target unless registration already ran.
    pub fn register_once(&self, target: &TrackingTarget) {
        if self.registered.swap(true, Ordering::SeqCst) {
            return;
        }
        match self.registrar.register(target) {
            Ok(()) => {
                tracing::info!(target = %target.name, "tracking target registered");
            }
            Err(e) => {
                // Non-fatal: the AR view simply never finds an anchor.
                tracing::warn!("{e}");
            }
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }
}
