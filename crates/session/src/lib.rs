//! Screen host for markerview.
//!
//! Composes the capability prober, the mode selector, the permission
//! resolver and the scan pipeline into the screen-switching behavior of the
//! app:
//!
//! ```text
//! CapabilityProber ──┐
//!                    ├──> ModeState ──> Screen (Loading | Ar | Qr)
//! user toggle ───────┘
//!
//! QR screen: PermissionResolver + BarcodeFeed ──> QrScanPipeline
//! AR screen: TrackingTarget registration + anchor-driven overlay
//! ```
//!
//! All vendor work (AR engine, camera, dialogs) stays behind the trait
//! seams of the leaf crates; every asynchronous result is applied only if
//! the owning screen is still mounted, guarded by cancellation tokens.

mod overlay;
mod qr_screen;
mod screen;
mod session;
mod target;

pub use overlay::ArOverlay;
pub use qr_screen::QrScreen;
pub use screen::Screen;
pub use session::AppSession;
pub use target::{
    RegistrationError, TargetOrientation, TargetRegistrar, TargetRegistry, TrackingTarget,
};
