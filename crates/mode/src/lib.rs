//! Experience mode selection for markerview.
//!
//! Pure domain logic - no I/O, no platform dependencies. Maps the resolved
//! device capability plus the user's toggle intent onto the screen mode that
//! is actually shown. The displayed mode is always derived, never stored,
//! so capability and user intent cannot diverge.

mod mode;
mod state;

pub use mode::{effective_mode, Mode, ScreenMode};
pub use state::ModeState;
