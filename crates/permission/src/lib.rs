//! Camera permission resolution for the QR scanner.
//!
//! Wraps the platform permission dialog behind a trait and collapses its
//! statuses into a small state machine:
//!
//! ```text
//! Pending --check--> Granted            (terminal)
//!         --check--> Blocked            (terminal, user must visit settings)
//!         --check--> undecided --request--> Granted | Blocked | Denied
//! ```
//!
//! `Denied` is retryable: the user can re-invoke the same two-step protocol.
//! `Blocked` requires leaving the app for system settings; resolution happens
//! only when the resolver is invoked again, never automatically.
//!
//! Every vendor failure collapses to `Denied` (fail closed). Nothing here
//! caches state across screen mounts.

mod api;
mod resolver;

pub use api::{CameraPermissionApi, NullPermissionApi, PermissionError, RawPermissionStatus};
pub use resolver::{resolve, PermissionState};
