//! Vendor seam for the platform permission dialog.

use serde::{Deserialize, Serialize};

/// Raw status reported by the platform permission API.
///
/// `Denied` here means "not yet decided or declined this time"; the platform
/// lumps several outcomes into it, which is why the resolver treats anything
/// outside `Granted`/`Blocked` the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawPermissionStatus {
    Granted,
    Blocked,
    Denied,
    /// The permission does not exist on this platform build.
    Unavailable,
}

/// Failure from the platform permission API.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error("permission check failed: {0}")]
    Check(String),
    #[error("permission request failed: {0}")]
    Request(String),
}

/// Platform camera permission dialog, abstracted for testability.
#[async_trait::async_trait]
pub trait CameraPermissionApi: Send + Sync {
    /// Query the current status without prompting the user.
    async fn check(&self) -> Result<RawPermissionStatus, PermissionError>;

    /// Show the system permission prompt.
    async fn request(&self) -> Result<RawPermissionStatus, PermissionError>;

    /// Jump to the system settings page for this app. Fire-and-forget.
    fn open_settings(&self);
}

/// Null implementation for platforms without a camera permission.
pub struct NullPermissionApi;

#[async_trait::async_trait]
impl CameraPermissionApi for NullPermissionApi {
    async fn check(&self) -> Result<RawPermissionStatus, PermissionError> {
        Ok(RawPermissionStatus::Unavailable)
    }

    async fn request(&self) -> Result<RawPermissionStatus, PermissionError> {
        Ok(RawPermissionStatus::Unavailable)
    }

    fn open_settings(&self) {}
}
