//! The check-then-request resolution protocol.

use serde::{Deserialize, Serialize};

use crate::api::{CameraPermissionApi, RawPermissionStatus};

/// Resolved camera permission state, as owned by the QR screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Resolution has not completed yet.
    #[default]
    Pending,
    Granted,
    /// Declined this time; the user may retry in-app.
    Denied,
    /// Declined permanently; only system settings can change it.
    Blocked,
}

impl PermissionState {
    /// Terminal states need no further prompting from this screen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PermissionState::Granted | PermissionState::Blocked)
    }
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PermissionState::Pending => "pending",
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
            PermissionState::Blocked => "blocked",
        };
        write!(f, "{s}")
    }
}

/// Run the two-step check/request protocol once.
///
/// Total: vendor failures and unexpected statuses collapse to `Denied`.
/// `request()` is only invoked when `check()` reports the permission as
/// still undecided.
pub async fn resolve(api: &dyn CameraPermissionApi) -> PermissionState {
    match api.check().await {
        Ok(RawPermissionStatus::Granted) => return PermissionState::Granted,
        Ok(RawPermissionStatus::Blocked) => return PermissionState::Blocked,
        Ok(status) => {
            tracing::debug!(?status, "camera permission undecided, prompting");
        }
        Err(e) => {
            tracing::warn!("camera permission check failed: {e}");
            return PermissionState::Denied;
        }
    }

    match api.request().await {
        Ok(RawPermissionStatus::Granted) => PermissionState::Granted,
        Ok(RawPermissionStatus::Blocked) => PermissionState::Blocked,
        Ok(status) => {
            tracing::debug!(?status, "camera permission not granted");
            PermissionState::Denied
        }
        Err(e) => {
            tracing::warn!("camera permission request failed: {e}");
            PermissionState::Denied
        }
    }
}
