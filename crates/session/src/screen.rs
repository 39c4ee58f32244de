//! Screen view-model handed to the rendering layer.

use markerview_permission::PermissionState;
use serde::Serialize;

/// What the host should currently render. Rendering itself is external;
/// this is only the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    /// Capability probe still pending (AR path's spinner).
    Loading,
    /// Marker-tracking AR view.
    Ar,
    /// Camera QR scanner, possibly with the fallback banner.
    Qr {
        permission: PermissionState,
        fallback_banner: bool,
    },
}
