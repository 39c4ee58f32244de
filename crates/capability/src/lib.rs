//! Device capability probing for the AR experience.
//!
//! Decides whether the current device can run the marker-tracking AR view.
//! The decision combines a platform/OS-version gate with a vendor
//! "is AR supported" query, both abstracted behind traits so the gating
//! logic stays testable without any native SDK present.
//!
//! The probe is total: every failure mode (vendor API error, malformed
//! version string, unknown platform) collapses to `Unsupported`. Callers
//! never see an error, they see the fallback experience.

mod error;
mod prober;
mod provider;
mod result;

pub use error::CapabilityError;
pub use prober::{parse_os_version, CapabilityProber, MIN_ANDROID_API_LEVEL};
pub use provider::{
    ArAvailability, ArAvailabilityApi, DeviceInfo, DeviceInfoProvider, NullArAvailabilityApi,
    StaticDeviceInfo,
};
pub use result::{CapabilityResult, Platform};
