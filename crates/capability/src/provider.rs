//! Provider traits for the platform and vendor AR seams.
//!
//! These traits abstract the native SDK surface, allowing the gating logic
//! to remain pure and testable.

use serde::{Deserialize, Serialize};

use crate::error::CapabilityError;
use crate::result::Platform;

/// Static facts about the device the app is running on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Platform family.
    pub platform: Platform,
    /// OS version string as reported by the platform (e.g. "33", "17.2").
    pub os_version: String,
}

/// Provider for device platform/version facts.
pub trait DeviceInfoProvider: Send + Sync {
    fn device_info(&self) -> DeviceInfo;
}

/// Vendor response for the per-device AR support query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArAvailability {
    pub is_ar_supported: bool,
}

/// Vendor seam for the asynchronous "is AR supported on this device" check.
///
/// The vendor call may reject; the prober treats any error as "unsupported".
#[async_trait::async_trait]
pub trait ArAvailabilityApi: Send + Sync {
    async fn is_ar_supported_on_device(&self) -> Result<ArAvailability, CapabilityError>;
}

/// Fixed device facts, for tests and the headless harness.
#[derive(Debug, Clone)]
pub struct StaticDeviceInfo {
    info: DeviceInfo,
}

impl StaticDeviceInfo {
    pub fn new(platform: Platform, os_version: impl Into<String>) -> Self {
        Self {
            info: DeviceInfo {
                platform,
                os_version: os_version.into(),
            },
        }
    }
}

impl DeviceInfoProvider for StaticDeviceInfo {
    fn device_info(&self) -> DeviceInfo {
        self.info.clone()
    }
}

/// Null implementation that always reports no AR support.
pub struct NullArAvailabilityApi;

#[async_trait::async_trait]
impl ArAvailabilityApi for NullArAvailabilityApi {
    async fn is_ar_supported_on_device(&self) -> Result<ArAvailability, CapabilityError> {
        Ok(ArAvailability {
            is_ar_supported: false,
        })
    }
}
