//! The capability probe itself.

use std::sync::Arc;

use crate::provider::{ArAvailabilityApi, DeviceInfoProvider};
use crate::result::{CapabilityResult, Platform};

/// Minimum Android API level with ARCore support in scope.
pub const MIN_ANDROID_API_LEVEL: u32 = 26;

/// Parse the leading integer component of an OS version string.
///
/// Any parse failure is treated as version 0, which fails the threshold
/// check rather than erroring out.
pub fn parse_os_version(version: &str) -> u32 {
    version
        .trim()
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// One-shot device capability probe.
///
/// `probe()` is total: it resolves to `Supported` or `Unsupported`, never
/// `Unknown`, and never returns an error. It runs at most once per screen
/// lifetime; the caller gates retries on the previous result being terminal.
pub struct CapabilityProber {
    device: Arc<dyn DeviceInfoProvider>,
    availability: Arc<dyn ArAvailabilityApi>,
}

impl CapabilityProber {
    pub fn new(
        device: Arc<dyn DeviceInfoProvider>,
        availability: Arc<dyn ArAvailabilityApi>,
    ) -> Self {
        Self {
            device,
            availability,
        }
    }

    pub async fn probe(&self) -> CapabilityResult {
        let info = self.device.device_info();

        match info.platform {
            // Modern iOS revisions in scope all ship ARKit.
            Platform::Ios => CapabilityResult::Supported,
            Platform::Android => {
                let api_level = parse_os_version(&info.os_version);
                if api_level < MIN_ANDROID_API_LEVEL {
                    tracing::debug!(
                        api_level,
                        min = MIN_ANDROID_API_LEVEL,
                        "API level below ARCore threshold, skipping vendor query"
                    );
                    return CapabilityResult::Unsupported;
                }

                match self.availability.is_ar_supported_on_device().await {
                    Ok(availability) if availability.is_ar_supported => {
                        CapabilityResult::Supported
                    }
                    Ok(_) => CapabilityResult::Unsupported,
                    Err(e) => {
                        // Fail closed: a broken vendor query means no AR view.
                        tracing::warn!("AR availability query failed: {e}");
                        CapabilityResult::Unsupported
                    }
                }
            }
            Platform::Other => CapabilityResult::Unsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityError;
    use crate::provider::{ArAvailability, StaticDeviceInfo};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedAvailability(bool);

    #[async_trait::async_trait]
    impl ArAvailabilityApi for FixedAvailability {
        async fn is_ar_supported_on_device(&self) -> Result<ArAvailability, CapabilityError> {
            Ok(ArAvailability {
                is_ar_supported: self.0,
            })
        }
    }

    struct FailingAvailability;

    #[async_trait::async_trait]
    impl ArAvailabilityApi for FailingAvailability {
        async fn is_ar_supported_on_device(&self) -> Result<ArAvailability, CapabilityError> {
            Err(CapabilityError::Query("native module missing".into()))
        }
    }

    struct CountingAvailability {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ArAvailabilityApi for CountingAvailability {
        async fn is_ar_supported_on_device(&self) -> Result<ArAvailability, CapabilityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ArAvailability {
                is_ar_supported: true,
            })
        }
    }

    fn prober(
        platform: Platform,
        version: &str,
        api: Arc<dyn ArAvailabilityApi>,
    ) -> CapabilityProber {
        CapabilityProber::new(Arc::new(StaticDeviceInfo::new(platform, version)), api)
    }

    #[test]
    fn test_parse_os_version() {
        assert_eq!(parse_os_version("33"), 33);
        assert_eq!(parse_os_version("17.2"), 17);
        assert_eq!(parse_os_version(" 29 "), 29);
        assert_eq!(parse_os_version("tiramisu"), 0);
        assert_eq!(parse_os_version(""), 0);
    }

    #[tokio::test]
    async fn test_ios_supported_unconditionally() {
        let p = prober(Platform::Ios, "12.0", Arc::new(FixedAvailability(false)));
        assert_eq!(p.probe().await, CapabilityResult::Supported);
    }

    #[tokio::test]
    async fn test_android_below_threshold_skips_vendor_query() {
        let api = Arc::new(CountingAvailability {
            calls: AtomicUsize::new(0),
        });
        let p = CapabilityProber::new(
            Arc::new(StaticDeviceInfo::new(Platform::Android, "25")),
            api.clone(),
        );
        assert_eq!(p.probe().await, CapabilityResult::Unsupported);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_android_vendor_reports_supported() {
        let p = prober(Platform::Android, "33", Arc::new(FixedAvailability(true)));
        assert_eq!(p.probe().await, CapabilityResult::Supported);
    }

    #[tokio::test]
    async fn test_android_vendor_reports_unsupported() {
        let p = prober(Platform::Android, "33", Arc::new(FixedAvailability(false)));
        assert_eq!(p.probe().await, CapabilityResult::Unsupported);
    }

    #[tokio::test]
    async fn test_android_vendor_failure_fails_closed() {
        let p = prober(Platform::Android, "33", Arc::new(FailingAvailability));
        assert_eq!(p.probe().await, CapabilityResult::Unsupported);
    }

    #[tokio::test]
    async fn test_android_garbage_version_treated_as_zero() {
        let p = prober(
            Platform::Android,
            "not-a-version",
            Arc::new(FixedAvailability(true)),
        );
        assert_eq!(p.probe().await, CapabilityResult::Unsupported);
    }

    #[tokio::test]
    async fn test_other_platform_unsupported() {
        let p = prober(Platform::Other, "99", Arc::new(FixedAvailability(true)));
        assert_eq!(p.probe().await, CapabilityResult::Unsupported);
    }
}
