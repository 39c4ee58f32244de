//! End-to-end tests for the gating flow: capability probing, mode
//! selection, permission resolution and scan handling, all against fake
//! vendor seams and a recording event bus.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use markerview_capability::{
    ArAvailability, ArAvailabilityApi, CapabilityError, CapabilityProber, CapabilityResult,
    Platform, StaticDeviceInfo,
};
use markerview_events::{event_names, Event, RecordingEventBus};
use markerview_mode::Mode;
use markerview_permission::{
    CameraPermissionApi, PermissionError, PermissionState, RawPermissionStatus,
};
use markerview_scan::{Barcode, BarcodeFeed, OpenError, ScanRouter, UrlOpener};
use markerview_session::{AppSession, QrScreen, Screen};

// =============================================================================
// Fakes
// =============================================================================

struct FixedAvailability(bool);

#[async_trait::async_trait]
impl ArAvailabilityApi for FixedAvailability {
    async fn is_ar_supported_on_device(&self) -> Result<ArAvailability, CapabilityError> {
        Ok(ArAvailability {
            is_ar_supported: self.0,
        })
    }
}

/// Availability query that never resolves, for teardown tests.
struct HangingAvailability;

#[async_trait::async_trait]
impl ArAvailabilityApi for HangingAvailability {
    async fn is_ar_supported_on_device(&self) -> Result<ArAvailability, CapabilityError> {
        std::future::pending().await
    }
}

/// Permission API that replays a script of check/request outcomes.
#[derive(Default)]
struct ScriptedPermissionApi {
    checks: Mutex<VecDeque<RawPermissionStatus>>,
    requests: Mutex<VecDeque<RawPermissionStatus>>,
    settings_opened: Mutex<usize>,
}

impl ScriptedPermissionApi {
    fn next(queue: &Mutex<VecDeque<RawPermissionStatus>>) -> RawPermissionStatus {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(RawPermissionStatus::Denied)
    }
}

#[async_trait::async_trait]
impl CameraPermissionApi for ScriptedPermissionApi {
    async fn check(&self) -> Result<RawPermissionStatus, PermissionError> {
        Ok(Self::next(&self.checks))
    }

    async fn request(&self) -> Result<RawPermissionStatus, PermissionError> {
        Ok(Self::next(&self.requests))
    }

    fn open_settings(&self) {
        *self.settings_opened.lock().unwrap() += 1;
    }
}

/// Permission API whose check hangs until the test lets it go.
struct HangingPermissionApi;

#[async_trait::async_trait]
impl CameraPermissionApi for HangingPermissionApi {
    async fn check(&self) -> Result<RawPermissionStatus, PermissionError> {
        std::future::pending().await
    }

    async fn request(&self) -> Result<RawPermissionStatus, PermissionError> {
        Ok(RawPermissionStatus::Granted)
    }

    fn open_settings(&self) {}
}

#[derive(Default)]
struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl UrlOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> Result<(), OpenError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingAlerts {
    messages: Mutex<Vec<String>>,
}

impl markerview_scan::AlertPresenter for RecordingAlerts {
    fn alert(&self, _title: &str, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

struct Harness {
    session: Arc<AppSession>,
    bus: Arc<RecordingEventBus>,
    opener: Arc<RecordingOpener>,
    alerts: Arc<RecordingAlerts>,
}

fn harness(
    platform: Platform,
    os_version: &str,
    availability: Arc<dyn ArAvailabilityApi>,
    permissions: Arc<dyn CameraPermissionApi>,
) -> Harness {
    let bus = Arc::new(RecordingEventBus::new());
    let opener = Arc::new(RecordingOpener::default());
    let alerts = Arc::new(RecordingAlerts::default());

    let prober = CapabilityProber::new(
        Arc::new(StaticDeviceInfo::new(platform, os_version)),
        availability,
    );
    let router = ScanRouter::new(opener.clone(), alerts.clone());
    let qr = Arc::new(QrScreen::new(permissions, router, bus.clone()));
    let session = Arc::new(AppSession::new(prober, qr, bus.clone()));

    Harness {
        session,
        bus,
        opener,
        alerts,
    }
}

fn granted_api() -> Arc<ScriptedPermissionApi> {
    let api = ScriptedPermissionApi::default();
    api.checks
        .lock()
        .unwrap()
        .push_back(RawPermissionStatus::Granted);
    Arc::new(api)
}

// =============================================================================
// Capability gating
// =============================================================================

mod capability {
    use super::*;

    #[tokio::test]
    async fn supported_device_lands_on_ar() {
        let h = harness(
            Platform::Ios,
            "17.2",
            Arc::new(FixedAvailability(false)),
            granted_api(),
        );

        assert_eq!(h.session.screen(), Screen::Loading);
        let result = h.session.resolve_capability().await;

        assert_eq!(result, CapabilityResult::Supported);
        assert_eq!(h.session.screen(), Screen::Ar);
        assert!(h.session.ar_toggle_enabled());
        assert_eq!(h.bus.events_for(event_names::CAPABILITY_RESOLVED).len(), 1);
        assert_eq!(h.bus.events_for(event_names::MODE_CHANGED).len(), 1);
    }

    #[tokio::test]
    async fn unsupported_device_falls_back_to_qr() {
        let h = harness(
            Platform::Android,
            "25",
            Arc::new(FixedAvailability(true)),
            granted_api(),
        );

        let result = h.session.resolve_capability().await;
        assert_eq!(result, CapabilityResult::Unsupported);
        assert_eq!(h.session.user_mode(), Mode::Qr, "default re-pointed at QR");
        assert!(!h.session.ar_toggle_enabled());

        match h.session.screen() {
            Screen::Qr {
                fallback_banner, ..
            } => assert!(fallback_banner),
            other => panic!("expected QR screen, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ar_toggle_ignored_while_unsupported() {
        let h = harness(
            Platform::Other,
            "1",
            Arc::new(FixedAvailability(true)),
            granted_api(),
        );
        h.session.resolve_capability().await;
        h.bus.clear();

        h.session.select_mode(Mode::Ar);
        assert!(matches!(h.session.screen(), Screen::Qr { .. }));
        assert!(h.bus.events_for(event_names::MODE_CHANGED).is_empty());
    }

    #[tokio::test]
    async fn probe_resolves_once_per_session() {
        let h = harness(
            Platform::Ios,
            "17.2",
            Arc::new(FixedAvailability(false)),
            granted_api(),
        );

        h.session.resolve_capability().await;
        h.session.resolve_capability().await;
        assert_eq!(h.bus.events_for(event_names::CAPABILITY_RESOLVED).len(), 1);
    }

    #[tokio::test]
    async fn shutdown_discards_in_flight_probe() {
        let h = harness(
            Platform::Android,
            "33",
            Arc::new(HangingAvailability),
            granted_api(),
        );

        let session = h.session.clone();
        let probe = tokio::spawn(async move { session.resolve_capability().await });
        tokio::task::yield_now().await;

        h.session.shutdown();
        let result = probe.await.unwrap();

        // No state was applied after teardown.
        assert_eq!(result, CapabilityResult::Unknown);
        assert_eq!(h.session.capability(), CapabilityResult::Unknown);
        assert!(h.bus.events_for(event_names::CAPABILITY_RESOLVED).is_empty());
        assert!(h.bus.events_for(event_names::MODE_CHANGED).is_empty());
    }
}

// =============================================================================
// Permission flow on the QR screen
// =============================================================================

mod permission {
    use super::*;

    #[tokio::test]
    async fn qr_mount_resolves_to_granted() {
        let h = harness(
            Platform::Ios,
            "17.2",
            Arc::new(FixedAvailability(false)),
            granted_api(),
        );
        h.session.resolve_capability().await;
        h.session.select_mode(Mode::Qr);

        let qr = h.session.qr_screen().clone();
        assert_eq!(qr.permission_state(), PermissionState::Pending);

        let state = qr.resolve_permission().await;
        assert_eq!(state, PermissionState::Granted);
        assert_eq!(
            h.session.screen(),
            Screen::Qr {
                permission: PermissionState::Granted,
                fallback_banner: false,
            }
        );
        assert_eq!(h.bus.events_for(event_names::PERMISSION_CHANGED).len(), 1);
    }

    #[tokio::test]
    async fn denied_then_retry_granted() {
        let api = ScriptedPermissionApi::default();
        {
            let mut checks = api.checks.lock().unwrap();
            checks.push_back(RawPermissionStatus::Denied);
            checks.push_back(RawPermissionStatus::Denied);
            let mut requests = api.requests.lock().unwrap();
            requests.push_back(RawPermissionStatus::Denied);
            requests.push_back(RawPermissionStatus::Granted);
        }
        let h = harness(
            Platform::Ios,
            "17.2",
            Arc::new(FixedAvailability(false)),
            Arc::new(api),
        );
        h.session.resolve_capability().await;
        h.session.select_mode(Mode::Qr);
        let qr = h.session.qr_screen().clone();

        assert_eq!(qr.resolve_permission().await, PermissionState::Denied);
        assert_eq!(qr.request_again().await, PermissionState::Granted);
        assert_eq!(h.bus.events_for(event_names::PERMISSION_CHANGED).len(), 2);
    }

    #[tokio::test]
    async fn foreground_recheck_recovers_from_blocked() {
        let api = ScriptedPermissionApi::default();
        {
            let mut checks = api.checks.lock().unwrap();
            checks.push_back(RawPermissionStatus::Blocked);
            // After the user flipped the toggle in system settings.
            checks.push_back(RawPermissionStatus::Granted);
        }
        let api = Arc::new(api);
        let h = harness(
            Platform::Ios,
            "17.2",
            Arc::new(FixedAvailability(false)),
            api.clone(),
        );
        h.session.resolve_capability().await;
        h.session.select_mode(Mode::Qr);
        let qr = h.session.qr_screen().clone();

        assert_eq!(qr.resolve_permission().await, PermissionState::Blocked);
        qr.open_settings();
        assert_eq!(*api.settings_opened.lock().unwrap(), 1);

        assert_eq!(qr.on_app_foreground().await, PermissionState::Granted);
    }

    #[tokio::test]
    async fn foreground_noop_when_granted() {
        let h = harness(
            Platform::Ios,
            "17.2",
            Arc::new(FixedAvailability(false)),
            granted_api(),
        );
        h.session.resolve_capability().await;
        h.session.select_mode(Mode::Qr);
        let qr = h.session.qr_screen().clone();

        qr.resolve_permission().await;
        h.bus.clear();

        assert_eq!(qr.on_app_foreground().await, PermissionState::Granted);
        assert!(h.bus.events_for(event_names::PERMISSION_CHANGED).is_empty());
    }

    #[tokio::test]
    async fn unmount_discards_in_flight_resolution() {
        let h = harness(
            Platform::Ios,
            "17.2",
            Arc::new(FixedAvailability(false)),
            Arc::new(HangingPermissionApi),
        );
        h.session.resolve_capability().await;
        h.session.select_mode(Mode::Qr);
        let qr = h.session.qr_screen().clone();

        let pending = {
            let qr = qr.clone();
            tokio::spawn(async move { qr.resolve_permission().await })
        };
        tokio::task::yield_now().await;

        qr.unmount();
        let state = pending.await.unwrap();

        assert_eq!(state, PermissionState::Pending);
        assert_eq!(qr.permission_state(), PermissionState::Pending);
        assert!(h.bus.events_for(event_names::PERMISSION_CHANGED).is_empty());
    }

    #[tokio::test]
    async fn remount_starts_from_pending() {
        let h = harness(
            Platform::Ios,
            "17.2",
            Arc::new(FixedAvailability(false)),
            granted_api(),
        );
        h.session.resolve_capability().await;
        h.session.select_mode(Mode::Qr);
        let qr = h.session.qr_screen().clone();
        qr.resolve_permission().await;
        assert_eq!(qr.permission_state(), PermissionState::Granted);

        // Leave for AR and come back: no caching across mounts.
        h.session.select_mode(Mode::Ar);
        h.session.select_mode(Mode::Qr);
        assert_eq!(qr.permission_state(), PermissionState::Pending);
    }
}

// =============================================================================
// Scan handling on the QR screen
// =============================================================================

mod scanning {
    use super::*;

    fn qr_ready() -> Harness {
        let h = harness(
            Platform::Ios,
            "17.2",
            Arc::new(FixedAvailability(false)),
            granted_api(),
        );
        h.session.select_mode(Mode::Qr);
        h
    }

    #[tokio::test]
    async fn feed_is_deduplicated_and_routed() {
        let h = qr_ready();
        let qr = h.session.qr_screen().clone();

        let mut feed = BarcodeFeed::new();
        let sender = feed.sender();
        let receiver = feed.take_receiver().unwrap();

        sender.push(Barcode::new("https://example.com"));
        sender.push(Barcode::new("https://example.com"));
        sender.push(Barcode::new("hello"));
        drop(feed);
        drop(sender);

        qr.run_scan_loop(receiver).await;

        assert_eq!(
            h.opener.opened.lock().unwrap().as_slice(),
            ["https://example.com"]
        );
        assert_eq!(h.alerts.messages.lock().unwrap().as_slice(), ["hello"]);
        assert_eq!(h.bus.events_for(event_names::SCAN_DETECTED).len(), 2);
    }

    #[tokio::test]
    async fn scan_events_flag_urls() {
        let h = qr_ready();
        let qr = h.session.qr_screen().clone();

        qr.handle_barcode(&Barcode::new("https://example.com"));
        qr.handle_barcode(&Barcode::new("hello"));

        let events = h.bus.events_for(event_names::SCAN_DETECTED);
        match events.as_slice() {
            [Event::Scan(url), Event::Scan(text)] => {
                assert_eq!(url.value, "https://example.com");
                assert!(url.is_url);
                assert_eq!(text.value, "hello");
                assert!(!text.is_url);
            }
            other => panic!("expected two scan events, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unmount_stops_the_scan_loop() {
        let h = qr_ready();
        let qr = h.session.qr_screen().clone();

        let mut feed = BarcodeFeed::new();
        let sender = feed.sender();
        let receiver = feed.take_receiver().unwrap();

        let consumer = {
            let qr = qr.clone();
            tokio::spawn(async move { qr.run_scan_loop(receiver).await })
        };
        tokio::task::yield_now().await;

        qr.unmount();
        consumer.await.unwrap();

        // Records pushed after teardown go nowhere.
        sender.push(Barcode::new("late"));
        assert!(h.bus.events_for(event_names::SCAN_DETECTED).is_empty());
    }
}
