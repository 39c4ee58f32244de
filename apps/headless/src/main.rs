//! Headless harness: runs the full gating flow against simulated vendor
//! seams and logs every screen decision and event. Useful for exercising
//! the state machine without any native SDK.

use std::sync::Arc;

use markerview_capability::{
    ArAvailability, ArAvailabilityApi, CapabilityError, CapabilityProber, Platform,
    StaticDeviceInfo,
};
use markerview_events::{EventBusRef, RecordingEventBus};
use markerview_mode::Mode;
use markerview_permission::{CameraPermissionApi, PermissionError, RawPermissionStatus};
use markerview_scan::{
    AlertPresenter, Barcode, BarcodeFeed, OpenError, ScanRouter, UrlOpener,
};
use markerview_session::{
    AppSession, ArOverlay, QrScreen, RegistrationError, TargetRegistrar, TargetRegistry,
    TrackingTarget,
};
use tracing_subscriber::EnvFilter;

struct SimulatedAvailability {
    supported: bool,
}

#[async_trait::async_trait]
impl ArAvailabilityApi for SimulatedAvailability {
    async fn is_ar_supported_on_device(&self) -> Result<ArAvailability, CapabilityError> {
        Ok(ArAvailability {
            is_ar_supported: self.supported,
        })
    }
}

struct SimulatedPermissionApi;

#[async_trait::async_trait]
impl CameraPermissionApi for SimulatedPermissionApi {
    async fn check(&self) -> Result<RawPermissionStatus, PermissionError> {
        Ok(RawPermissionStatus::Denied)
    }

    async fn request(&self) -> Result<RawPermissionStatus, PermissionError> {
        tracing::info!("simulated camera permission prompt accepted");
        Ok(RawPermissionStatus::Granted)
    }

    fn open_settings(&self) {
        tracing::info!("simulated jump to system settings");
    }
}

struct LoggingOpener;

impl UrlOpener for LoggingOpener {
    fn open_url(&self, url: &str) -> Result<(), OpenError> {
        tracing::info!(url, "would open externally");
        Ok(())
    }
}

struct LoggingAlerts;

impl AlertPresenter for LoggingAlerts {
    fn alert(&self, title: &str, message: &str) {
        tracing::info!(title, message, "alert");
    }
}

struct LoggingRegistrar;

impl TargetRegistrar for LoggingRegistrar {
    fn register(&self, target: &TrackingTarget) -> Result<(), RegistrationError> {
        tracing::info!(name = %target.name, width_m = target.physical_width_m, "registered tracking target");
        Ok(())
    }
}

async fn run_device(label: &str, platform: Platform, os_version: &str, ar_supported: bool) {
    tracing::info!(device = label, "--- starting session ---");

    let bus = Arc::new(RecordingEventBus::new());
    let bus_ref: EventBusRef = bus.clone();

    let registry = TargetRegistry::new(Arc::new(LoggingRegistrar));
    registry.register_once(&TrackingTarget::poster());
    registry.register_once(&TrackingTarget::poster()); // no-op

    let prober = CapabilityProber::new(
        Arc::new(StaticDeviceInfo::new(platform, os_version)),
        Arc::new(SimulatedAvailability {
            supported: ar_supported,
        }),
    );
    let router = ScanRouter::new(Arc::new(LoggingOpener), Arc::new(LoggingAlerts));
    let qr = Arc::new(QrScreen::new(
        Arc::new(SimulatedPermissionApi),
        router,
        bus_ref.clone(),
    ));
    let session = Arc::new(AppSession::new(prober, qr, bus_ref));

    tracing::info!(screen = ?session.screen(), "before probe");
    session.resolve_capability().await;
    tracing::info!(screen = ?session.screen(), "after probe");

    // Walk through the AR overlay reacting to anchor events.
    if matches!(session.screen(), markerview_session::Screen::Ar) {
        let mut overlay = ArOverlay::new("poster", bus.clone());
        overlay.on_anchor_found();
        overlay.toggle_playback();
        overlay.on_anchor_removed();
        session.select_mode(Mode::Qr);
    }

    // The QR screen: resolve the camera permission, then scan a few codes.
    let qr = session.qr_screen().clone();
    qr.resolve_permission().await;
    tracing::info!(screen = ?session.screen(), "qr screen ready");

    let mut feed = BarcodeFeed::new();
    let sender = feed.sender();
    let receiver = feed.take_receiver().expect("receiver already taken");
    for value in [
        "https://example.com",
        "https://example.com", // suppressed repeat
        "hello world",
    ] {
        sender.push(Barcode::new(value));
    }
    drop(feed);
    drop(sender);
    qr.run_scan_loop(receiver).await;

    session.shutdown();

    for event in bus.events() {
        tracing::info!(topic = %event.topic(), payload = %event.payload(), "event");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,markerview=debug")),
        )
        .init();

    tracing::info!("Starting markerview headless harness");

    run_device("modern-android", Platform::Android, "33", true).await;
    run_device("legacy-android", Platform::Android, "25", true).await;

    Ok(())
}
