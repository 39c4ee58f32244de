//! The QR scanning screen.
//!
//! Owns the camera permission state for its own lifetime and consumes the
//! decoded barcode feed through the de-duplicating pipeline. Permission
//! state is never cached across mounts: every mount starts from `Pending`
//! and resolves once, with user retries re-invoking the same check/request
//! protocol.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use markerview_events::{EventBusRef, PermissionChangedEvent, ScanEvent};
use markerview_permission::{resolve, CameraPermissionApi, PermissionState};
use markerview_scan::{is_http_url, Barcode, BarcodeFeedReceiver, QrScanPipeline, ScanRouter};
use tokio_util::sync::CancellationToken;

pub struct QrScreen {
    api: Arc<dyn CameraPermissionApi>,
    bus: EventBusRef,
    state: Mutex<PermissionState>,
    /// Token for the current mount; torn-down screens must not observe
    /// late resolver results.
    mount_token: Mutex<CancellationToken>,
    resolve_in_flight: AtomicBool,
    pipeline: Mutex<QrScanPipeline>,
}

impl QrScreen {
    pub fn new(api: Arc<dyn CameraPermissionApi>, router: ScanRouter, bus: EventBusRef) -> Self {
        Self {
            api,
            bus,
            state: Mutex::new(PermissionState::Pending),
            mount_token: Mutex::new(CancellationToken::new()),
            resolve_in_flight: AtomicBool::new(false),
            pipeline: Mutex::new(QrScanPipeline::new(router)),
        }
    }

    pub fn permission_state(&self) -> PermissionState {
        *self.state.lock().unwrap()
    }

    /// Start a fresh screen lifetime: permission back to `Pending`, scan
    /// suppression cleared, a new teardown guard installed.
    pub fn mount(&self) {
        *self.state.lock().unwrap() = PermissionState::Pending;
        self.pipeline.lock().unwrap().reset();
        let mut token = self.mount_token.lock().unwrap();
        token.cancel();
        *token = CancellationToken::new();
        self.resolve_in_flight.store(false, Ordering::SeqCst);
    }

    /// Tear the screen down. Any in-flight resolution result is discarded.
    pub fn unmount(&self) {
        self.mount_token.lock().unwrap().cancel();
        self.pipeline.lock().unwrap().reset();
    }

    /// Run the check/request protocol once for this mount.
    ///
    /// At most one resolution is in flight at a time; re-triggers while
    /// pending return the current state untouched, as does a call after the
    /// permission was already granted.
    pub async fn resolve_permission(&self) -> PermissionState {
        if self.permission_state() == PermissionState::Granted {
            return PermissionState::Granted;
        }
        if self.resolve_in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!("permission resolution already in flight");
            return self.permission_state();
        }

        let token = self.mount_token.lock().unwrap().clone();
        let resolved = tokio::select! {
            _ = token.cancelled() => None,
            state = resolve(self.api.as_ref()) => Some(state),
        };
        self.resolve_in_flight.store(false, Ordering::SeqCst);

        match resolved {
            Some(state) if !token.is_cancelled() => {
                *self.state.lock().unwrap() = state;
                tracing::info!(%state, "camera permission resolved");
                self.bus.emit(PermissionChangedEvent::now(state).into());
                state
            }
            _ => {
                tracing::debug!("discarding permission result for unmounted screen");
                self.permission_state()
            }
        }
    }

    /// Explicit user retry from the denied prompt.
    pub async fn request_again(&self) -> PermissionState {
        self.resolve_permission().await
    }

    /// Jump to system settings so the user can unblock the camera.
    pub fn open_settings(&self) {
        self.api.open_settings();
    }

    /// App returned to the foreground.
    ///
    /// The original flow never re-checked here and left the user stuck on a
    /// stale blocked prompt after changing settings; we re-run the resolver
    /// whenever the last observed state could have changed outside the app.
    pub async fn on_app_foreground(&self) -> PermissionState {
        match self.permission_state() {
            PermissionState::Denied | PermissionState::Blocked => self.resolve_permission().await,
            state => state,
        }
    }

    /// Feed one decoded record through de-duplication and routing.
    ///
    /// Returns the surfaced value if the record was admitted.
    pub fn handle_barcode(&self, barcode: &Barcode) -> Option<String> {
        let (value, _outcome) = self.pipeline.lock().unwrap().handle(barcode)?;
        self.bus
            .emit(ScanEvent::now(value.clone(), is_http_url(&value)).into());
        Some(value)
    }

    /// Consume the barcode feed until the screen unmounts or the decoder
    /// side closes.
    pub async fn run_scan_loop(&self, mut receiver: BarcodeFeedReceiver) {
        let token = self.mount_token.lock().unwrap().clone();
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                barcode = receiver.recv() => match barcode {
                    Some(barcode) => {
                        self.handle_barcode(&barcode);
                    }
                    None => break,
                },
            }
        }
        tracing::debug!("scan loop finished");
    }
}
