//! Top-level session host.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use markerview_capability::{CapabilityProber, CapabilityResult};
use markerview_events::{CapabilityResolvedEvent, EventBusRef, ModeChangedEvent};
use markerview_mode::{Mode, ModeState, ScreenMode};
use tokio_util::sync::CancellationToken;

use crate::qr_screen::QrScreen;
use crate::screen::Screen;

/// One app session: capability gating, mode selection and the active screen.
///
/// The capability probe runs once per session, asynchronously; its result is
/// applied only while the session is alive (guarded by a cancellation
/// token). Each screen owns its own state exclusively; the session only
/// derives which screen is showing.
pub struct AppSession {
    state: Mutex<ModeState>,
    prober: CapabilityProber,
    probe_in_flight: AtomicBool,
    cancel: CancellationToken,
    bus: EventBusRef,
    qr: Arc<QrScreen>,
}

impl AppSession {
    pub fn new(prober: CapabilityProber, qr: Arc<QrScreen>, bus: EventBusRef) -> Self {
        Self {
            state: Mutex::new(ModeState::new()),
            prober,
            probe_in_flight: AtomicBool::new(false),
            cancel: CancellationToken::new(),
            bus,
            qr,
        }
    }

    pub fn qr_screen(&self) -> &Arc<QrScreen> {
        &self.qr
    }

    pub fn capability(&self) -> CapabilityResult {
        self.state.lock().unwrap().capability()
    }

    pub fn user_mode(&self) -> Mode {
        self.state.lock().unwrap().user_mode()
    }

    pub fn ar_toggle_enabled(&self) -> bool {
        self.state.lock().unwrap().ar_toggle_enabled()
    }

    /// The screen to render right now, derived from capability + intent.
    pub fn screen(&self) -> Screen {
        let state = self.state.lock().unwrap();
        match state.screen_mode() {
            ScreenMode::Loading => Screen::Loading,
            ScreenMode::Ar => Screen::Ar,
            ScreenMode::Qr => Screen::Qr {
                permission: self.qr.permission_state(),
                fallback_banner: state.fallback_active(),
            },
        }
    }

    /// Run the capability probe for this session.
    ///
    /// No-op once resolved; at most one probe in flight. The result is
    /// discarded if the session shut down while the probe was pending.
    pub async fn resolve_capability(&self) -> CapabilityResult {
        if self.capability().is_resolved() {
            return self.capability();
        }
        self.run_probe().await
    }

    /// Explicit user retry (the unsupported screen's retry affordance).
    /// Gated on the previous probe having finished.
    pub async fn retry_capability(&self) -> CapabilityResult {
        self.run_probe().await
    }

    async fn run_probe(&self) -> CapabilityResult {
        if self.probe_in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!("capability probe already in flight");
            return self.capability();
        }

        let result = tokio::select! {
            _ = self.cancel.cancelled() => None,
            result = self.prober.probe() => Some(result),
        };
        self.probe_in_flight.store(false, Ordering::SeqCst);

        match result {
            Some(result) if !self.cancel.is_cancelled() => {
                self.apply_capability(result);
                result
            }
            _ => {
                tracing::debug!("discarding capability result after shutdown");
                self.capability()
            }
        }
    }

    fn apply_capability(&self, result: CapabilityResult) {
        let (before, after) = {
            let mut state = self.state.lock().unwrap();
            let before = (state.screen_mode(), state.user_mode(), state.fallback_active());
            state.apply_capability(result);
            (
                before,
                (state.screen_mode(), state.user_mode(), state.fallback_active()),
            )
        };

        tracing::info!(?result, "capability resolved");
        self.bus.emit(CapabilityResolvedEvent::now(result).into());

        if before != after {
            self.emit_mode_changed();
            if after.0 == ScreenMode::Qr && before.0 != ScreenMode::Qr {
                // Forced fallback counts as a fresh QR screen mount.
                self.qr.mount();
            }
        }
    }

    /// Apply a user toggle. Ignored while AR is unsupported or while the
    /// toggle would not change anything.
    pub fn select_mode(&self, mode: Mode) {
        let (changed, before_screen, after_screen) = {
            let mut state = self.state.lock().unwrap();
            let before = state.screen_mode();
            let changed = state.select(mode);
            (changed, before, state.screen_mode())
        };

        if !changed {
            return;
        }
        self.emit_mode_changed();
        if after_screen == ScreenMode::Qr && before_screen != ScreenMode::Qr {
            self.qr.mount();
        } else if before_screen == ScreenMode::Qr && after_screen != ScreenMode::Qr {
            self.qr.unmount();
        }
    }

    fn emit_mode_changed(&self) {
        let event = {
            let state = self.state.lock().unwrap();
            ModeChangedEvent::now(
                state.screen_mode(),
                state.user_mode(),
                state.fallback_active(),
            )
        };
        self.bus.emit(event.into());
    }

    /// End the session: pending async results are discarded, the QR screen
    /// is torn down.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        self.qr.unmount();
    }
}
