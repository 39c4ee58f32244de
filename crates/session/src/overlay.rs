//! Anchor-driven video overlay state.

use markerview_events::{event_names, AnchorEvent, AnchorEventKind, EventBusRef};

/// Tracks overlay visibility and playback for the AR scene.
///
/// The AR engine pushes `onAnchorFound` / `onAnchorRemoved` for the single
/// registered target; the overlay's only job is to react by toggling
/// visibility and playback. Playback can also be toggled by the user, but
/// only while the marker anchor is in view.
pub struct ArOverlay {
    target: String,
    visible: bool,
    playing: bool,
    bus: EventBusRef,
}

impl ArOverlay {
    pub fn new(target: impl Into<String>, bus: EventBusRef) -> Self {
        Self {
            target: target.into(),
            visible: false,
            playing: false,
            bus,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Marker entered view: show the overlay and start playback.
    pub fn on_anchor_found(&mut self) {
        self.visible = true;
        self.playing = true;
        tracing::debug!(target = %self.target, "anchor found");
        self.emit(AnchorEventKind::Found);
    }

    /// Marker left view: hide and pause.
    pub fn on_anchor_removed(&mut self) {
        self.playing = false;
        self.visible = false;
        tracing::debug!(target = %self.target, "anchor removed");
        self.emit(AnchorEventKind::Removed);
    }

    /// User play/pause control; inert while the overlay is hidden.
    pub fn toggle_playback(&mut self) {
        if !self.visible {
            return;
        }
        self.playing = !self.playing;
    }

    fn emit(&self, kind: AnchorEventKind) {
        self.bus
            .emit(AnchorEvent::now(kind, self.target.clone()).into());
    }
}
