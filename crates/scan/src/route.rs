//! Routing of admitted scan values.
//!
//! URL-shaped payloads go to an external opener; everything else (and any
//! opener failure) surfaces as a user-visible alert. Neither path can fail
//! the flow.

use std::sync::Arc;

/// Failure from the external URL handler.
#[derive(Debug, thiserror::Error)]
#[error("failed to open url: {0}")]
pub struct OpenError(pub String);

/// External handler that opens a URL outside the app.
pub trait UrlOpener: Send + Sync {
    fn open_url(&self, url: &str) -> Result<(), OpenError>;
}

/// Presents a user-visible alert. Fire-and-forget.
pub trait AlertPresenter: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}

/// What a routed scan turned into, for event reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Handed to the external URL opener.
    Opened,
    /// Surfaced as an alert (raw value or open failure).
    Alerted,
}

/// True for http:// and https:// payloads, scheme matched case-insensitively.
pub fn is_http_url(value: &str) -> bool {
    // Byte-wise compare, payloads are arbitrary and not always ASCII.
    let has_prefix = |prefix: &str| {
        value.len() >= prefix.len()
            && value.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    };
    has_prefix("http://") || has_prefix("https://")
}

/// Routes admitted scan values to the opener or the alert presenter.
pub struct ScanRouter {
    opener: Arc<dyn UrlOpener>,
    alerts: Arc<dyn AlertPresenter>,
}

impl ScanRouter {
    pub fn new(opener: Arc<dyn UrlOpener>, alerts: Arc<dyn AlertPresenter>) -> Self {
        Self { opener, alerts }
    }

    pub fn route(&self, value: &str) -> ScanOutcome {
        if is_http_url(value) {
            match self.opener.open_url(value) {
                Ok(()) => ScanOutcome::Opened,
                Err(e) => {
                    tracing::warn!("{e}");
                    self.alerts
                        .alert("Open URL failed", "Unable to open the scanned link.");
                    ScanOutcome::Alerted
                }
            }
        } else {
            self.alerts.alert("QR code detected", value);
            ScanOutcome::Alerted
        }
    }
}
