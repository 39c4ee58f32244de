//! Barcode scan handling for the QR screen.
//!
//! The camera/decoder SDK pushes decoded barcode records into a bounded
//! feed; this crate de-duplicates rapid re-scans of the same value within a
//! cooldown window and routes admitted values either to an external URL
//! opener (URL-shaped payloads) or to a user-visible alert (everything
//! else). Decoding itself stays inside the vendor SDK.

mod barcode;
mod dedup;
mod feed;
mod pipeline;
mod route;

pub use barcode::Barcode;
pub use dedup::{ScanDeduper, DEFAULT_SCAN_COOLDOWN};
pub use feed::{BarcodeFeed, BarcodeFeedConfig, BarcodeFeedReceiver, BarcodeFeedSender};
pub use pipeline::QrScanPipeline;
pub use route::{is_http_url, AlertPresenter, OpenError, ScanOutcome, ScanRouter, UrlOpener};
