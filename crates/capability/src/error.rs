//! Error types for the vendor capability seam.

/// Failure reported by the vendor AR-availability API.
///
/// These never escape the prober; they are logged and downgraded to
/// `CapabilityResult::Unsupported`.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("vendor availability query failed: {0}")]
    Query(String),
    #[error("vendor availability response was malformed: {0}")]
    MalformedResponse(String),
}
