//! Decoded barcode record as delivered by the camera SDK.

use serde::{Deserialize, Serialize};

/// One decoded barcode from the camera frame processor.
///
/// Vendors surface both a raw payload and a display-formatted variant;
/// either may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Barcode {
    pub raw_value: Option<String>,
    pub display_value: Option<String>,
}

impl Barcode {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw_value: Some(raw.into()),
            display_value: None,
        }
    }

    /// The value to surface: display form preferred, raw as fallback.
    pub fn value(&self) -> Option<&str> {
        self.display_value
            .as_deref()
            .or(self.raw_value.as_deref())
            .filter(|v| !v.is_empty())
    }
}
