//! Bounded delivery channel from the camera decoder to the QR screen.
//!
//! Decoded records arrive as an externally pushed stream. The feed is a
//! bounded mpsc channel that drops the newest record when the consumer
//! falls behind; a stale scan is worthless and the decoder will produce
//! the same value again on the next frame.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::barcode::Barcode;

/// Configuration for the barcode feed.
#[derive(Debug, Clone)]
pub struct BarcodeFeedConfig {
    /// Channel capacity in records.
    pub capacity: usize,
}

impl Default for BarcodeFeedConfig {
    fn default() -> Self {
        // A handful of frames of headroom at the decoder's ~5 fps.
        Self { capacity: 16 }
    }
}

/// Sender half, handed to the camera SDK adapter.
#[derive(Clone)]
pub struct BarcodeFeedSender {
    tx: mpsc::Sender<Barcode>,
    dropped: Arc<AtomicU64>,
}

impl BarcodeFeedSender {
    /// Push a decoded record, dropping it if the buffer is full.
    ///
    /// Returns true if delivered.
    pub fn push(&self, barcode: Barcode) -> bool {
        match self.tx.try_send(barcode) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                // Rate-limit logging: only log every 10th drop to avoid spam
                if dropped % 10 == 1 {
                    tracing::warn!(dropped, "barcode feed full, dropping records");
                }
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("barcode feed closed");
                false
            }
        }
    }

    /// Number of records dropped because the consumer fell behind.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Receiver half, owned by the QR screen.
pub struct BarcodeFeedReceiver {
    rx: mpsc::Receiver<Barcode>,
}

impl BarcodeFeedReceiver {
    /// Receive the next decoded record.
    pub async fn recv(&mut self) -> Option<Barcode> {
        self.rx.recv().await
    }

    /// Non-blocking variant for tests and polling consumers.
    pub fn try_recv(&mut self) -> Option<Barcode> {
        self.rx.try_recv().ok()
    }
}

/// Barcode feed pairing one producer (the decoder) with one consumer.
pub struct BarcodeFeed {
    sender: BarcodeFeedSender,
    receiver: Option<BarcodeFeedReceiver>,
}

impl BarcodeFeed {
    pub fn new() -> Self {
        Self::with_config(BarcodeFeedConfig::default())
    }

    pub fn with_config(config: BarcodeFeedConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.capacity.max(1));
        Self {
            sender: BarcodeFeedSender {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            receiver: Some(BarcodeFeedReceiver { rx }),
        }
    }

    /// Get a clone of the sender.
    pub fn sender(&self) -> BarcodeFeedSender {
        self.sender.clone()
    }

    /// Take the receiver (can only be called once).
    pub fn take_receiver(&mut self) -> Option<BarcodeFeedReceiver> {
        self.receiver.take()
    }
}

impl Default for BarcodeFeed {
    fn default() -> Self {
        Self::new()
    }
}
