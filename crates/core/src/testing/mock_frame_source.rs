//! Mock frame source for testing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::frame::{CapturedImage, DeviceError, Frame, FrameSource};

/// Mock implementation of the [`FrameSource`] trait.
///
/// Provides controllable behavior for testing:
/// - Unlimited or bounded frame streams
/// - Start failure injection
/// - Recorded start/stop calls for assertions
pub struct MockFrameSource {
    active: AtomicBool,
    next_index: AtomicU64,
    frame_limit: RwLock<Option<u64>>,
    start_error: RwLock<Option<DeviceError>>,
    starts: AtomicU64,
    stops: AtomicU64,
}

impl Default for MockFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFrameSource {
    /// A source that streams frames until stopped.
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            next_index: AtomicU64::new(0),
            frame_limit: RwLock::new(None),
            start_error: RwLock::new(None),
            starts: AtomicU64::new(0),
            stops: AtomicU64::new(0),
        }
    }

    /// A source that dries up after `limit` frames, as a camera that
    /// stops mid-session would.
    pub fn with_frame_limit(limit: u64) -> Self {
        Self {
            frame_limit: RwLock::new(Some(limit)),
            ..Self::new()
        }
    }

    /// Configure the next `start` call to fail with the given error.
    pub async fn set_start_error(&self, error: DeviceError) {
        *self.start_error.write().await = Some(error);
    }

    /// Number of `start` calls observed.
    pub fn start_calls(&self) -> u64 {
        self.starts.load(Ordering::SeqCst)
    }

    /// Number of `stop` calls observed.
    pub fn stop_calls(&self) -> u64 {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FrameSource for MockFrameSource {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    async fn start(&self) -> Result<(), DeviceError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.start_error.write().await.take() {
            return Err(err);
        }
        self.next_index.store(0, Ordering::SeqCst);
        self.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.active.store(false, Ordering::SeqCst);
    }

    async fn capture_frame(&self) -> Option<Frame> {
        if !self.is_active() {
            return None;
        }
        let index = self.next_index.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = *self.frame_limit.read().await {
            if index >= limit {
                return None;
            }
        }
        Some(Frame {
            index,
            captured_at: Utc::now(),
            image: CapturedImage {
                width: 4,
                height: 4,
                pixels: vec![0; 16],
            },
        })
    }
}
