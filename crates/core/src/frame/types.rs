//! Types for camera frame capture.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while acquiring or driving a camera device.
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("no camera device available: {0}")]
    NotFound(String),

    #[error("camera device disconnected: {0}")]
    Disconnected(String),

    #[error("camera internal error: {0}")]
    Internal(String),
}

/// Raw image handed over by a camera device.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub width: u32,
    pub height: u32,
    /// Encoded pixel data, owned by the frame that wraps it.
    pub pixels: Vec<u8>,
}

/// One captured image with its monotonic capture-order position.
///
/// A frame is owned by the loop iteration that captured it and released
/// once recognition has consumed it; it is never retained across
/// iterations. [`Frame::snapshot`] takes the one explicit copy allowed,
/// used for the success-path display snapshot.
#[derive(Debug)]
pub struct Frame {
    /// Capture-order position within the session, starting at 0.
    pub index: u64,
    pub captured_at: DateTime<Utc>,
    pub image: CapturedImage,
}

impl Frame {
    /// Copy of the frame pixels for persistence alongside a solution.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame_index: self.index,
            width: self.image.width,
            height: self.image.height,
            pixels: self.image.pixels.clone(),
        }
    }
}

/// Pixel copy of the frame a solution was read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame_index: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Contract for the underlying camera device (webcam access itself is an
/// external collaborator; implementations live outside this crate).
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Device name for logging.
    fn name(&self) -> &str;

    /// Acquire the device. Fails when permission is denied or no camera
    /// is present.
    async fn open(&self) -> Result<(), DeviceError>;

    /// One image off the device, or `None` once the stream has ended.
    async fn grab(&self) -> Result<Option<CapturedImage>, DeviceError>;

    /// Release the device handle.
    async fn close(&self);
}

/// Frame source contract used by the scan loop.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Whether the source is currently live.
    fn is_active(&self) -> bool;

    /// Acquire the camera. A source that fails to start is left inactive.
    async fn start(&self) -> Result<(), DeviceError>;

    /// Release the camera. A stopped source returns no further frames
    /// until the next `start`.
    async fn stop(&self);

    /// Capture one frame, or `None` when the source is stopped or the
    /// device has no more frames to give.
    async fn capture_frame(&self) -> Option<Frame>;
}
