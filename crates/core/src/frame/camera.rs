//! Frame source adapter over a camera device.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use super::types::{CameraDevice, DeviceError, Frame, FrameSource};

/// [`FrameSource`] over an [`CameraDevice`].
///
/// Owns the liveness flag and the monotonic frame counter; the device
/// itself only hands over images.
pub struct CameraFrameSource {
    device: Arc<dyn CameraDevice>,
    active: AtomicBool,
    next_index: AtomicU64,
}

impl CameraFrameSource {
    pub fn new(device: Arc<dyn CameraDevice>) -> Self {
        Self {
            device,
            active: AtomicBool::new(false),
            next_index: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl FrameSource for CameraFrameSource {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    async fn start(&self) -> Result<(), DeviceError> {
        if self.active.swap(true, Ordering::SeqCst) {
            warn!(device = self.device.name(), "frame source already started");
            return Ok(());
        }
        if let Err(e) = self.device.open().await {
            self.active.store(false, Ordering::SeqCst);
            return Err(e);
        }
        self.next_index.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.device.close().await;
        }
    }

    async fn capture_frame(&self) -> Option<Frame> {
        if !self.is_active() {
            return None;
        }
        match self.device.grab().await {
            Ok(Some(image)) => Some(Frame {
                index: self.next_index.fetch_add(1, Ordering::SeqCst),
                captured_at: Utc::now(),
                image,
            }),
            Ok(None) => None,
            Err(e) => {
                // A device that errors mid-stream is treated as a stream
                // end; the loop exits silently and releases the handle.
                warn!(device = self.device.name(), error = %e, "frame capture failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::frame::CapturedImage;

    /// Scripted camera device for adapter tests.
    struct ScriptedCamera {
        images: Mutex<VecDeque<CapturedImage>>,
        open_error: Mutex<Option<DeviceError>>,
        opens: AtomicU64,
        closes: AtomicU64,
    }

    impl ScriptedCamera {
        fn with_images(count: usize) -> Self {
            let images = (0..count)
                .map(|_| CapturedImage {
                    width: 2,
                    height: 2,
                    pixels: vec![0; 4],
                })
                .collect();
            Self {
                images: Mutex::new(images),
                open_error: Mutex::new(None),
                opens: AtomicU64::new(0),
                closes: AtomicU64::new(0),
            }
        }

        fn failing_open(error: DeviceError) -> Self {
            let camera = Self::with_images(0);
            *camera.open_error.lock().unwrap() = Some(error);
            camera
        }
    }

    #[async_trait]
    impl CameraDevice for ScriptedCamera {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn open(&self) -> Result<(), DeviceError> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            match self.open_error.lock().unwrap().take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        async fn grab(&self) -> Result<Option<CapturedImage>, DeviceError> {
            Ok(self.images.lock().unwrap().pop_front())
        }

        async fn close(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_frames_are_numbered_monotonically() {
        let source = CameraFrameSource::new(Arc::new(ScriptedCamera::with_images(3)));
        source.start().await.unwrap();

        assert_eq!(source.capture_frame().await.unwrap().index, 0);
        assert_eq!(source.capture_frame().await.unwrap().index, 1);
        assert_eq!(source.capture_frame().await.unwrap().index, 2);
        assert!(source.capture_frame().await.is_none());
    }

    #[tokio::test]
    async fn test_capture_before_start_returns_none() {
        let source = CameraFrameSource::new(Arc::new(ScriptedCamera::with_images(3)));
        assert!(!source.is_active());
        assert!(source.capture_frame().await.is_none());
    }

    #[tokio::test]
    async fn test_stopped_source_does_not_poll_device() {
        let camera = Arc::new(ScriptedCamera::with_images(3));
        let source = CameraFrameSource::new(Arc::clone(&camera) as Arc<dyn CameraDevice>);
        source.start().await.unwrap();
        source.capture_frame().await.unwrap();
        source.stop().await;

        assert!(!source.is_active());
        assert!(source.capture_frame().await.is_none());
        // Two of the three scripted images are still queued: the stopped
        // source never reached for them.
        assert_eq!(camera.images.lock().unwrap().len(), 2);
        assert_eq!(camera.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_start_leaves_source_inactive() {
        let camera = Arc::new(ScriptedCamera::failing_open(DeviceError::NotFound(
            "no video devices".into(),
        )));
        let source = CameraFrameSource::new(Arc::clone(&camera) as Arc<dyn CameraDevice>);

        let err = source.start().await.unwrap_err();

        assert!(matches!(err, DeviceError::NotFound(_)));
        assert!(!source.is_active());
    }

    #[tokio::test]
    async fn test_restart_resets_frame_numbering() {
        let camera = Arc::new(ScriptedCamera::with_images(4));
        let source = CameraFrameSource::new(Arc::clone(&camera) as Arc<dyn CameraDevice>);

        source.start().await.unwrap();
        source.capture_frame().await.unwrap();
        source.capture_frame().await.unwrap();
        source.stop().await;

        source.start().await.unwrap();
        assert_eq!(source.capture_frame().await.unwrap().index, 0);
        assert_eq!(camera.opens.load(Ordering::SeqCst), 2);
    }
}
