//! Camera frame capture.
//!
//! The [`FrameSource`] contract is what the scan loop drives; webcam
//! device access itself stays behind the [`CameraDevice`] trait.

mod camera;
mod types;

pub use camera::CameraFrameSource;
pub use types::*;
