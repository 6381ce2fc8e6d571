//! Mock collaborators and grid fixtures for testing.

pub mod fixtures;
mod mock_display;
mod mock_frame_source;
mod mock_recognizer;
mod mock_solver;
mod mock_transport;

pub use mock_display::{MockDisplay, MockErrorPanel};
pub use mock_frame_source::MockFrameSource;
pub use mock_recognizer::MockRecognizer;
pub use mock_solver::RecordingSolver;
pub use mock_transport::RecordingTransport;
