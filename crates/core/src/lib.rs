//! gridlens-core: webcam sudoku scanning and solving.
//!
//! The crate owns the orchestration around a camera scan loop: capture a
//! frame, recognize a grid, validate the digits, solve, render, while
//! staying cancellable and at interactive rate. Camera access, the
//! detection/classification models and the UI surface are collaborators
//! behind traits.

pub mod config;
pub mod display;
pub mod frame;
pub mod metrics;
pub mod orchestrator;
pub mod recognize;
pub mod sudoku;
pub mod telemetry;
pub mod testing;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError, TelemetryConfig};
pub use display::{Display, ErrorPanel, HeadlessDisplay, LogErrorPanel, ViewMode};
pub use frame::{CameraDevice, CameraFrameSource, DeviceError, Frame, FrameSource, Snapshot};
pub use orchestrator::{
    FrameOutcome, OrchestratorConfig, OrchestratorStatus, ScanOrchestrator, SessionEnd,
    SessionError, SessionState,
};
pub use recognize::{
    DigitClassifier, GridDetector, GridRecognizer, NullOverlay, OverlayOptions, OverlaySurface,
    RecognitionError, Recognizer, ScanResult,
};
pub use sudoku::{
    satisfies_constraints, to_puzzle, BacktrackingSolver, DigitPrediction, DigitPredictions,
    GridError, Puzzle, Solution, SudokuSolver, MIN_CLUES,
};
pub use telemetry::{
    create_transport, FrameMarks, HttpTransport, SessionOutcome, SessionRecord, SessionRecorder,
    TelemetryError, TelemetryTransport, MARK_LOG_CAPACITY,
};
