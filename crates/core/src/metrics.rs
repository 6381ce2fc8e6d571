//! Prometheus metrics for the scan loop.
//!
//! This module provides metrics for:
//! - Frame pipeline (per-frame outcomes, durations, camera rate)
//! - Solver (solve durations)
//! - Sessions (outcomes, durations)
//! - Telemetry uploads

use once_cell::sync::Lazy;
use prometheus::{Gauge, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Frame pipeline metrics
// =============================================================================

/// Frames processed total by outcome.
pub static FRAMES_PROCESSED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gridlens_frames_processed_total", "Total frames processed"),
        &["outcome"], // "no_grid", "too_few_clues", "constraint_violation", "no_unique_solution", "solved"
    )
    .unwrap()
});

/// Frame processing duration in seconds.
pub static FRAME_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gridlens_frame_duration_seconds",
            "Duration of one frame's capture-recognize-solve pass",
        )
        .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Observed camera loop rate (frames per second).
pub static CAMERA_FPS: Lazy<Gauge> = Lazy::new(|| {
    Gauge::new(
        "gridlens_camera_fps",
        "Observed scan loop rate in frames per second",
    )
    .unwrap()
});

// =============================================================================
// Solver metrics
// =============================================================================

/// Solver invocation duration in seconds.
pub static SOLVER_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gridlens_solver_duration_seconds",
            "Duration of solver invocations",
        )
        .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Session metrics
// =============================================================================

/// Sessions ended total by outcome.
pub static SESSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gridlens_sessions_total", "Total scan sessions ended"),
        &["outcome"], // "completed", "cancelled", "failed"
    )
    .unwrap()
});

/// Session duration in seconds.
pub static SESSION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gridlens_session_duration_seconds",
            "Duration of scan sessions",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["outcome"],
    )
    .unwrap()
});

// =============================================================================
// Telemetry metrics
// =============================================================================

/// Session telemetry uploads total by status.
pub static TELEMETRY_UPLOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gridlens_telemetry_uploads_total",
            "Total session telemetry uploads",
        ),
        &["status"], // "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Frame pipeline
        Box::new(FRAMES_PROCESSED.clone()),
        Box::new(FRAME_DURATION.clone()),
        Box::new(CAMERA_FPS.clone()),
        // Solver
        Box::new(SOLVER_DURATION.clone()),
        // Sessions
        Box::new(SESSIONS_TOTAL.clone()),
        Box::new(SESSION_DURATION.clone()),
        // Telemetry
        Box::new(TELEMETRY_UPLOADS.clone()),
    ]
}
