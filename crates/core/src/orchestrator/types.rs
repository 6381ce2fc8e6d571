//! Types for the scan-solve orchestrator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::DeviceError;
use crate::recognize::RecognitionError;

/// Failure that ends a session. The orchestrator is the single point
/// that classifies collaborator errors; user-visible messages go through
/// the error panel, diagnostic detail goes to the logs.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The frame source could not start; the loop is never entered.
    #[error("camera unavailable: {0}")]
    Device(#[from] DeviceError),

    /// Unexpected failure inside the loop; the session is abandoned
    /// without an outcome record.
    #[error("scan pipeline failure: {0}")]
    Unexpected(#[from] RecognitionError),
}

/// Lifecycle states of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Starting,
    Looping,
    Succeeded,
    Cancelled,
    Failed,
}

impl SessionState {
    /// Returns the string representation for logs and status responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Looping => "looping",
            SessionState::Succeeded => "succeeded",
            SessionState::Cancelled => "cancelled",
            SessionState::Failed => "failed",
        }
    }
}

/// How the most recent session ended. Terminal states flow back to
/// [`SessionState::Idle`] once cleanup runs, so observers read the end
/// cause from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    /// A unique solution was found and rendered.
    Succeeded,
    /// The user cancelled at an iteration boundary.
    Cancelled,
    /// A device or pipeline failure ended the session; no outcome record.
    Failed,
    /// The frame source dried up mid-session; silent termination, no
    /// outcome record.
    SourceStopped,
}

impl SessionEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEnd::Succeeded => "succeeded",
            SessionEnd::Cancelled => "cancelled",
            SessionEnd::Failed => "failed",
            SessionEnd::SourceStopped => "source_stopped",
        }
    }
}

/// Classification of one loop iteration, used for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No grid visible; the normal steady-state of scanning.
    NoGrid,
    /// Fewer than the minimum clue count; solver not invoked.
    TooFewClues,
    /// Recognized digits violate row/column/box uniqueness; solver not
    /// invoked.
    ConstraintViolation,
    /// Solver reported zero or multiple solutions.
    NoUniqueSolution,
    /// Exactly one solution; the session ends with it.
    Solved,
}

impl FrameOutcome {
    /// Metrics label for the outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameOutcome::NoGrid => "no_grid",
            FrameOutcome::TooFewClues => "too_few_clues",
            FrameOutcome::ConstraintViolation => "constraint_violation",
            FrameOutcome::NoUniqueSolution => "no_unique_solution",
            FrameOutcome::Solved => "solved",
        }
    }
}

/// Current status of the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorStatus {
    /// Live state of the current (or absent) session.
    pub state: SessionState,
    /// Frames processed by the current session so far.
    pub frames_processed: u64,
    /// How the most recent session ended, if any has ended yet.
    pub last_end: Option<SessionEnd>,
}

impl Default for OrchestratorStatus {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            frames_processed: 0,
            last_end: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_as_str() {
        assert_eq!(SessionState::Idle.as_str(), "idle");
        assert_eq!(SessionState::Starting.as_str(), "starting");
        assert_eq!(SessionState::Looping.as_str(), "looping");
        assert_eq!(SessionState::Succeeded.as_str(), "succeeded");
        assert_eq!(SessionState::Cancelled.as_str(), "cancelled");
        assert_eq!(SessionState::Failed.as_str(), "failed");
    }

    #[test]
    fn test_frame_outcome_labels() {
        assert_eq!(FrameOutcome::NoGrid.as_str(), "no_grid");
        assert_eq!(FrameOutcome::TooFewClues.as_str(), "too_few_clues");
        assert_eq!(
            FrameOutcome::ConstraintViolation.as_str(),
            "constraint_violation"
        );
        assert_eq!(FrameOutcome::NoUniqueSolution.as_str(), "no_unique_solution");
        assert_eq!(FrameOutcome::Solved.as_str(), "solved");
    }

    #[test]
    fn test_status_serialization() {
        let status = OrchestratorStatus {
            state: SessionState::Looping,
            frames_processed: 12,
            last_end: Some(SessionEnd::Cancelled),
        };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"state\":\"looping\""));
        assert!(json.contains("\"last_end\":\"cancelled\""));
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::Device(DeviceError::PermissionDenied("denied".into()));
        assert_eq!(
            err.to_string(),
            "camera unavailable: camera permission denied: denied"
        );
    }
}
