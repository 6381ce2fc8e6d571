//! Session telemetry types.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::frame::Snapshot;
use crate::sudoku::Solution;

/// Errors raised while persisting session metadata. Logged only; never
/// surfaced to the user, never fed back into the state machine.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry endpoint rejected upload: {0}")]
    Rejected(String),

    #[error("telemetry transport failed: {0}")]
    Transport(String),
}

/// How a session ended. Sessions abandoned by failure (or by closing the
/// app mid-loop) never get an outcome record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    Completed,
    Cancelled,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOutcome::Completed => "completed",
            SessionOutcome::Cancelled => "cancelled",
        }
    }
}

/// A named timestamp recorded at a pipeline milestone within one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingMark {
    pub label: String,
    /// Offset from the start of the iteration, milliseconds.
    pub at_ms: f64,
}

/// Timing marks for one loop iteration. A fresh value is created at the
/// top of every iteration, so marks never leak across frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameMarks {
    /// Capture-order frame position within the session.
    pub frame: u64,
    pub marks: Vec<TimingMark>,
    #[serde(skip, default = "Instant::now")]
    started: Instant,
}

impl FrameMarks {
    /// Start timing a new iteration.
    pub fn begin(frame: u64) -> Self {
        Self {
            frame,
            marks: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Record a milestone at the current offset.
    pub fn mark(&mut self, label: &'static str) {
        self.marks.push(TimingMark {
            label: label.to_string(),
            at_ms: self.started.elapsed().as_secs_f64() * 1000.0,
        });
    }
}

/// The JSON-serializable record uploaded once per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: SessionOutcome,
    pub duration_ms: u64,
    pub frame_count: u64,
    /// Most recent mark sets, bounded retention.
    pub marks: Vec<FrameMarks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
}

/// Contract for the outbound telemetry channel: one fire-and-forget call
/// per session.
#[async_trait]
pub trait TelemetryTransport: Send + Sync {
    /// Transport name for logging.
    fn name(&self) -> &str;

    /// Upload the session record. Best-effort; the caller only logs
    /// failures.
    async fn upload(&self, record: &SessionRecord) -> Result<(), TelemetryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&SessionOutcome::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(SessionOutcome::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_marks_are_monotonic() {
        let mut marks = FrameMarks::begin(3);
        marks.mark("captured");
        marks.mark("scanned");

        assert_eq!(marks.frame, 3);
        assert_eq!(marks.marks.len(), 2);
        assert_eq!(marks.marks[0].label, "captured");
        assert!(marks.marks[1].at_ms >= marks.marks[0].at_ms);
    }

    #[test]
    fn test_record_serializes_without_optional_fields() {
        let record = SessionRecord {
            session_id: Uuid::new_v4(),
            version: "0.1.0".to_string(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            outcome: SessionOutcome::Cancelled,
            duration_ms: 1200,
            frame_count: 42,
            marks: vec![],
            snapshot: None,
            solution: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("snapshot"));
        assert!(!json.contains("solution"));
        assert!(json.contains("\"outcome\":\"cancelled\""));
    }
}
