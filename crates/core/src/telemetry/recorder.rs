//! Per-session telemetry recorder.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::frame::Snapshot;
use crate::metrics;
use crate::sudoku::Solution;

use super::types::{FrameMarks, SessionOutcome, SessionRecord, TelemetryTransport};

/// Maximum retained mark sets per session; older entries are evicted.
pub const MARK_LOG_CAPACITY: usize = 100;

/// Owns one session's counters and bounded mark log.
///
/// Created by the orchestrator when a session starts and consumed by
/// [`SessionRecorder::persist`] when it ends. Recording never blocks and
/// never fails visibly; persistence runs detached from the loop.
pub struct SessionRecorder {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    frame_count: u64,
    marks: VecDeque<FrameMarks>,
    transport: Arc<dyn TelemetryTransport>,
}

impl SessionRecorder {
    /// Start a fresh session record.
    pub fn begin(transport: Arc<dyn TelemetryTransport>) -> Self {
        let session_id = Uuid::new_v4();
        info!(session = %session_id, "scan session started");
        Self {
            session_id,
            started_at: Utc::now(),
            frame_count: 0,
            marks: VecDeque::with_capacity(MARK_LOG_CAPACITY),
            transport,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Frames recorded so far; doubles as the next frame's index.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Append one iteration's marks and advance the frame counter.
    pub fn record_frame(&mut self, marks: FrameMarks) {
        if self.marks.len() == MARK_LOG_CAPACITY {
            self.marks.pop_front();
        }
        self.marks.push_back(marks);
        self.frame_count += 1;
    }

    /// Persist the session outcome on a detached task.
    ///
    /// The orchestrator never awaits the upload; a failure is logged and
    /// otherwise ignored, and the upload may still be in flight when the
    /// next session starts.
    pub fn persist(self, outcome: SessionOutcome, snapshot: Option<Snapshot>, solution: Option<Solution>) {
        let finished_at = Utc::now();
        let duration_ms = (finished_at - self.started_at).num_milliseconds().max(0) as u64;
        let record = SessionRecord {
            session_id: self.session_id,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: self.started_at,
            finished_at,
            outcome,
            duration_ms,
            frame_count: self.frame_count,
            marks: self.marks.into_iter().collect(),
            snapshot,
            solution,
        };

        metrics::SESSIONS_TOTAL
            .with_label_values(&[outcome.as_str()])
            .inc();
        metrics::SESSION_DURATION
            .with_label_values(&[outcome.as_str()])
            .observe(duration_ms as f64 / 1000.0);

        let transport = self.transport;
        tokio::spawn(async move {
            match transport.upload(&record).await {
                Ok(()) => {
                    debug!(session = %record.session_id, "session telemetry uploaded");
                    metrics::TELEMETRY_UPLOADS.with_label_values(&["success"]).inc();
                }
                Err(e) => {
                    warn!(session = %record.session_id, error = %e, "session telemetry upload failed");
                    metrics::TELEMETRY_UPLOADS.with_label_values(&["error"]).inc();
                }
            }
        });
    }
}
