//! Scan-solve orchestrator implementation.
//!
//! Drives one session at a time through the state machine:
//! `Idle -> Starting -> Looping -> (Succeeded | Cancelled | Failed) -> Idle`
//!
//! Each `Looping` iteration runs the capture-recognize-validate-solve
//! pipeline once, then yields to the scheduler. Cancellation is a
//! cooperative token observed only at iteration boundaries.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::display::{Display, ErrorPanel, ViewMode};
use crate::frame::{Frame, FrameSource, Snapshot};
use crate::metrics;
use crate::recognize::{GridRecognizer, OverlaySurface, ScanResult};
use crate::sudoku::{satisfies_constraints, to_puzzle, Solution, SudokuSolver, MIN_CLUES};
use crate::telemetry::{FrameMarks, SessionOutcome, SessionRecorder, TelemetryTransport};

use super::config::OrchestratorConfig;
use super::fps::FpsCounter;
use super::types::{FrameOutcome, OrchestratorStatus, SessionEnd, SessionError, SessionState};

/// Solutions requested per solve. A cap of 2 is enough to tell "exactly
/// one" apart from both "none" and "more than one" without enumerating
/// further.
const SOLUTION_PROBE_CAP: usize = 2;

/// How one loop iteration resolves.
enum IterationEnd {
    /// Nothing conclusive; capture the next frame.
    Continue,
    /// The user cancelled at the iteration boundary.
    Cancelled,
    /// The frame source dried up; end the session silently.
    SourceStopped,
    /// Exactly one solution was found and rendered.
    Solved {
        snapshot: Snapshot,
        solution: Solution,
    },
    /// Unexpected failure; the session is abandoned.
    Failed(SessionError),
}

/// What a scanned frame amounted to.
enum ScanStep {
    Rejected(FrameOutcome),
    Solved {
        snapshot: Snapshot,
        solution: Solution,
    },
}

/// The scan-solve orchestrator: drives camera frames through
/// recognition, the validity gates and the solver until one frame yields
/// a unique solution, the user cancels, or something breaks.
pub struct ScanOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    config: OrchestratorConfig,
    frame_source: Arc<dyn FrameSource>,
    recognizer: Arc<dyn GridRecognizer>,
    solver: Arc<dyn SudokuSolver>,
    display: Arc<dyn Display>,
    error_panel: Arc<dyn ErrorPanel>,
    overlay: Arc<dyn OverlaySurface>,
    transport: Arc<dyn TelemetryTransport>,

    // Runtime state
    active: AtomicBool,
    state: RwLock<SessionState>,
    frames: AtomicU64,
    last_end: RwLock<Option<SessionEnd>>,
    cancel: RwLock<Option<CancellationToken>>,
}

impl ScanOrchestrator {
    /// Create a new orchestrator over its collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: OrchestratorConfig,
        frame_source: Arc<dyn FrameSource>,
        recognizer: Arc<dyn GridRecognizer>,
        solver: Arc<dyn SudokuSolver>,
        display: Arc<dyn Display>,
        error_panel: Arc<dyn ErrorPanel>,
        overlay: Arc<dyn OverlaySurface>,
        transport: Arc<dyn TelemetryTransport>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                frame_source,
                recognizer,
                solver,
                display,
                error_panel,
                overlay,
                transport,
                active: AtomicBool::new(false),
                state: RwLock::new(SessionState::Idle),
                frames: AtomicU64::new(0),
                last_end: RwLock::new(None),
                cancel: RwLock::new(None),
            }),
        }
    }

    /// Start a scan session (spawns the session task).
    ///
    /// Starting while a session is already active is a no-op notice, not
    /// an error; exactly one session runs at a time.
    pub async fn start(&self) {
        if self.inner.active.swap(true, Ordering::SeqCst) {
            info!("scan session already active, ignoring start");
            return;
        }

        let cancel = CancellationToken::new();
        *self.inner.cancel.write().await = Some(cancel.clone());
        *self.inner.last_end.write().await = None;
        self.inner.frames.store(0, Ordering::SeqCst);

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.run_session(cancel).await;
        });
    }

    /// Request cancellation of the active session. Observed at the next
    /// iteration boundary; in-flight recognition/solve calls are not
    /// interrupted.
    pub async fn cancel(&self) {
        if let Some(token) = self.inner.cancel.read().await.as_ref() {
            info!("scan session cancellation requested");
            token.cancel();
        }
    }

    /// Whether a session is currently active.
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Get current orchestrator status.
    pub async fn status(&self) -> OrchestratorStatus {
        OrchestratorStatus {
            state: *self.inner.state.read().await,
            frames_processed: self.inner.frames.load(Ordering::Relaxed),
            last_end: *self.inner.last_end.read().await,
        }
    }
}

impl Inner {
    async fn set_state(&self, state: SessionState) {
        *self.state.write().await = state;
    }

    /// One full session, from `Starting` through exit cleanup.
    async fn run_session(&self, cancel: CancellationToken) {
        self.set_state(SessionState::Starting).await;
        self.error_panel.hide().await;

        if let Err(e) = self.frame_source.start().await {
            let err = SessionError::Device(e);
            error!(error = %err, "failed to start frame source");
            self.set_state(SessionState::Failed).await;
            metrics::SESSIONS_TOTAL.with_label_values(&["failed"]).inc();
            self.error_panel
                .show(&format!("Could not start the camera: {err}"))
                .await;
            self.finish(SessionEnd::Failed).await;
            return;
        }

        let mut recorder = SessionRecorder::begin(Arc::clone(&self.transport));
        self.display.set_mode(ViewMode::Video).await;
        self.display.show_cancel_control(cancel.clone()).await;
        let mut fps = self.config.fps_counter.then(FpsCounter::new);

        self.set_state(SessionState::Looping).await;

        let mut ticker =
            tokio::time::interval(Duration::from_millis(self.config.tick_interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let exit = loop {
            // Iterations are strictly sequential. Cancellation is
            // observed here, at the boundary, never mid-iteration.
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break IterationEnd::Cancelled,
                _ = ticker.tick() => {}
            }

            match self.run_iteration(&mut recorder).await {
                IterationEnd::Continue => {
                    if let Some(fps) = fps.as_mut() {
                        fps.tick();
                    }
                }
                end => break end,
            }
        };

        // Exit cleanup: every path releases the same resources.
        self.display.hide_cancel_control().await;
        self.frame_source.stop().await;
        if fps.take().is_some() {
            metrics::CAMERA_FPS.set(0.0);
        }

        match exit {
            IterationEnd::Solved { snapshot, solution } => {
                self.set_state(SessionState::Succeeded).await;
                info!(session = %recorder.session_id(), "scan session succeeded");
                recorder.persist(SessionOutcome::Completed, Some(snapshot), Some(solution));
                // The solution view stays up after success.
                self.finish(SessionEnd::Succeeded).await;
            }
            IterationEnd::Cancelled => {
                self.set_state(SessionState::Cancelled).await;
                info!(session = %recorder.session_id(), "scan session cancelled");
                recorder.persist(SessionOutcome::Cancelled, None, None);
                self.display.set_mode(ViewMode::Instructions).await;
                self.finish(SessionEnd::Cancelled).await;
            }
            IterationEnd::SourceStopped => {
                info!(
                    session = %recorder.session_id(),
                    "frame source stopped, ending session without outcome"
                );
                drop(recorder);
                self.display.set_mode(ViewMode::Instructions).await;
                self.finish(SessionEnd::SourceStopped).await;
            }
            IterationEnd::Failed(err) => {
                self.set_state(SessionState::Failed).await;
                error!(session = %recorder.session_id(), error = %err, "scan session failed");
                metrics::SESSIONS_TOTAL.with_label_values(&["failed"]).inc();
                // Abandoned: no completed/cancelled record for this session.
                drop(recorder);
                self.error_panel
                    .show(&format!("Scanning failed: {err}"))
                    .await;
                self.display.set_mode(ViewMode::Instructions).await;
                self.finish(SessionEnd::Failed).await;
            }
            IterationEnd::Continue => unreachable!("loop only breaks on terminal ends"),
        }
    }

    /// Record the end cause and hand the orchestrator back to `Idle`.
    /// The end cause is published last, so an observer that sees it sees
    /// a fully settled orchestrator.
    async fn finish(&self, end: SessionEnd) {
        *self.cancel.write().await = None;
        self.set_state(SessionState::Idle).await;
        self.active.store(false, Ordering::SeqCst);
        *self.last_end.write().await = Some(end);
    }

    /// One loop iteration: capture, scan, gate, solve.
    async fn run_iteration(&self, recorder: &mut SessionRecorder) -> IterationEnd {
        let started = Instant::now();
        let mut marks = FrameMarks::begin(recorder.frame_count());

        let Some(frame) = self.frame_source.capture_frame().await else {
            return IterationEnd::SourceStopped;
        };
        marks.mark("captured");

        let (outcome, end) = match self.scan_frame(frame, &mut marks).await {
            Ok(ScanStep::Rejected(outcome)) => (Some(outcome), None),
            Ok(ScanStep::Solved { snapshot, solution }) => (
                Some(FrameOutcome::Solved),
                Some(IterationEnd::Solved { snapshot, solution }),
            ),
            Err(err) => (None, Some(IterationEnd::Failed(err))),
        };

        if let Some(outcome) = outcome {
            metrics::FRAMES_PROCESSED
                .with_label_values(&[outcome.as_str()])
                .inc();
            metrics::FRAME_DURATION
                .with_label_values(&[outcome.as_str()])
                .observe(started.elapsed().as_secs_f64());
            debug!(frame = marks.frame, outcome = outcome.as_str(), "frame processed");
        }

        // Whatever the frame amounted to, the marks are logged and the
        // counter advances before the loop yields again.
        recorder.record_frame(marks);
        self.frames.store(recorder.frame_count(), Ordering::Relaxed);

        end.unwrap_or(IterationEnd::Continue)
    }

    /// Run one frame through recognition and the gates. The frame is
    /// released on every path out of here; only the success path copies
    /// pixels, for the display snapshot.
    async fn scan_frame(
        &self,
        frame: Frame,
        marks: &mut FrameMarks,
    ) -> Result<ScanStep, SessionError> {
        let scan = self
            .recognizer
            .recognize(&frame, self.overlay.as_ref(), &self.config.overlay)
            .await?;
        marks.mark("scanned");

        let predictions = match scan {
            ScanResult::NoGrid => return Ok(ScanStep::Rejected(FrameOutcome::NoGrid)),
            ScanResult::Grid(predictions) => predictions,
        };

        let clues = predictions.clue_count();
        if clues < MIN_CLUES {
            // Not enough constraints for a unique solution; wait for a
            // better frame.
            return Ok(ScanStep::Rejected(FrameOutcome::TooFewClues));
        }
        if !satisfies_constraints(&predictions) {
            // At least one digit was misread.
            return Ok(ScanStep::Rejected(FrameOutcome::ConstraintViolation));
        }

        let puzzle = to_puzzle(&predictions);
        let solve_started = Instant::now();
        let mut solutions = self.solver.solve(&puzzle, SOLUTION_PROBE_CAP);
        metrics::SOLVER_DURATION
            .with_label_values(&[])
            .observe(solve_started.elapsed().as_secs_f64());
        marks.mark("solved");

        if solutions.len() != 1 {
            debug!(
                frame = frame.index,
                clues,
                solutions = solutions.len(),
                "grid did not solve uniquely"
            );
            return Ok(ScanStep::Rejected(FrameOutcome::NoUniqueSolution));
        }
        let Some(solution) = solutions.pop() else {
            return Ok(ScanStep::Rejected(FrameOutcome::NoUniqueSolution));
        };

        self.display.set_mode(ViewMode::Solution).await;
        self.display.render_solution(&puzzle, &solution).await;
        marks.mark("drawn");

        let snapshot = frame.snapshot();
        info!(frame = frame.index, clues, "sudoku solved");
        Ok(ScanStep::Solved { snapshot, solution })
    }
}
