//! View-mode contract for the user-facing surface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::sudoku::{Puzzle, Solution};

/// The mutually exclusive views. Exactly one is active at any time;
/// transitions are issued only by the orchestrator (or its cancellation
/// cleanup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Landing view with usage instructions.
    Instructions,
    /// Live camera preview while scanning.
    Video,
    /// Rendered solution after a successful scan.
    Solution,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Instructions => "instructions",
            ViewMode::Video => "video",
            ViewMode::Solution => "solution",
        }
    }
}

/// Contract for the display surface.
///
/// Rendering failures are not part of the orchestration error taxonomy,
/// so these methods are infallible; implementations deal with their own
/// surface internally.
#[async_trait]
pub trait Display: Send + Sync {
    /// Switch the single active view, tearing the previous view down
    /// before the new one is shown.
    async fn set_mode(&self, mode: ViewMode);

    /// Attach the single cancellation affordance, wired to this token.
    /// At most one control with one token is live at a time.
    async fn show_cancel_control(&self, cancel: CancellationToken);

    /// Detach the cancellation affordance.
    async fn hide_cancel_control(&self);

    /// Paint the given clues and the derived cells distinguishably.
    async fn render_solution(&self, givens: &Puzzle, solution: &Solution);
}

/// Contract for the panel that surfaces unexpected failures to the user.
/// Only the orchestrator invokes it, with human-readable messages;
/// diagnostic detail goes to the logs instead.
#[async_trait]
pub trait ErrorPanel: Send + Sync {
    async fn show(&self, message: &str);
    async fn hide(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_as_str() {
        assert_eq!(ViewMode::Instructions.as_str(), "instructions");
        assert_eq!(ViewMode::Video.as_str(), "video");
        assert_eq!(ViewMode::Solution.as_str(), "solution");
    }

    #[test]
    fn test_view_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&ViewMode::Solution).unwrap(),
            "\"solution\""
        );
        let parsed: ViewMode = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(parsed, ViewMode::Video);
    }
}
