//! Log-only display for headless deployments.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::sudoku::{Puzzle, Solution, GRID_SIZE};

use super::types::{Display, ErrorPanel, ViewMode};

/// Display that only logs transitions and solutions. Useful when the
/// crate runs without a UI surface attached.
pub struct HeadlessDisplay {
    mode: RwLock<ViewMode>,
    cancel: RwLock<Option<CancellationToken>>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self {
            mode: RwLock::new(ViewMode::Instructions),
            cancel: RwLock::new(None),
        }
    }

    /// The currently active view.
    pub async fn mode(&self) -> ViewMode {
        *self.mode.read().await
    }
}

impl Default for HeadlessDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Display for HeadlessDisplay {
    async fn set_mode(&self, mode: ViewMode) {
        let mut current = self.mode.write().await;
        info!(from = current.as_str(), to = mode.as_str(), "view change");
        *current = mode;
    }

    async fn show_cancel_control(&self, cancel: CancellationToken) {
        *self.cancel.write().await = Some(cancel);
    }

    async fn hide_cancel_control(&self) {
        *self.cancel.write().await = None;
    }

    async fn render_solution(&self, givens: &Puzzle, solution: &Solution) {
        for row in 0..GRID_SIZE {
            let line: String = (0..GRID_SIZE)
                .map(|col| {
                    let digit = solution.get(row, col);
                    if givens.get(row, col).is_some() {
                        // Givens in brackets, derived cells bare.
                        format!("[{digit}]")
                    } else {
                        format!(" {digit} ")
                    }
                })
                .collect();
            info!("{line}");
        }
    }
}

/// Error panel that writes to the log instead of a UI surface.
#[derive(Debug, Default)]
pub struct LogErrorPanel;

#[async_trait]
impl ErrorPanel for LogErrorPanel {
    async fn show(&self, message: &str) {
        error!("{message}");
    }

    async fn hide(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mode_tracking() {
        let display = HeadlessDisplay::new();
        assert_eq!(display.mode().await, ViewMode::Instructions);

        display.set_mode(ViewMode::Video).await;
        assert_eq!(display.mode().await, ViewMode::Video);
    }

    #[tokio::test]
    async fn test_cancel_control_holds_one_token() {
        let display = HeadlessDisplay::new();
        let token = CancellationToken::new();

        display.show_cancel_control(token.clone()).await;
        assert!(display.cancel.read().await.is_some());

        display.hide_cancel_control().await;
        assert!(display.cancel.read().await.is_none());
    }
}
