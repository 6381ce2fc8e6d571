//! Mock display and error panel for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::display::{Display, ErrorPanel, ViewMode};
use crate::sudoku::{Puzzle, Solution};

/// Mock implementation of the [`Display`] trait.
///
/// Records every mode transition, the rendered solution and the cancel
/// control state; [`MockDisplay::press_cancel`] acts as the user hitting
/// the cancel affordance.
pub struct MockDisplay {
    mode: RwLock<ViewMode>,
    transitions: Mutex<Vec<ViewMode>>,
    cancel_token: RwLock<Option<CancellationToken>>,
    rendered: RwLock<Option<(Puzzle, Solution)>>,
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            mode: RwLock::new(ViewMode::Instructions),
            transitions: Mutex::new(Vec::new()),
            cancel_token: RwLock::new(None),
            rendered: RwLock::new(None),
        }
    }

    /// The currently active view.
    pub async fn mode(&self) -> ViewMode {
        *self.mode.read().await
    }

    /// All mode transitions observed, in order.
    pub fn transitions(&self) -> Vec<ViewMode> {
        self.transitions.lock().unwrap().clone()
    }

    /// Whether the cancel affordance is currently attached.
    pub async fn cancel_visible(&self) -> bool {
        self.cancel_token.read().await.is_some()
    }

    /// Simulate the user pressing the cancel control. Returns false when
    /// no control is attached.
    pub async fn press_cancel(&self) -> bool {
        match self.cancel_token.read().await.as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// The last rendered puzzle and solution, if any.
    pub async fn rendered(&self) -> Option<(Puzzle, Solution)> {
        self.rendered.read().await.clone()
    }
}

#[async_trait]
impl Display for MockDisplay {
    async fn set_mode(&self, mode: ViewMode) {
        *self.mode.write().await = mode;
        self.transitions.lock().unwrap().push(mode);
    }

    async fn show_cancel_control(&self, cancel: CancellationToken) {
        let mut token = self.cancel_token.write().await;
        assert!(
            token.is_none(),
            "cancel control attached while another is live"
        );
        *token = Some(cancel);
    }

    async fn hide_cancel_control(&self) {
        *self.cancel_token.write().await = None;
    }

    async fn render_solution(&self, givens: &Puzzle, solution: &Solution) {
        *self.rendered.write().await = Some((givens.clone(), solution.clone()));
    }
}

/// Mock implementation of the [`ErrorPanel`] trait.
#[derive(Default)]
pub struct MockErrorPanel {
    messages: Mutex<Vec<String>>,
    visible: AtomicBool,
}

impl MockErrorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages shown so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Whether the panel is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ErrorPanel for MockErrorPanel {
    async fn show(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
        self.visible.store(true, Ordering::SeqCst);
    }

    async fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transitions_are_recorded() {
        let display = MockDisplay::new();
        display.set_mode(ViewMode::Video).await;
        display.set_mode(ViewMode::Solution).await;

        assert_eq!(display.mode().await, ViewMode::Solution);
        assert_eq!(
            display.transitions(),
            vec![ViewMode::Video, ViewMode::Solution]
        );
    }

    #[tokio::test]
    async fn test_press_cancel_fires_token() {
        let display = MockDisplay::new();
        let token = CancellationToken::new();
        display.show_cancel_control(token.clone()).await;

        assert!(display.press_cancel().await);
        assert!(token.is_cancelled());

        display.hide_cancel_control().await;
        assert!(!display.press_cancel().await);
    }

    #[tokio::test]
    async fn test_error_panel_visibility() {
        let panel = MockErrorPanel::new();
        assert!(!panel.is_visible());

        panel.show("camera unavailable").await;
        assert!(panel.is_visible());
        assert_eq!(panel.messages(), vec!["camera unavailable".to_string()]);

        panel.hide().await;
        assert!(!panel.is_visible());
    }
}
