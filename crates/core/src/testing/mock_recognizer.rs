//! Mock grid recognizer for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::frame::Frame;
use crate::recognize::{
    GridRecognizer, OverlayOptions, OverlaySurface, RecognitionError, ScanResult,
};
use crate::sudoku::DigitPredictions;

/// One scripted recognition outcome.
enum ScriptedScan {
    NoGrid,
    Grid(DigitPredictions),
    Error(String),
}

/// Mock implementation of the [`GridRecognizer`] trait.
///
/// Outcomes are scripted per call and consumed in order; when the script
/// is exhausted every further frame reads as "no grid visible", which is
/// the recognizer's normal steady-state anyway.
#[derive(Default)]
pub struct MockRecognizer {
    script: Mutex<VecDeque<ScriptedScan>>,
    calls: AtomicU64,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a frame with no grid visible.
    pub fn push_no_grid(&self) {
        self.script.lock().unwrap().push_back(ScriptedScan::NoGrid);
    }

    /// Script a recognized grid.
    pub fn push_grid(&self, predictions: DigitPredictions) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedScan::Grid(predictions));
    }

    /// Script `count` copies of the same recognized grid.
    pub fn push_grid_repeated(&self, predictions: DigitPredictions, count: usize) {
        let mut script = self.script.lock().unwrap();
        for _ in 0..count {
            script.push_back(ScriptedScan::Grid(predictions.clone()));
        }
    }

    /// Script an unexpected recognition failure.
    pub fn push_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedScan::Error(message.into()));
    }

    /// Number of `recognize` calls observed.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GridRecognizer for MockRecognizer {
    async fn recognize(
        &self,
        _frame: &Frame,
        _overlay: &dyn OverlaySurface,
        _options: &OverlayOptions,
    ) -> Result<ScanResult, RecognitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            None | Some(ScriptedScan::NoGrid) => Ok(ScanResult::NoGrid),
            Some(ScriptedScan::Grid(predictions)) => Ok(ScanResult::Grid(predictions)),
            Some(ScriptedScan::Error(message)) => Err(RecognitionError::Detector(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::frame::CapturedImage;
    use crate::recognize::NullOverlay;
    use crate::testing::fixtures;

    fn frame() -> Frame {
        Frame {
            index: 0,
            captured_at: Utc::now(),
            image: CapturedImage {
                width: 1,
                height: 1,
                pixels: vec![0],
            },
        }
    }

    #[tokio::test]
    async fn test_script_is_consumed_in_order() {
        let recognizer = MockRecognizer::new();
        recognizer.push_grid(fixtures::classic_predictions());
        recognizer.push_error("camera glitch");

        let first = recognizer
            .recognize(&frame(), &NullOverlay, &OverlayOptions::default())
            .await
            .unwrap();
        assert!(matches!(first, ScanResult::Grid(_)));

        let second = recognizer
            .recognize(&frame(), &NullOverlay, &OverlayOptions::default())
            .await;
        assert!(second.is_err());

        // Exhausted script reads as no grid.
        let third = recognizer
            .recognize(&frame(), &NullOverlay, &OverlayOptions::default())
            .await
            .unwrap();
        assert!(matches!(third, ScanResult::NoGrid));
        assert_eq!(recognizer.calls(), 3);
    }
}
