//! Recognition adapter composing detection and classification.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::frame::Frame;
use crate::sudoku::DigitPredictions;

use super::types::{
    DigitClassifier, GridDetector, GridRecognizer, OverlayOptions, OverlaySurface,
    RecognitionError, ScanResult,
};

/// Wraps grid detection and digit classification into the single call
/// the scan loop drives, drawing any enabled debug overlays in between.
pub struct Recognizer {
    detector: Arc<dyn GridDetector>,
    classifier: Arc<dyn DigitClassifier>,
}

impl Recognizer {
    pub fn new(detector: Arc<dyn GridDetector>, classifier: Arc<dyn DigitClassifier>) -> Self {
        Self {
            detector,
            classifier,
        }
    }
}

#[async_trait]
impl GridRecognizer for Recognizer {
    async fn recognize(
        &self,
        frame: &Frame,
        overlay: &dyn OverlaySurface,
        options: &OverlayOptions,
    ) -> Result<ScanResult, RecognitionError> {
        let Some(detection) = self.detector.detect(frame).await? else {
            return Ok(ScanResult::NoGrid);
        };

        if options.contour {
            overlay.draw_contour(&detection.contour);
        }
        if options.corners {
            overlay.draw_corners(&detection.corners);
        }
        if options.bounding_box {
            overlay.draw_bounding_box(&detection.bounding_box);
        }
        if options.grid_squares {
            overlay.draw_grid_squares(&detection.cell_boxes);
        }

        let cells = self.classifier.classify_cells(&detection.cells).await?;
        let predictions = DigitPredictions::from_cells(cells)?;

        debug!(
            frame = frame.index,
            clues = predictions.clue_count(),
            detector = self.detector.name(),
            classifier = self.classifier.name(),
            "grid recognized"
        );
        Ok(ScanResult::Grid(predictions))
    }
}
