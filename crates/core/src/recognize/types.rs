//! Types for grid detection and digit classification.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::Frame;
use crate::sudoku::{DigitPrediction, DigitPredictions, GridError};

/// Errors raised by the recognition pipeline.
///
/// "No grid visible in this frame" is not an error; it is the
/// [`ScanResult::NoGrid`] value and the normal steady-state of scanning.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("grid detection failed: {0}")]
    Detector(String),

    #[error("digit classification failed: {0}")]
    Classifier(String),

    #[error("malformed prediction grid: {0}")]
    MalformedGrid(#[from] GridError),
}

/// A point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned rectangle in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A rectified cell image cut out of the detected grid.
#[derive(Debug, Clone)]
pub struct CellPatch {
    /// Row-major cell index, 0-80.
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Geometry and cell patches for a grid located in a frame.
#[derive(Debug, Clone)]
pub struct GridDetection {
    /// Outline of the grid as found by contour detection.
    pub contour: Vec<Point>,
    /// The four grid corners, clockwise from top-left.
    pub corners: [Point; 4],
    /// Bounding box of the grid on the frame.
    pub bounding_box: Rect,
    /// On-frame geometry of each cell, row-major.
    pub cell_boxes: Vec<Rect>,
    /// Rectified cell patches for classification, row-major.
    pub cells: Vec<CellPatch>,
}

/// Result of running recognition over one frame.
#[derive(Debug)]
pub enum ScanResult {
    /// No grid visible; the loop just moves on to the next frame.
    NoGrid,
    /// A grid was found and classified.
    Grid(DigitPredictions),
}

/// Debug-overlay toggles, carried from the launch options. Pure
/// presentation: they never change what the loop does with a frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OverlayOptions {
    #[serde(default)]
    pub contour: bool,
    #[serde(default)]
    pub corners: bool,
    #[serde(default)]
    pub bounding_box: bool,
    #[serde(default)]
    pub grid_squares: bool,
}

/// Drawing surface for recognition debug overlays.
pub trait OverlaySurface: Send + Sync {
    fn draw_contour(&self, points: &[Point]);
    fn draw_corners(&self, corners: &[Point; 4]);
    fn draw_bounding_box(&self, rect: &Rect);
    fn draw_grid_squares(&self, cells: &[Rect]);
}

/// Overlay surface that draws nothing.
#[derive(Debug, Default)]
pub struct NullOverlay;

impl OverlaySurface for NullOverlay {
    fn draw_contour(&self, _points: &[Point]) {}
    fn draw_corners(&self, _corners: &[Point; 4]) {}
    fn draw_bounding_box(&self, _rect: &Rect) {}
    fn draw_grid_squares(&self, _cells: &[Rect]) {}
}

/// Contract for the grid-detection stage (segmentation and contour
/// detection are external collaborators).
#[async_trait]
pub trait GridDetector: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Locate a sudoku grid in the frame. `Ok(None)` when no grid is
    /// visible. Must be deterministic given the same frame and model.
    async fn detect(&self, frame: &Frame) -> Result<Option<GridDetection>, RecognitionError>;
}

/// Contract for the digit-classification stage (the recognition model is
/// an external collaborator).
#[async_trait]
pub trait DigitClassifier: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Classify rectified cell patches, one output slot per input cell,
    /// `None` for cells judged empty. Must be deterministic given the
    /// same patches and model.
    async fn classify_cells(
        &self,
        cells: &[CellPatch],
    ) -> Result<Vec<Option<DigitPrediction>>, RecognitionError>;
}

/// The single recognition call the scan loop drives.
#[async_trait]
pub trait GridRecognizer: Send + Sync {
    async fn recognize(
        &self,
        frame: &Frame,
        overlay: &dyn OverlaySurface,
        options: &OverlayOptions,
    ) -> Result<ScanResult, RecognitionError>;
}
