//! Grid recognition.
//!
//! Detection and classification stay behind external-model traits
//! ([`GridDetector`], [`DigitClassifier`]); the [`Recognizer`] adapter
//! composes them into the one call per frame the scan loop makes.

mod adapter;
mod types;

pub use adapter::Recognizer;
pub use types::*;
