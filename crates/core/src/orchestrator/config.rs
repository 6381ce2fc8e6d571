//! Scan loop configuration.

use serde::{Deserialize, Serialize};

use crate::recognize::OverlayOptions;

/// Configuration for the scan-solve orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Scheduler tick driving the loop, milliseconds per frame.
    /// One full iteration runs per tick; the loop yields in between.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Log and export the observed loop rate once a second.
    #[serde(default)]
    pub fps_counter: bool,

    /// Debug overlay toggles passed to the recognizer. Presentation
    /// only; they never change gate behavior.
    #[serde(default)]
    pub overlay: OverlayOptions,
}

fn default_tick_interval() -> u64 {
    33 // ~30 fps
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            fps_counter: false,
            overlay: OverlayOptions::default(),
        }
    }
}
