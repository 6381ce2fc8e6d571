use serde::{Deserialize, Serialize};

use crate::orchestrator::OrchestratorConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scan loop settings, including the overlay launch options.
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    /// Session telemetry upload settings.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Settings for the outbound session telemetry channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Enable/disable session uploads. Disabled drops records locally.
    #[serde(default)]
    pub enabled: bool,

    /// Upload endpoint. Required when telemetry is enabled.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Per-upload timeout (seconds).
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_secs: u64,
}

fn default_upload_timeout() -> u64 {
    10
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            upload_timeout_secs: default_upload_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.telemetry.enabled);
        assert!(config.telemetry.endpoint.is_none());
        assert_eq!(config.telemetry.upload_timeout_secs, 10);
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.orchestrator.tick_interval_ms, 33);
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            [orchestrator]
            tick_interval_ms = 50
            fps_counter = true

            [orchestrator.overlay]
            contour = true
            grid_squares = true

            [telemetry]
            enabled = true
            endpoint = "https://telemetry.example.com/sessions"
            upload_timeout_secs = 5
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.orchestrator.tick_interval_ms, 50);
        assert!(config.orchestrator.fps_counter);
        assert!(config.orchestrator.overlay.contour);
        assert!(!config.orchestrator.overlay.corners);
        assert!(config.telemetry.enabled);
        assert_eq!(
            config.telemetry.endpoint.as_deref(),
            Some("https://telemetry.example.com/sessions")
        );
        assert_eq!(config.telemetry.upload_timeout_secs, 5);
    }
}
