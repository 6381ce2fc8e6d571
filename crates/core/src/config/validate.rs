use super::{types::Config, ConfigError};

/// Validate configuration values that serde defaults cannot catch.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.orchestrator.tick_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "orchestrator.tick_interval_ms must be non-zero".to_string(),
        ));
    }

    if config.telemetry.enabled {
        match config.telemetry.endpoint.as_deref() {
            None | Some("") => {
                return Err(ConfigError::ValidationError(
                    "telemetry.endpoint is required when telemetry is enabled".to_string(),
                ));
            }
            Some(endpoint) => {
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                    return Err(ConfigError::ValidationError(format!(
                        "telemetry.endpoint must be an http(s) URL, got: {endpoint}"
                    )));
                }
            }
        }
        if config.telemetry.upload_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "telemetry.upload_timeout_secs must be non-zero".to_string(),
            ));
        }
    }

    Ok(())
}
