//! Outbound telemetry transports.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::TelemetryConfig;

use super::types::{SessionRecord, TelemetryError, TelemetryTransport};

/// JSON POST transport for the session record.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TelemetryError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl TelemetryTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn upload(&self, record: &SessionRecord) -> Result<(), TelemetryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| TelemetryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TelemetryError::Rejected(format!(
                "HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Transport used when telemetry is disabled; drops records on the floor.
#[derive(Debug, Default)]
pub struct NoopTransport;

#[async_trait]
impl TelemetryTransport for NoopTransport {
    fn name(&self) -> &str {
        "noop"
    }

    async fn upload(&self, record: &SessionRecord) -> Result<(), TelemetryError> {
        debug!(session = %record.session_id, "telemetry disabled, record dropped");
        Ok(())
    }
}

/// Build the transport selected by configuration.
pub fn create_transport(
    config: &TelemetryConfig,
) -> Result<Arc<dyn TelemetryTransport>, TelemetryError> {
    if !config.enabled {
        return Ok(Arc::new(NoopTransport));
    }
    let endpoint = config
        .endpoint
        .as_deref()
        .ok_or_else(|| TelemetryError::Transport("telemetry enabled without endpoint".into()))?;
    let transport = HttpTransport::new(endpoint, Duration::from_secs(config.upload_timeout_secs))?;
    Ok(Arc::new(transport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::SessionOutcome;
    use chrono::Utc;
    use uuid::Uuid;

    fn test_record() -> SessionRecord {
        SessionRecord {
            session_id: Uuid::new_v4(),
            version: "0.1.0".into(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            outcome: SessionOutcome::Completed,
            duration_ms: 10,
            frame_count: 1,
            marks: vec![],
            snapshot: None,
            solution: None,
        }
    }

    #[tokio::test]
    async fn test_noop_transport_accepts_everything() {
        let transport = NoopTransport;
        assert!(transport.upload(&test_record()).await.is_ok());
    }

    #[test]
    fn test_create_transport_disabled() {
        let config = TelemetryConfig {
            enabled: false,
            endpoint: None,
            upload_timeout_secs: 10,
        };
        let transport = create_transport(&config).unwrap();
        assert_eq!(transport.name(), "noop");
    }

    #[test]
    fn test_create_transport_requires_endpoint() {
        let config = TelemetryConfig {
            enabled: true,
            endpoint: None,
            upload_timeout_secs: 10,
        };
        assert!(create_transport(&config).is_err());
    }

    #[test]
    fn test_create_transport_http() {
        let config = TelemetryConfig {
            enabled: true,
            endpoint: Some("http://localhost:9999/sessions".into()),
            upload_timeout_secs: 10,
        };
        let transport = create_transport(&config).unwrap();
        assert_eq!(transport.name(), "http");
    }
}
