//! Recording telemetry transport for testing.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::telemetry::{SessionRecord, TelemetryError, TelemetryTransport};

/// Mock implementation of the [`TelemetryTransport`] trait.
///
/// Records every uploaded session record; uploads can be made to fail to
/// verify telemetry errors never leak into the state machine.
#[derive(Default)]
pub struct RecordingTransport {
    records: Mutex<Vec<SessionRecord>>,
    next_error: RwLock<Option<TelemetryError>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the next upload to fail with the given error.
    pub async fn set_next_error(&self, error: TelemetryError) {
        *self.next_error.write().await = Some(error);
    }

    /// All uploaded records, in order.
    pub fn records(&self) -> Vec<SessionRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of uploaded records.
    pub fn upload_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl TelemetryTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn upload(&self, record: &SessionRecord) -> Result<(), TelemetryError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
