//! Session telemetry: per-frame timing marks and best-effort outcome
//! upload. Nothing here may block the scan loop or surface a failure to
//! the user.

mod recorder;
mod transport;
mod types;

pub use recorder::{SessionRecorder, MARK_LOG_CAPACITY};
pub use transport::{create_transport, HttpTransport, NoopTransport};
pub use types::*;
