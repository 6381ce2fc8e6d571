//! Display controller contracts and the headless fallback.

mod headless;
mod types;

pub use headless::{HeadlessDisplay, LogErrorPanel};
pub use types::*;
