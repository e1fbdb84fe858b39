//! Error types for widget hosts.

use thiserror::Error;

/// Failures raised by the environment a widget is mounted into.
///
/// Configuration content never produces one of these.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Host unavailable: {0}")]
    Unavailable(String),

    #[error("Host error: {0}")]
    Host(String),
}
