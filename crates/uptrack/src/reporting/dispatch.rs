use std::path::Path;
use tracing::info;

/// Outbound hook invoked after a report file has been written (e.g. an
/// e-mail adapter). Delivery is best-effort.
pub trait DispatchHook: Send + Sync {
    fn send(&self, report: &Path, recipients: &[String]) -> Result<(), DispatchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("dispatch transport unavailable: {0}")]
    Transport(String),
    #[error("recipient rejected: {0}")]
    Rejected(String),
}

/// Default hook: records the dispatch request in the log and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingDispatchHook;

impl DispatchHook for LoggingDispatchHook {
    fn send(&self, report: &Path, recipients: &[String]) -> Result<(), DispatchError> {
        let file = report
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(
            report = %file,
            recipients = recipients.len(),
            "no dispatch transport configured; logging report delivery"
        );
        Ok(())
    }
}
