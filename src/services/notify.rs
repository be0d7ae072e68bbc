//! Collaborator contract for the transient toast subsystem.

use tracing::{error, info};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Fire-and-forget notification sink; no return value is consumed.
///
/// Only transport-level failures and successes go through here. Field-level
/// validation messages are rendered inline next to the field and never reach
/// the notifier.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, title: &str, description: &str);
}

/// Notifier for the terminal front end: renders toasts as log lines.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, title: &str, description: &str) {
        match severity {
            Severity::Success => info!(title, description, "notification"),
            Severity::Error => error!(title, description, "notification"),
        }
    }
}
