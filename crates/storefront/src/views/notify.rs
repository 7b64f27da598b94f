//! Blocking user notifications.
//!
//! Cart mutations report their outcome through a [`Notifier`] rather than
//! inline view state. The notification must be acknowledged before the user
//! continues, so implementations are synchronous.

use std::sync::{Mutex, PoisonError};

use tracing::info;

/// Presents a message the user has to acknowledge.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Writes notifications to the log. Used when no interactive surface exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        info!(notification = %message, "Notify");
    }
}

/// Keeps every notification in order, for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_recording_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify("first");
        notifier.notify("second");
        assert_eq!(notifier.messages(), ["first", "second"]);
    }

    #[test]
    fn test_notifiers_are_object_safe() {
        let notifiers: Vec<Arc<dyn Notifier>> =
            vec![Arc::new(TracingNotifier), Arc::new(RecordingNotifier::new())];
        for notifier in &notifiers {
            notifier.notify("hello");
        }
    }
}
