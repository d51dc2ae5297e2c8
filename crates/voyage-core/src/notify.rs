//! # Notifications
//!
//! Sink for human-readable progress messages, such as the notice that a
//! search ran out of time. The engine posts messages and carries on; it never
//! depends on what the sink does with them.

/// Receives human-readable search messages.
pub trait Notifier {
    /// Deliver one message.
    fn notify(&self, message: &str);
}

/// Emits every message as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "voyage::notify", "{message}");
    }
}

impl<F: Fn(&str)> Notifier for F {
    fn notify(&self, message: &str) {
        self(message)
    }
}
