//! Optional usage tracking.
//!
//! The web UI this client replaces reported button clicks through a global
//! analytics hook. Here tracking is an injected capability: components
//! receive a [`Tracker`] and call [`Tracker::track`] with an event name and
//! a flat list of properties. The default implementation does nothing.

use std::sync::Arc;

use tracing::debug;

/// Event fired when a chat message is sent.
pub const EVENT_MESSAGE_SENT: &str = "message_sent";
/// Event fired when the PDP form is submitted.
pub const EVENT_PDP_SUBMITTED: &str = "pdp_submitted";
/// Event fired when feedback is sent.
pub const EVENT_FEEDBACK_SENT: &str = "feedback_sent";

/// Usage tracking capability.
pub trait Tracker: Send + Sync {
    /// Record an event with optional properties.
    fn track(&self, event: &str, props: &[(&str, &str)]);
}

/// Tracker that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn track(&self, _event: &str, _props: &[(&str, &str)]) {}
}

/// Tracker that emits events to the tracing subscriber at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracker;

impl Tracker for LogTracker {
    fn track(&self, event: &str, props: &[(&str, &str)]) {
        debug!(event, ?props, "track");
    }
}

/// Shared tracker handle.
pub type SharedTracker = Arc<dyn Tracker>;

/// Convenience constructor for the default no-op tracker.
pub fn noop_tracker() -> SharedTracker {
    Arc::new(NoopTracker)
}
