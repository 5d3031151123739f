use chrono::{DateTime, Utc};

/// A change notification.
///
/// Events are immutable facts about something that already happened; they are
/// published after the mutation they describe has completed.
pub trait Event: Clone + core::fmt::Debug + Send + 'static {
    /// Stable event name (e.g. "inventory.record.added").
    fn event_type(&self) -> &'static str;

    /// When the change happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}
