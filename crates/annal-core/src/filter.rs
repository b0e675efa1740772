use crate::event::Event;

/// Filter over stored events, matched against the event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    /// Match all events
    All,

    /// Match events with type prefix
    Prefix(String),

    /// Match exact event type
    Exact(String),
}

impl EventFilter {
    /// Create a prefix filter
    pub fn prefix(prefix: impl Into<String>) -> Self {
        EventFilter::Prefix(prefix.into())
    }

    /// Create an exact match filter
    pub fn exact(event_type: impl Into<String>) -> Self {
        EventFilter::Exact(event_type.into())
    }

    /// Check if event matches filter
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Prefix(prefix) => event.event_type.starts_with(prefix),
            EventFilter::Exact(event_type) => &event.event_type == event_type,
        }
    }
}
