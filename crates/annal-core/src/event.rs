use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Monotonically increasing identifier assigned by the store.
///
/// Ids start at 1 and never repeat within a generation. `0` is reserved
/// and never assigned, so it is safe to use as a sentinel.
pub type EventId = u64;

/// A single immutable fact in the ledger.
///
/// Events are plain data: every field is assigned by [`EventStore::create`]
/// and never mutated afterwards. The JSON form uses `type` for the event
/// type field.
///
/// [`EventStore::create`]: crate::store::EventStore::create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned sequence number.
    pub id: EventId,

    /// Category tag, e.g. `order_created` or `audit.login_attempt`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Human-readable description of the fact.
    pub message: String,

    /// Structured context. Always a JSON object, possibly empty.
    pub metadata: Map<String, Value>,

    /// RFC 3339 timestamp assigned by the store at append time.
    pub timestamp: String,
}

impl Event {
    /// Fetch a metadata value as a string slice, if present and a string.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}
