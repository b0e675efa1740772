use crate::error::{AnnalError, Result};
use crate::event::{Event, EventId};
use crate::filter::EventFilter;
use crate::observe;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Instant;

/// Counters describing the store at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of events currently held.
    pub event_count: u64,

    /// Id the next stored event will receive.
    pub next_event_id: EventId,

    /// Incremented by every clear; starts at 1.
    pub generation: u64,
}

#[derive(Debug)]
struct StoreInner {
    events: Vec<Event>,
    next_id: EventId,
    generation: u64,
}

/// Append-only, in-memory event store.
///
/// All access goes through a single mutex, so event order is the order in
/// which appends acquired the lock and assigned ids are gapless within a
/// generation. Queries hand back clones; holders of a returned [`Event`]
/// can never alter what the store remembers.
pub struct EventStore {
    inner: Mutex<StoreInner>,
}

impl EventStore {
    /// Create an empty store. Ids start at 1, generation at 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                events: Vec::new(),
                next_id: 1,
                generation: 1,
            }),
        }
    }

    /// Validate and append a new event, returning the stored copy.
    ///
    /// `event_type` and `message` are trimmed and must be non-empty
    /// afterwards. `metadata` must be a JSON object when supplied; `None`
    /// stores an empty object. The id and RFC 3339 timestamp are assigned
    /// here, never by the caller. Nothing is stored when validation fails.
    pub fn create(
        &self,
        event_type: &str,
        message: &str,
        metadata: Option<Value>,
    ) -> Result<Event> {
        let started = Instant::now();

        let event_type = event_type.trim();
        if event_type.is_empty() {
            return Err(AnnalError::Validation(
                "Event type cannot be empty".to_string(),
            ));
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(AnnalError::Validation(
                "Event message cannot be empty".to_string(),
            ));
        }
        let metadata = normalize_metadata(metadata)?;

        let mut inner = self.inner.lock();
        let event = Event {
            id: inner.next_id,
            event_type: event_type.to_string(),
            message: message.to_string(),
            metadata,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        inner.next_id += 1;
        inner.events.push(event.clone());
        drop(inner);

        observe::record_append(started.elapsed());
        tracing::debug!("Stored event {} ({})", event.id, event.event_type);
        Ok(event)
    }

    /// Fetch events in insertion order, optionally restricted to one exact
    /// event type.
    ///
    /// The filter string is trimmed; a filter that trims to empty is
    /// rejected rather than silently matching everything.
    pub fn query(&self, type_filter: Option<&str>) -> Result<Vec<Event>> {
        self.query_filtered(&parse_type_filter(type_filter)?)
    }

    /// Fetch events in insertion order matching an [`EventFilter`].
    pub fn query_filtered(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let inner = self.inner.lock();
        let events: Vec<Event> = inner
            .events
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect();
        drop(inner);

        observe::record_query(events.len());
        Ok(events)
    }

    /// Count events, optionally restricted to one exact event type.
    pub fn count(&self, type_filter: Option<&str>) -> Result<usize> {
        self.count_filtered(&parse_type_filter(type_filter)?)
    }

    /// Count events matching an [`EventFilter`] without cloning them.
    pub fn count_filtered(&self, filter: &EventFilter) -> Result<usize> {
        let inner = self.inner.lock();
        Ok(inner.events.iter().filter(|e| filter.matches(e)).count())
    }

    /// Fetch a single event by id.
    ///
    /// Returns [`AnnalError::NotFound`] when no event has the id, including
    /// after a clear has discarded it.
    pub fn get_by_id(&self, id: EventId) -> Result<Event> {
        if id == 0 {
            return Err(AnnalError::Validation(
                "Event id must be a positive integer".to_string(),
            ));
        }
        let inner = self.inner.lock();
        inner
            .events
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or_else(|| AnnalError::NotFound(format!("Event {} not found", id)))
    }

    /// Discard every event, reset the id counter to 1, and start a new
    /// generation. Returns how many events were removed.
    pub fn clear_all(&self) -> Result<usize> {
        let mut inner = self.inner.lock();
        let removed = inner.events.len();
        inner.events.clear();
        inner.next_id = 1;
        inner.generation += 1;
        let generation = inner.generation;
        drop(inner);

        observe::record_clear(removed);
        tracing::info!(
            "Cleared {} events, id counter reset (generation {})",
            removed,
            generation
        );
        Ok(removed)
    }

    /// Snapshot of the store counters.
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        StoreStats {
            event_count: inner.events.len() as u64,
            next_event_id: inner.next_id,
            generation: inner.generation,
        }
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_type_filter(type_filter: Option<&str>) -> Result<EventFilter> {
    match type_filter {
        None => Ok(EventFilter::All),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(AnnalError::Validation(
                    "Event type filter cannot be empty".to_string(),
                ));
            }
            Ok(EventFilter::exact(trimmed))
        }
    }
}

fn normalize_metadata(metadata: Option<Value>) -> Result<Map<String, Value>> {
    match metadata {
        None => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(AnnalError::Validation(format!(
            "Event metadata must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
