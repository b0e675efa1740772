use crate::types::{AUDIT_PREFIX, DEFAULT_SEVERITY, DEFAULT_SOURCE};
use annal_core::{AnnalError, Event, EventFilter, EventStore, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Inclusive UTC window, echoed back by time-range queries in normalized
/// RFC 3339 form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Audit events matched by a time-range query, plus the window they were
/// matched against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditWindow {
    pub events: Vec<Event>,
    pub range: TimeRange,
}

/// Records and queries audit events on a shared [`EventStore`].
///
/// The trail owns no storage. It enriches metadata on the way in and
/// narrows queries to the `audit.` namespace on the way out; everything
/// else is the store's behavior, including validation.
#[derive(Clone)]
pub struct AuditTrail {
    store: Arc<EventStore>,
}

impl AuditTrail {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Record an audit event.
    ///
    /// Metadata is enriched before storage: `severity` defaults to `info`,
    /// `source` to `system`, and `auditTimestamp` to the current time.
    /// Caller-supplied keys always win over the defaults. Validation is the
    /// store's; a rejected event is not recorded in any form.
    pub fn record(
        &self,
        event_type: &str,
        message: &str,
        metadata: Option<Value>,
    ) -> Result<Event> {
        let mut merged = Map::new();
        merged.insert(
            "severity".to_string(),
            Value::String(DEFAULT_SEVERITY.to_string()),
        );
        merged.insert(
            "source".to_string(),
            Value::String(DEFAULT_SOURCE.to_string()),
        );
        merged.insert(
            "auditTimestamp".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let metadata = match metadata {
            None => Value::Object(merged),
            Some(Value::Object(extra)) => {
                for (key, value) in extra {
                    merged.insert(key, value);
                }
                Value::Object(merged)
            }
            // Non-object metadata falls through untouched so the store
            // rejects it with its usual validation error.
            Some(other) => other,
        };

        let event = self.store.create(event_type, message, Some(metadata))?;
        tracing::debug!("Recorded audit event {} ({})", event.id, event.event_type);
        Ok(event)
    }

    /// Fetch audit events in insertion order.
    ///
    /// Without a filter, only events in the `audit.` namespace are
    /// returned. With a filter, the match is exact against the full event
    /// type, so any event in the store can be addressed.
    pub fn query(&self, type_filter: Option<&str>) -> Result<Vec<Event>> {
        match type_filter {
            None => self.store.query_filtered(&EventFilter::prefix(AUDIT_PREFIX)),
            Some(filter) => self.store.query(Some(filter)),
        }
    }

    /// Count audit events, with the same filter semantics as [`query`].
    ///
    /// [`query`]: AuditTrail::query
    pub fn count(&self, type_filter: Option<&str>) -> Result<usize> {
        match type_filter {
            None => self.store.count_filtered(&EventFilter::prefix(AUDIT_PREFIX)),
            Some(filter) => self.store.count(Some(filter)),
        }
    }

    /// Fetch `audit.` events whose timestamp falls inside `[start, end]`,
    /// bounds included.
    ///
    /// Both bounds must parse as RFC 3339 and `start` must not be after
    /// `end`. Events whose stored timestamp does not parse are skipped.
    pub fn query_time_range(&self, start: &str, end: &str) -> Result<AuditWindow> {
        let start = parse_bound("start", start)?;
        let end = parse_bound("end", end)?;
        if start > end {
            return Err(AnnalError::Validation(
                "Time range start must not be after end".to_string(),
            ));
        }

        let events: Vec<Event> = self
            .store
            .query_filtered(&EventFilter::prefix(AUDIT_PREFIX))?
            .into_iter()
            .filter(|event| {
                DateTime::parse_from_rfc3339(&event.timestamp)
                    .map(|ts| {
                        let ts = ts.with_timezone(&Utc);
                        ts >= start && ts <= end
                    })
                    .unwrap_or(false)
            })
            .collect();

        Ok(AuditWindow {
            events,
            range: TimeRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            },
        })
    }
}

fn parse_bound(name: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            AnnalError::Validation(format!("Invalid {} timestamp '{}': {}", name, raw, e))
        })
}
