use annal_core::{AnnalError, Event, EventStore, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Event type shared by every poll engagement fact; the specific kind
/// lives in metadata under `event_type`.
pub const POLL_ENGAGEMENT: &str = "poll_engagement";

/// Maximum accepted length for poll and user identifiers.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Kind of poll engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    VoteCast,
    VoteChanged,
    VoteRemoved,
}

impl EngagementKind {
    /// The lowercase string stored in event metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementKind::VoteCast => "vote_cast",
            EngagementKind::VoteChanged => "vote_changed",
            EngagementKind::VoteRemoved => "vote_removed",
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A poll engagement fact prior to storage.
///
/// Which choice fields are required depends on the kind: a cast needs the
/// new choice, a change needs both old and new, a removal needs the old.
/// The timestamp is the moment of engagement as the caller saw it; when
/// absent the tracker stamps the current time.
#[derive(Debug, Clone)]
pub struct Engagement {
    pub poll_id: String,
    pub user_id: String,
    pub kind: EngagementKind,
    pub previous_choice: Option<String>,
    pub new_choice: Option<String>,
    pub session_id: Option<String>,
    pub timestamp: Option<String>,
}

impl Engagement {
    pub fn new(
        poll_id: impl Into<String>,
        user_id: impl Into<String>,
        kind: EngagementKind,
    ) -> Self {
        Self {
            poll_id: poll_id.into(),
            user_id: user_id.into(),
            kind,
            previous_choice: None,
            new_choice: None,
            session_id: None,
            timestamp: None,
        }
    }

    pub fn with_previous_choice(mut self, choice: impl Into<String>) -> Self {
        self.previous_choice = Some(choice.into());
        self
    }

    pub fn with_new_choice(mut self, choice: impl Into<String>) -> Self {
        self.new_choice = Some(choice.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Supply the engagement time as an RFC 3339 string.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Equality filters applied to poll engagement events. An empty filter
/// matches every engagement.
#[derive(Debug, Clone, Default)]
pub struct EngagementFilter {
    /// Filter by poll identifier.
    pub poll_id: Option<String>,
    /// Filter by user identifier.
    pub user_id: Option<String>,
    /// Filter by engagement kind.
    pub kind: Option<EngagementKind>,
}

impl EngagementFilter {
    /// Create a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by poll identifier.
    pub fn poll_id(mut self, poll_id: impl Into<String>) -> Self {
        self.poll_id = Some(poll_id.into());
        self
    }

    /// Filter by user identifier.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Filter by engagement kind.
    pub fn kind(mut self, kind: EngagementKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

#[derive(Serialize)]
struct EngagementMeta<'a> {
    event_type: EngagementKind,
    poll_id: &'a str,
    user_id: &'a str,
    previous_choice: Option<&'a str>,
    new_choice: Option<&'a str>,
    session_id: Option<&'a str>,
    timestamp: &'a str,
}

/// Records poll engagement facts on a shared [`EventStore`].
///
/// Every stored event has the `poll_engagement` type; absent optional
/// fields are stored as explicit JSON nulls so the metadata shape is the
/// same for every engagement.
#[derive(Clone)]
pub struct EngagementTracker {
    store: Arc<EventStore>,
}

impl EngagementTracker {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Validate and record one engagement, returning the stored event.
    pub fn record(&self, engagement: Engagement) -> Result<Event> {
        let poll_id = validate_identifier("Poll ID", &engagement.poll_id)?;
        let user_id = validate_identifier("User ID", &engagement.user_id)?;
        let previous_choice =
            validate_optional("Previous choice", engagement.previous_choice.as_deref())?;
        let new_choice = validate_optional("New choice", engagement.new_choice.as_deref())?;
        let session_id = validate_optional("Session ID", engagement.session_id.as_deref())?;
        require_choices(engagement.kind, previous_choice, new_choice)?;

        let timestamp = match engagement.timestamp.as_deref() {
            Some(raw) => {
                let trimmed = raw.trim();
                DateTime::parse_from_rfc3339(trimmed).map_err(|e| {
                    AnnalError::Validation(format!(
                        "Engagement timestamp must be RFC 3339: {}",
                        e
                    ))
                })?;
                trimmed.to_string()
            }
            None => Utc::now().to_rfc3339(),
        };

        let metadata = serde_json::to_value(&EngagementMeta {
            event_type: engagement.kind,
            poll_id,
            user_id,
            previous_choice,
            new_choice,
            session_id,
            timestamp: &timestamp,
        })
        .map_err(|e| AnnalError::Serialization(e.to_string()))?;

        let event = self.store.create(
            POLL_ENGAGEMENT,
            &format!("Poll {} {} by user {}", poll_id, engagement.kind, user_id),
            Some(metadata),
        )?;
        tracing::debug!(
            "Poll {} engagement ({}) recorded for user {}",
            poll_id,
            engagement.kind,
            user_id
        );
        Ok(event)
    }

    /// Fetch engagement events in insertion order, narrowed by the filter.
    pub fn query(&self, filter: &EngagementFilter) -> Result<Vec<Event>> {
        let events = self.store.query(Some(POLL_ENGAGEMENT))?;
        Ok(events
            .into_iter()
            .filter(|event| matches(event, filter))
            .collect())
    }

    /// Count engagement events matching the filter.
    pub fn count(&self, filter: &EngagementFilter) -> Result<usize> {
        Ok(self.query(filter)?.len())
    }
}

fn matches(event: &Event, filter: &EngagementFilter) -> bool {
    if let Some(poll_id) = &filter.poll_id {
        if event.metadata_str("poll_id") != Some(poll_id.as_str()) {
            return false;
        }
    }
    if let Some(user_id) = &filter.user_id {
        if event.metadata_str("user_id") != Some(user_id.as_str()) {
            return false;
        }
    }
    if let Some(kind) = filter.kind {
        if event.metadata_str("event_type") != Some(kind.as_str()) {
            return false;
        }
    }
    true
}

fn require_choices(
    kind: EngagementKind,
    previous_choice: Option<&str>,
    new_choice: Option<&str>,
) -> Result<()> {
    match kind {
        EngagementKind::VoteCast if new_choice.is_none() => Err(AnnalError::Validation(
            "A vote_cast engagement requires a new choice".to_string(),
        )),
        EngagementKind::VoteChanged if previous_choice.is_none() || new_choice.is_none() => {
            Err(AnnalError::Validation(
                "A vote_changed engagement requires both previous and new choices".to_string(),
            ))
        }
        EngagementKind::VoteRemoved if previous_choice.is_none() => Err(AnnalError::Validation(
            "A vote_removed engagement requires the previous choice".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_identifier<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AnnalError::Validation(format!("{} cannot be empty", field)));
    }
    if trimmed.len() > MAX_IDENTIFIER_LEN {
        return Err(AnnalError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_IDENTIFIER_LEN
        )));
    }
    Ok(trimmed)
}

fn validate_optional<'a>(field: &str, value: Option<&'a str>) -> Result<Option<&'a str>> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(AnnalError::Validation(format!(
                    "{} cannot be empty when supplied",
                    field
                )));
            }
            Ok(Some(trimmed))
        }
    }
}
