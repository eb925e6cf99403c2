//! Flat persisted layout of an `Event`.
//!
//! Timestamps are RFC 3339 with nanosecond precision and properties are a
//! JSON object, so `Event -> EventRecord -> Event` is lossless.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};

use super::id::EventId;
use super::model::{Event, EventParts};
use super::properties::Properties;
use super::user_type::UserType;
use crate::errors::{TracksError, TracksResult};

/// Years an RFC 3339 timestamp can carry. Dates outside this range would be
/// written in an extended form that cannot be parsed back.
const MIN_EVENT_YEAR: i32 = 1;
const MAX_EVENT_YEAR: i32 = 9999;

/// Reject dates the persisted timestamp format cannot round-trip.
pub(crate) fn check_event_date(date: &DateTime<Utc>) -> TracksResult<()> {
    if (MIN_EVENT_YEAR..=MAX_EVENT_YEAR).contains(&date.year()) {
        return Ok(());
    }
    Err(TracksError::invalid_argument(
        "event_date",
        format!(
            "year {} is outside {MIN_EVENT_YEAR}..={MAX_EVENT_YEAR}",
            date.year()
        ),
    ))
}

/// One row of pending-event storage. Every field is a plain scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    pub username: Option<String>,
    pub user_id: Option<String>,
    pub user_agent: String,
    pub user_type: String,
    pub event_date: String,
    pub anonymous_username: Option<String>,
    pub properties: String,
}

impl EventRecord {
    /// Flatten an event for storage.
    pub fn from_event(event: &Event) -> TracksResult<Self> {
        check_event_date(&event.event_date())?;
        let properties = serde_json::to_string(event.properties())
            .map_err(|e| TracksError::persistence(format!("serialize properties: {e}")))?;
        Ok(Self {
            id: event.id().to_string(),
            name: event.name().to_string(),
            username: event.username().map(str::to_string),
            user_id: event.user_id().map(str::to_string),
            user_agent: event.user_agent().to_string(),
            user_type: event.user_type().as_str().to_string(),
            event_date: event
                .event_date()
                .to_rfc3339_opts(SecondsFormat::Nanos, true),
            anonymous_username: event.anonymous_username().map(str::to_string),
            properties,
        })
    }

    /// Rebuild the event. Any field that does not decode means the stored row
    /// is not something this library wrote, so it is reported as corruption.
    pub fn into_event(self) -> TracksResult<Event> {
        let id: EventId = self.id.parse().map_err(|e| {
            TracksError::corruption(format!("row has invalid id {:?}: {e}", self.id))
        })?;
        if self.name.trim().is_empty() {
            return Err(TracksError::corruption(format!("event {id} has an empty name")));
        }
        let user_type: UserType = self
            .user_type
            .parse()
            .map_err(|e: String| TracksError::corruption(format!("event {id}: {e}")))?;
        let event_date = DateTime::parse_from_rfc3339(&self.event_date)
            .map_err(|e| TracksError::corruption(format!("event {id} has invalid date: {e}")))?
            .with_timezone(&Utc);
        let properties: Properties = serde_json::from_str(&self.properties).map_err(|e| {
            TracksError::corruption(format!("event {id} has invalid properties: {e}"))
        })?;

        Ok(Event::from_parts(EventParts {
            id,
            name: self.name,
            username: self.username,
            user_id: self.user_id,
            user_agent: self.user_agent,
            user_type,
            event_date,
            anonymous_username: self.anonymous_username,
            properties,
        }))
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = TracksError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        record.into_event()
    }
}
