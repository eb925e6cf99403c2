use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::EventId;
use super::properties::{Properties, PropertyValue};
use super::user_type::UserType;
use crate::constants::ALIAS_EVENT_NAME;

/// A single tracked occurrence.
///
/// Immutable once built: fields are private and there are no setters. The
/// only ways to obtain an `Event` are `EventFactory` and restoring a persisted
/// `EventRecord`. Serializable so a dispatch client can put it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    id: EventId,
    name: String,
    username: Option<String>,
    user_id: Option<String>,
    user_agent: String,
    user_type: UserType,
    event_date: DateTime<Utc>,
    anonymous_username: Option<String>,
    properties: Properties,
}

/// Every field of an event, used by the factory and by record restoration.
pub(crate) struct EventParts {
    pub id: EventId,
    pub name: String,
    pub username: Option<String>,
    pub user_id: Option<String>,
    pub user_agent: String,
    pub user_type: UserType,
    pub event_date: DateTime<Utc>,
    pub anonymous_username: Option<String>,
    pub properties: Properties,
}

impl Event {
    pub(crate) fn from_parts(parts: EventParts) -> Self {
        Self {
            id: parts.id,
            name: parts.name,
            username: parts.username,
            user_id: parts.user_id,
            user_agent: parts.user_agent,
            user_type: parts.user_type,
            event_date: parts.event_date,
            anonymous_username: parts.anonymous_username,
            properties: parts.properties,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn event_date(&self) -> DateTime<Utc> {
        self.event_date
    }

    /// Pre-authentication identity. Only set on alias events.
    pub fn anonymous_username(&self) -> Option<&str> {
        self.anonymous_username.as_deref()
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn is_alias(&self) -> bool {
        self.name == ALIAS_EVENT_NAME
    }
}
