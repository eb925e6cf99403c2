//! EventFactory turns raw tracking calls into context-enriched, immutable
//! events. Performs no I/O and never touches storage.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::constants::ALIAS_EVENT_NAME;
use crate::context::ContextProvider;
use crate::errors::{TracksError, TracksResult};
use crate::event::model::EventParts;
use crate::event::record::check_event_date;
use crate::event::{Event, EventId, Properties, UserType};

/// Builds events. The context provider is injected, so two factories with
/// different providers never share ambient state.
#[derive(Clone)]
pub struct EventFactory {
    context: Arc<dyn ContextProvider>,
}

impl EventFactory {
    pub fn new(context: Arc<dyn ContextProvider>) -> Self {
        Self { context }
    }

    /// Create a regular event.
    ///
    /// Fails with `InvalidArgument` when `name` is blank or is the reserved
    /// alias name, or when `event_date` falls outside years 1..=9999.
    /// Nothing is built on failure.
    pub fn create_event(
        &self,
        name: &str,
        username: Option<&str>,
        user_id: Option<&str>,
        user_agent: &str,
        user_type: UserType,
        event_date: DateTime<Utc>,
    ) -> TracksResult<Event> {
        self.create_event_with_properties(
            name,
            username,
            user_id,
            user_agent,
            user_type,
            event_date,
            Properties::new(),
        )
    }

    /// Like [`create_event`](Self::create_event), with caller properties merged
    /// over the context attributes. Caller keys win on collision.
    #[allow(clippy::too_many_arguments)]
    pub fn create_event_with_properties(
        &self,
        name: &str,
        username: Option<&str>,
        user_id: Option<&str>,
        user_agent: &str,
        user_type: UserType,
        event_date: DateTime<Utc>,
        custom: Properties,
    ) -> TracksResult<Event> {
        if name.trim().is_empty() {
            return Err(TracksError::invalid_argument("name", "must not be empty"));
        }
        if name == ALIAS_EVENT_NAME {
            return Err(TracksError::invalid_argument(
                "name",
                format!("`{ALIAS_EVENT_NAME}` is reserved for alias events"),
            ));
        }

        check_event_date(&event_date)?;

        let mut properties = self.context.current_attributes();
        properties.extend(custom);
        validate_properties(&properties)?;

        Ok(Event::from_parts(EventParts {
            id: EventId::generate(),
            name: name.to_string(),
            username: username.map(str::to_string),
            user_id: user_id.map(str::to_string),
            user_agent: user_agent.to_string(),
            user_type,
            event_date,
            anonymous_username: None,
            properties,
        }))
    }

    /// Create the alias event that links `anonymous_username` to the
    /// authenticated `username`/`user_id`.
    ///
    /// `anonymous_username` is the backend's join key and must be non-blank.
    /// Duplicate aliases for the same transition are not detected here.
    pub fn create_alias_event(
        &self,
        username: &str,
        user_id: &str,
        anonymous_username: &str,
    ) -> TracksResult<Event> {
        if anonymous_username.trim().is_empty() {
            return Err(TracksError::invalid_argument(
                "anonymous_username",
                "must not be empty",
            ));
        }

        let properties = self.context.current_attributes();
        validate_properties(&properties)?;

        Ok(Event::from_parts(EventParts {
            id: EventId::generate(),
            name: ALIAS_EVENT_NAME.to_string(),
            username: Some(username.to_string()),
            user_id: Some(user_id.to_string()),
            user_agent: self.context.user_agent(),
            user_type: UserType::Authenticated,
            event_date: Utc::now(),
            anonymous_username: Some(anonymous_username.to_string()),
            properties,
        }))
    }
}

impl std::fmt::Debug for EventFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventFactory").finish_non_exhaustive()
    }
}

fn validate_properties(properties: &Properties) -> TracksResult<()> {
    for (key, value) in properties {
        if key.is_empty() {
            return Err(TracksError::invalid_argument(
                "properties",
                "property keys must not be empty",
            ));
        }
        if !value.is_persistable() {
            return Err(TracksError::invalid_argument(
                format!("properties.{key}"),
                "floating point values must be finite",
            ));
        }
    }
    Ok(())
}
