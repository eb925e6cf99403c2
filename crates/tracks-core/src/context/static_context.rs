use crate::event::{Properties, PropertyValue};

use super::ContextProvider;

/// A fixed set of attributes, returned unchanged for every event.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    attributes: Properties,
    user_agent: String,
}

impl StaticContext {
    pub fn new(attributes: Properties) -> Self {
        Self {
            attributes,
            user_agent: String::new(),
        }
    }

    /// Empty context.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl ContextProvider for StaticContext {
    fn current_attributes(&self) -> Properties {
        self.attributes.clone()
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }
}
