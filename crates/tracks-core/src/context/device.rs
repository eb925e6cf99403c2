//! Device and application descriptors, flattened into `device_info_*` keys.

use serde::{Deserialize, Serialize};

use crate::constants::DEVICE_INFO_PREFIX;
use crate::event::{Properties, PropertyValue};

use super::ContextProvider;

/// Static description of the host device and application.
///
/// Captured once at startup by the embedding application and handed to the
/// factory; nothing here is read from process-wide state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInformation {
    pub app_name: String,
    pub app_version: String,
    pub app_build: Option<String>,
    pub os: String,
    pub os_version: String,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub brand: Option<String>,
    pub locale: Option<String>,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    /// Explicit user agent. When unset, one is derived from app and OS.
    pub user_agent: Option<String>,
}

impl DeviceInformation {
    fn insert(props: &mut Properties, key: &str, value: impl Into<PropertyValue>) {
        props.insert(format!("{DEVICE_INFO_PREFIX}{key}"), value.into());
    }
}

impl ContextProvider for DeviceInformation {
    fn current_attributes(&self) -> Properties {
        let mut props = Properties::new();
        Self::insert(&mut props, "app_name", self.app_name.as_str());
        Self::insert(&mut props, "app_version", self.app_version.as_str());
        Self::insert(&mut props, "os", self.os.as_str());
        Self::insert(&mut props, "os_version", self.os_version.as_str());

        let optional = [
            ("app_build", &self.app_build),
            ("model", &self.model),
            ("manufacturer", &self.manufacturer),
            ("brand", &self.brand),
            ("locale", &self.locale),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                Self::insert(&mut props, key, v.as_str());
            }
        }
        if let Some(w) = self.screen_width {
            Self::insert(&mut props, "screen_width", w);
        }
        if let Some(h) = self.screen_height {
            Self::insert(&mut props, "screen_height", h);
        }
        props
    }

    fn user_agent(&self) -> String {
        match &self.user_agent {
            Some(ua) => ua.clone(),
            None => format!(
                "{}/{} ({} {})",
                self.app_name, self.app_version, self.os, self.os_version
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DeviceInformation {
        DeviceInformation {
            app_name: "Reader".into(),
            app_version: "4.2".into(),
            os: "linux".into(),
            os_version: "6.1".into(),
            model: Some("x86_64".into()),
            screen_width: Some(1920),
            ..Default::default()
        }
    }

    #[test]
    fn attributes_are_prefixed() {
        let props = sample().current_attributes();
        assert_eq!(
            props.get("device_info_app_name"),
            Some(&PropertyValue::Text("Reader".into()))
        );
        assert_eq!(
            props.get("device_info_screen_width"),
            Some(&PropertyValue::Integer(1920))
        );
        assert!(props.keys().all(|k| k.starts_with(DEVICE_INFO_PREFIX)));
    }

    #[test]
    fn unset_optionals_are_omitted() {
        let props = sample().current_attributes();
        assert!(!props.contains_key("device_info_brand"));
        assert!(!props.contains_key("device_info_screen_height"));
    }

    #[test]
    fn user_agent_is_derived_when_unset() {
        assert_eq!(sample().user_agent(), "Reader/4.2 (linux 6.1)");

        let explicit = DeviceInformation {
            user_agent: Some("custom-agent".into()),
            ..sample()
        };
        assert_eq!(explicit.user_agent(), "custom-agent");
    }
}
