//! # Application configuration snapshot.
//!
//! Immutable value fetched during `Launching` and held by the `Ready` phase only.
//! Unknown service keys are kept (and ignored) so a newer backend does not break parsing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Service;

/// Remote configuration of the application: identity plus per-service toggles.
///
/// # Example
/// ```
/// use notificare::{Application, Service};
///
/// let app = Application::from_json(r#"{ "services": { "geo": false, "push": true } }"#).unwrap();
/// assert!(app.is_enabled(Service::Push));
/// assert!(!app.is_enabled(Service::Geo));
/// assert!(!app.is_enabled(Service::Inbox));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Application identifier.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Service toggles keyed by [`Service::as_str`]. Missing keys mean disabled.
    #[serde(default)]
    pub services: BTreeMap<String, bool>,
}

impl Application {
    /// Creates a snapshot with the given services enabled.
    pub fn with_services(id: impl Into<String>, enabled: &[Service]) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            services: enabled
                .iter()
                .map(|s| (s.as_str().to_string(), true))
                .collect(),
        }
    }

    /// Parses a snapshot from its JSON representation.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// True if the service is flagged enabled.
    pub fn is_enabled(&self, service: Service) -> bool {
        self.services
            .get(service.as_str())
            .copied()
            .unwrap_or(false)
    }

    /// Enabled services in [`Service::ALL`] order.
    pub fn enabled_services(&self) -> Vec<Service> {
        Service::ALL
            .into_iter()
            .filter(|s| self.is_enabled(*s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_tolerated() {
        let app = Application::from_json(
            r#"{ "id": "app-1", "name": "Demo", "services": { "geo": true, "websitePush": true } }"#,
        )
        .unwrap();

        assert_eq!(app.id, "app-1");
        assert_eq!(app.enabled_services(), vec![Service::Geo]);
    }

    #[test]
    fn empty_document_enables_nothing() {
        let app = Application::from_json("{}").unwrap();
        assert!(app.enabled_services().is_empty());
    }

    #[test]
    fn with_services_follows_canonical_order() {
        let app = Application::with_services("x", &[Service::Inbox, Service::Push]);
        assert_eq!(app.enabled_services(), vec![Service::Push, Service::Inbox]);
    }
}
