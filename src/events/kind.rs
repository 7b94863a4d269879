//! # Closed catalogue of event names.
//!
//! [`EventKind`] enumerates every event a consumer can subscribe to. The snake_case
//! name ([`EventKind::as_str`]) is the wire/log spelling.
//!
//! ## Groups
//! - **Lifecycle**: `device_registered`, `ready`, `unlaunched`
//! - **Location**: `location_updated`, `location_update_error`
//! - **Inbox**: `inbox_updated`, `badge_updated`
//! - **In-app messages**: `message_*`
//! - **Notifications**: `notification_*`, `system_notification_received`,
//!   `unknown_notification_received`

use std::fmt;

/// Classification of client events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    // === Lifecycle ===
    /// The device identity is known (dispatched before `Ready`).
    DeviceRegistered,
    /// Launch finished; snapshot accessors are usable.
    Ready,
    /// Teardown finished; snapshot cleared.
    Unlaunched,

    // === Location ===
    LocationUpdated,
    LocationUpdateError,

    // === Inbox ===
    InboxUpdated,
    BadgeUpdated,

    // === In-app messages ===
    MessagePresented,
    MessageFinishedPresenting,
    MessageFailedToPresent,
    MessageActionExecuted,
    MessageActionFailedToExecute,

    // === Notifications ===
    NotificationReceived,
    NotificationOpened,
    NotificationActionOpened,
    SystemNotificationReceived,
    UnknownNotificationReceived,
    NotificationSettingsChanged,
    NotificationWillPresent,
    NotificationPresented,
    NotificationFinishedPresenting,
    NotificationFailedToPresent,
    NotificationActionExecuted,
    NotificationActionWillExecute,
    NotificationActionFailedToExecute,
    NotificationCustomActionReceived,
}

impl EventKind {
    /// Every event kind, lifecycle first.
    pub const ALL: [EventKind; 26] = [
        EventKind::DeviceRegistered,
        EventKind::Ready,
        EventKind::Unlaunched,
        EventKind::LocationUpdated,
        EventKind::LocationUpdateError,
        EventKind::InboxUpdated,
        EventKind::BadgeUpdated,
        EventKind::MessagePresented,
        EventKind::MessageFinishedPresenting,
        EventKind::MessageFailedToPresent,
        EventKind::MessageActionExecuted,
        EventKind::MessageActionFailedToExecute,
        EventKind::NotificationReceived,
        EventKind::NotificationOpened,
        EventKind::NotificationActionOpened,
        EventKind::SystemNotificationReceived,
        EventKind::UnknownNotificationReceived,
        EventKind::NotificationSettingsChanged,
        EventKind::NotificationWillPresent,
        EventKind::NotificationPresented,
        EventKind::NotificationFinishedPresenting,
        EventKind::NotificationFailedToPresent,
        EventKind::NotificationActionExecuted,
        EventKind::NotificationActionWillExecute,
        EventKind::NotificationActionFailedToExecute,
        EventKind::NotificationCustomActionReceived,
    ];

    /// Stable snake_case event name.
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::DeviceRegistered => "device_registered",
            EventKind::Ready => "ready",
            EventKind::Unlaunched => "unlaunched",
            EventKind::LocationUpdated => "location_updated",
            EventKind::LocationUpdateError => "location_update_error",
            EventKind::InboxUpdated => "inbox_updated",
            EventKind::BadgeUpdated => "badge_updated",
            EventKind::MessagePresented => "message_presented",
            EventKind::MessageFinishedPresenting => "message_finished_presenting",
            EventKind::MessageFailedToPresent => "message_failed_to_present",
            EventKind::MessageActionExecuted => "message_action_executed",
            EventKind::MessageActionFailedToExecute => "message_action_failed_to_execute",
            EventKind::NotificationReceived => "notification_received",
            EventKind::NotificationOpened => "notification_opened",
            EventKind::NotificationActionOpened => "notification_action_opened",
            EventKind::SystemNotificationReceived => "system_notification_received",
            EventKind::UnknownNotificationReceived => "unknown_notification_received",
            EventKind::NotificationSettingsChanged => "notification_settings_changed",
            EventKind::NotificationWillPresent => "notification_will_present",
            EventKind::NotificationPresented => "notification_presented",
            EventKind::NotificationFinishedPresenting => "notification_finished_presenting",
            EventKind::NotificationFailedToPresent => "notification_failed_to_present",
            EventKind::NotificationActionExecuted => "notification_action_executed",
            EventKind::NotificationActionWillExecute => "notification_action_will_execute",
            EventKind::NotificationActionFailedToExecute => {
                "notification_action_failed_to_execute"
            }
            EventKind::NotificationCustomActionReceived => "notification_custom_action_received",
        }
    }

    /// Looks up a kind by its snake_case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// True for `device_registered`, `ready` and `unlaunched`.
    pub const fn is_lifecycle(self) -> bool {
        matches!(
            self,
            EventKind::DeviceRegistered | EventKind::Ready | EventKind::Unlaunched
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_are_unique_and_resolvable() {
        let names: HashSet<&str> = EventKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), EventKind::ALL.len());

        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::from_name("launched"), None);
    }

    #[test]
    fn only_three_lifecycle_kinds() {
        let lifecycle: Vec<_> = EventKind::ALL
            .into_iter()
            .filter(|k| k.is_lifecycle())
            .collect();
        assert_eq!(
            lifecycle,
            vec![
                EventKind::DeviceRegistered,
                EventKind::Ready,
                EventKind::Unlaunched
            ]
        );
    }
}
