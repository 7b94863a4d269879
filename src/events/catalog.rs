//! # Typed event catalogue.
//!
//! One uninhabited marker type per [`EventKind`], binding the event name to its
//! payload type through the [`Event`] trait. Subscriptions and dispatches are
//! parameterized by the marker, so a listener always receives the payload type
//! of the event it registered for.
//!
//! ```
//! use notificare::events::{self, Event};
//! use notificare::EventKind;
//!
//! assert_eq!(<events::BadgeUpdated as Event>::KIND, EventKind::BadgeUpdated);
//! ```

use std::any::Any;

use super::payload::*;
use super::EventKind;
use crate::model::{Application, Device};

/// Binds an event name to its payload type.
pub trait Event: 'static {
    /// The event name this marker stands for.
    const KIND: EventKind;
    /// Payload handed (by reference) to every listener.
    type Payload: Any + Send + Sync;
}

macro_rules! catalog {
    ($( $(#[$doc:meta])* $marker:ident => $payload:ty; )*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub enum $marker {}

            impl Event for $marker {
                const KIND: EventKind = EventKind::$marker;
                type Payload = $payload;
            }
        )*

        #[cfg(test)]
        const CATALOGUED: &[EventKind] = &[$(EventKind::$marker),*];
    };
}

catalog! {
    /// `device_registered`: the device identity.
    DeviceRegistered => Device;
    /// `ready`: the fetched application snapshot.
    Ready => Application;
    /// `unlaunched`: no payload.
    Unlaunched => ();

    /// `location_updated`
    LocationUpdated => Location;
    /// `location_update_error`
    LocationUpdateError => LocationError;

    /// `inbox_updated`: the full current inbox.
    InboxUpdated => Vec<InboxItem>;
    /// `badge_updated`: unread count.
    BadgeUpdated => u32;

    /// `message_presented`
    MessagePresented => InAppMessage;
    /// `message_finished_presenting`
    MessageFinishedPresenting => InAppMessage;
    /// `message_failed_to_present`
    MessageFailedToPresent => InAppMessage;
    /// `message_action_executed`
    MessageActionExecuted => MessageAction;
    /// `message_action_failed_to_execute`
    MessageActionFailedToExecute => MessageActionFailure;

    /// `notification_received`
    NotificationReceived => ReceivedNotification;
    /// `notification_opened`
    NotificationOpened => Notification;
    /// `notification_action_opened`
    NotificationActionOpened => NotificationActionEvent;
    /// `system_notification_received`
    SystemNotificationReceived => SystemNotification;
    /// `unknown_notification_received`
    UnknownNotificationReceived => UnknownNotification;
    /// `notification_settings_changed`: whether notifications are allowed.
    NotificationSettingsChanged => bool;
    /// `notification_will_present`
    NotificationWillPresent => Notification;
    /// `notification_presented`
    NotificationPresented => Notification;
    /// `notification_finished_presenting`
    NotificationFinishedPresenting => Notification;
    /// `notification_failed_to_present`
    NotificationFailedToPresent => Notification;
    /// `notification_action_executed`
    NotificationActionExecuted => NotificationActionEvent;
    /// `notification_action_will_execute`
    NotificationActionWillExecute => NotificationActionEvent;
    /// `notification_action_failed_to_execute`
    NotificationActionFailedToExecute => NotificationActionFailure;
    /// `notification_custom_action_received`
    NotificationCustomActionReceived => CustomAction;
}
