use std::fmt;

use serde::{Deserialize, Serialize};

/// Services an application may enable in its remote configuration.
///
/// The snake_case name is the key used in the snapshot's `services` map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// Remote notifications.
    Push,
    /// Location services (geofencing, location updates).
    Geo,
    /// Device inbox.
    Inbox,
    /// User-scoped inbox.
    UserInbox,
    /// In-app messages.
    InAppMessaging,
    /// Loyalty passes.
    Loyalty,
}

impl Service {
    /// Every service, in canonical start order.
    pub const ALL: [Service; 6] = [
        Service::Push,
        Service::Geo,
        Service::Inbox,
        Service::UserInbox,
        Service::InAppMessaging,
        Service::Loyalty,
    ];

    /// Stable key used in the snapshot and in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Service::Push => "push",
            Service::Geo => "geo",
            Service::Inbox => "inbox",
            Service::UserInbox => "user_inbox",
            Service::InAppMessaging => "in_app_messaging",
            Service::Loyalty => "loyalty",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
