use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local device identity.
///
/// Assigned on the first `launch()` and persisted through a
/// [`DeviceStore`](crate::DeviceStore); it survives `unlaunch()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Random, stable identifier.
    pub id: Uuid,
    /// Preferred language, if configured.
    pub language: Option<String>,
    /// Preferred region, if configured.
    pub region: Option<String>,
    /// When the identity was first assigned.
    pub registered_at: SystemTime,
}

impl Device {
    /// Creates a fresh identity.
    pub fn new(language: Option<String>, region: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            language,
            region,
            registered_at: SystemTime::now(),
        }
    }
}
