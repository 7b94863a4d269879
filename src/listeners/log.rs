//! # LogWriter: logs every catalogue event
//!
//! Attaches one listener per [`EventKind`] that writes the event name through
//! `tracing` at `info` level. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! INFO notificare::listeners::log: notificare event event=device_registered
//! INFO notificare::listeners::log: notificare event event=ready
//! INFO notificare::listeners::log: notificare event event=badge_updated
//! ```

use std::any::Any;
use std::sync::Arc;

use tracing::info;

use super::SubscriptionSet;
use crate::events::EventKind;
use crate::Notificare;

/// Event-name logger.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Registers the logging listeners; dropping the returned set detaches them.
    pub fn attach(&self, notificare: &Notificare) -> SubscriptionSet {
        let registry = notificare.registry();
        EventKind::ALL
            .into_iter()
            .map(|kind| {
                registry.register_erased(
                    kind,
                    Arc::new(move |_: &dyn Any| info!(event = %kind, "notificare event")),
                )
            })
            .collect()
    }
}
