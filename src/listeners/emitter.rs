//! # Producer-side dispatch handle.
//!
//! An [`Emitter`] is handed to each launched [`Component`](crate::Component); it is
//! the only way code outside the crate can dispatch events. It cannot be constructed
//! by consumers.
//!
//! Lifecycle events (`device_registered`, `ready`, `unlaunched`) are reserved for the
//! lifecycle itself; emitting them through an `Emitter` is refused.

use std::sync::Arc;

use tracing::warn;

use super::ListenerRegistry;
use crate::events::Event;

/// Dispatches domain events to registered listeners.
#[derive(Clone, Debug)]
pub struct Emitter {
    registry: Arc<ListenerRegistry>,
}

impl Emitter {
    pub(crate) fn new(registry: Arc<ListenerRegistry>) -> Self {
        Self { registry }
    }

    /// Delivers `payload` synchronously to every listener of `E`.
    ///
    /// Returns the number of listeners that completed; listener panics are swallowed.
    pub fn emit<E: Event>(&self, payload: &E::Payload) -> usize {
        if E::KIND.is_lifecycle() {
            warn!(event = %E::KIND, "lifecycle events cannot be emitted by components");
            return 0;
        }
        self.registry.dispatch::<E>(payload)
    }
}
