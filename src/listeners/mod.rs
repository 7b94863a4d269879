//! # Listener registry and disposers.
//!
//! This module provides the typed pub/sub mechanism between event producers
//! (the lifecycle and launched components) and event consumers (application code).
//!
//! ## Architecture
//! ```text
//! Consumers:                                         Producers:
//!   register_listener::<E>(cb) ──► ListenerRegistry ◄── Lifecycle (device_registered, ready, unlaunched)
//!          ▲                         │ per-event Vec   ◄── Emitter (components: domain events)
//!          └──── Subscription ◄──────┘
//!                 dispose() / guard() / SubscriptionSet
//! ```
//!
//! ## Contract
//! - Dispatch is synchronous and sequential in registration order.
//! - Dispatch works over a snapshot taken at the start of the call.
//! - A panicking listener is logged and skipped; others still receive the event.
//! - There is no replay: a listener only sees events dispatched after it registered.

#[cfg(feature = "logging")]
mod log;
mod emitter;
mod registry;
mod subscription;

pub use emitter::Emitter;
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub(crate) use registry::panic_message;
pub use registry::{ListenerId, ListenerRegistry};
pub use subscription::{Subscription, SubscriptionGuard, SubscriptionSet};
