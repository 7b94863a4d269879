//! Client events: names, typed markers and payloads.
//!
//! This module groups the event **catalogue** consumers subscribe to and the
//! payload types producers hand to listeners.
//!
//! ## Contents
//! - [`EventKind`] closed enumeration of event names
//! - [`Event`] trait plus one marker type per name (e.g. [`Ready`], [`BadgeUpdated`])
//! - payload structs ([`Notification`], [`InAppMessage`], [`Location`], ...)
//!
//! ## Quick reference
//! - **Producers**: the lifecycle (`device_registered`, `ready`, `unlaunched`) and
//!   launched components through their [`Emitter`](crate::Emitter).
//! - **Consumers**: closures registered with
//!   [`Notificare::register_listener`](crate::Notificare::register_listener).
//!
//! See `listeners/mod.rs` for the dispatch rules.

mod catalog;
mod kind;
mod payload;

pub use catalog::*;
pub use kind::EventKind;
pub use payload::{
    CustomAction, DeliveryMechanism, InAppAction, InAppMessage, InboxItem, Location,
    LocationError, MessageAction, MessageActionFailure, Notification, NotificationAction,
    NotificationActionEvent, NotificationActionFailure, ReceivedNotification, SystemNotification,
    UnknownNotification,
};
