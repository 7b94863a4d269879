//! # Payloads carried by domain events.
//!
//! Plain data: producers (components) build them, listeners borrow them.
//! Field names serialize as camelCase so producers can decode them straight
//! from backend documents.

use std::collections::BTreeMap;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// A remote notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Notification type, e.g. `re.notifica.notification.Alert`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub actions: Vec<NotificationAction>,
}

/// An action attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    #[serde(default)]
    pub target: Option<String>,
}

/// How a notification reached the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMechanism {
    Standard,
    Silent,
}

/// Payload of `notification_received`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedNotification {
    pub notification: Notification,
    pub delivery: DeliveryMechanism,
}

/// A notification together with one of its actions.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationActionEvent {
    pub notification: Notification,
    pub action: NotificationAction,
}

/// Payload of `notification_action_failed_to_execute`.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationActionFailure {
    pub notification: Notification,
    pub action: NotificationAction,
    pub error: Option<String>,
}

/// Payload of `notification_custom_action_received`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAction {
    pub notification: Notification,
    pub action: NotificationAction,
    pub url: String,
}

/// A system (non user-facing) notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

/// A notification the client could not classify; carries the raw document.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownNotification {
    pub data: serde_json::Value,
}

/// An in-app message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InAppMessage {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// An action of an in-app message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InAppAction {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Payload of `message_action_executed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAction {
    pub message: InAppMessage,
    pub action: InAppAction,
}

/// Payload of `message_action_failed_to_execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageActionFailure {
    pub message: InAppMessage,
    pub action: InAppAction,
    pub error: Option<String>,
}

/// A location fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
    pub timestamp: SystemTime,
}

/// Payload of `location_update_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationError {
    pub message: String,
}

/// An inbox entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxItem {
    pub id: String,
    pub notification_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub opened: bool,
    pub time: SystemTime,
}
