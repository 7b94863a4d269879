//! # Collaborator seams driven by the lifecycle.
//!
//! The lifecycle does not fetch, persist or render anything itself; it invokes and
//! awaits these traits:
//! - [`ApplicationSource`] - fetches the application snapshot ([`SourceFn`] wraps a closure)
//! - [`DeviceStore`] - persists the device identity ([`MemoryDeviceStore`], [`FileDeviceStore`])
//! - [`Component`] - a service started when the snapshot enables it
//!
//! All of them report failures as [`BoxError`](crate::BoxError).

mod component;
mod source;
mod store;

pub use component::Component;
pub use source::{ApplicationSource, FetchRequest, SourceFn};
pub use store::{DeviceStore, FileDeviceStore, MemoryDeviceStore};
