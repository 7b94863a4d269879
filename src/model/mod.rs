//! Data owned by the lifecycle: the application snapshot and the device record.
//!
//! ## Contents
//! - [`Application`] remote configuration snapshot (service toggles)
//! - [`Service`] closed set of configuration-gated services
//! - [`Device`] local device identity, persisted across sessions

mod application;
mod device;
mod service;

pub use application::Application;
pub use device::Device;
pub use service::Service;
