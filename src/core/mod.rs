//! Context core: configuration, lifecycle state machine and facade.
//!
//! The only public API from this module is [`Notificare`] (built by
//! [`NotificareBuilder`] from a [`Config`]) plus [`LaunchState`].
//!
//! Internal modules:
//! - [`lifecycle`]: launch/unlaunch sequencing, snapshot ownership, accessor guards;
//! - [`notificare`]: facade composing the listener registry and the lifecycle;
//! - [`builder`]: wires collaborators and validates configuration.
//!
//! ## Wiring
//! ```text
//! NotificareBuilder::build()
//!   ├─► ListenerRegistry (Arc) ───────────────┐
//!   └─► Lifecycle { source, store, components, registry }
//!                                              │
//! Notificare { registry, lifecycle } ◄─────────┘
//!   ├─ register_listener() ─► ListenerRegistry
//!   ├─ launch()/unlaunch()  ─► Lifecycle ─► dispatch device_registered/ready/unlaunched
//!   └─ application()/require_service() ─► Lifecycle (Ready only)
//! ```

mod builder;
mod config;
mod lifecycle;
mod notificare;
mod state;

pub use builder::NotificareBuilder;
pub use config::Config;
pub use notificare::Notificare;
pub use state::LaunchState;
