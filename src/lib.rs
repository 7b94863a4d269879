//! # notificare
//!
//! **notificare** is the client core of the Notificare SDK: a typed event-listener
//! registry and the launch lifecycle that gates configuration-dependent features.
//!
//! Everything else a client does (fetching, persisting, rendering notifications and
//! in-app messages) lives behind collaborator traits that this crate invokes and awaits.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   application code
//!        │ register_listener::<E>(cb) ─► Subscription (disposer)
//!        │ launch() / unlaunch() / state()
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Notificare (facade, one per process, cheap to clone)             │
//! │  - ListenerRegistry (per-event ordered callbacks)                 │
//! │  - Lifecycle (Unlaunched → Launching → Ready → Unlaunching)       │
//! └──────┬──────────────────────────┬──────────────────────────┬──────┘
//!        ▼                          ▼                          ▼
//!  ┌──────────────┐         ┌──────────────┐          ┌────────────────┐
//!  │ DeviceStore  │         │ Application  │          │ Component(s)   │
//!  │ (identity)   │         │ Source       │          │ push, geo, ... │
//!  └──────────────┘         │ (snapshot)   │          │ via Emitter    │
//!                           └──────────────┘          └───────┬────────┘
//!                                                             │ emit::<E>(&payload)
//!                                                             ▼
//!                        ListenerRegistry ──► cb1, cb2, ... cbN (registration order)
//! ```
//!
//! ### Lifecycle
//! ```text
//! launch()
//!   ├─► Unlaunched → Launching
//!   ├─► ensure device identity (DeviceStore)
//!   ├─► fetch application snapshot (ApplicationSource)
//!   │       └─ Err ──► Unlaunched, launch() fails with LaunchError
//!   ├─► launch components enabled by the snapshot
//!   └─► Ready ──► dispatch device_registered, then ready
//!
//! unlaunch()
//!   ├─► Ready → Unlaunching
//!   ├─► unlaunch started components (reverse order, failures tolerated)
//!   └─► Unlaunched ──► snapshot cleared, dispatch unlaunched
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Listeners**     | Typed subscriptions over a closed event catalogue.           | [`events`], [`Subscription`]                |
//! | **Lifecycle**     | Serialized launch/unlaunch with shared in-flight attempts.   | [`Notificare`], [`LaunchState`]             |
//! | **Gating**        | Snapshot accessors that fail fast outside `Ready`.           | [`AccessError`], [`Service`]                |
//! | **Collaborators** | Snapshot source, device persistence, service components.     | [`ApplicationSource`], [`DeviceStore`], [`Component`] |
//! | **Configuration** | Credentials and teardown bounds, loadable from JSON.         | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use notificare::{events, Application, BoxError, Config, FetchRequest, Notificare, Service, SourceFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SourceFn::arc(|_req: FetchRequest| async {
//!         Ok::<_, BoxError>(Application::with_services("demo", &[Service::Push]))
//!     });
//!
//!     let notificare = Notificare::builder(Config::new("app-key", "app-secret"))
//!         .with_source(source)
//!         .build()?;
//!
//!     // Disposed when the guard goes out of scope.
//!     let _ready = notificare
//!         .register_listener::<events::Ready, _>(|app| println!("ready: {}", app.id))
//!         .guard();
//!
//!     notificare.launch().await?;
//!     notificare.require_service(Service::Push)?;
//!
//!     notificare.unlaunch().await;
//!     Ok(())
//! }
//! ```

mod backend;
mod core;
mod error;
pub mod events;
mod listeners;
mod model;

// ---- Public re-exports ----

pub use backend::{
    ApplicationSource, Component, DeviceStore, FetchRequest, FileDeviceStore, MemoryDeviceStore,
    SourceFn,
};
pub use self::core::{Config, LaunchState, Notificare, NotificareBuilder};
pub use error::{AccessError, BoxError, ConfigError, LaunchError};
pub use events::{Event, EventKind};
pub use listeners::{
    Emitter, ListenerId, ListenerRegistry, Subscription, SubscriptionGuard, SubscriptionSet,
};
pub use model::{Application, Device, Service};

// Optional: expose a simple built-in logger (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
