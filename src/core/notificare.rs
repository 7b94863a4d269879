//! # Notificare: the context consumers hold.
//!
//! [`Notificare`] composes the [`ListenerRegistry`] and the lifecycle into the one
//! value surrounding code depends on. It holds nothing else; cloning it is cheap and
//! every clone drives the same registry and state machine. Construct one per process
//! with [`Notificare::builder`] and pass it to whatever needs it.
//!
//! ## Example
//! ```rust
//! use notificare::{events, Application, BoxError, Config, FetchRequest, LaunchState, Notificare, Service, SourceFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SourceFn::arc(|_req: FetchRequest| async {
//!         Application::from_json(r#"{ "services": { "geo": false } }"#).map_err(BoxError::from)
//!     });
//!     let notificare = Notificare::builder(Config::new("key", "secret"))
//!         .with_source(source)
//!         .build()?;
//!
//!     let ready = notificare.register_listener::<events::Ready, _>(|app| {
//!         println!("ready: {:?}", app.enabled_services());
//!     });
//!
//!     notificare.launch().await?;
//!     assert_eq!(notificare.state(), LaunchState::Ready);
//!     assert!(notificare.require_service(Service::Geo).is_err());
//!
//!     ready.dispose();
//!     notificare.unlaunch().await;
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use super::lifecycle::Lifecycle;
use super::{Config, LaunchState, NotificareBuilder};
use crate::error::{AccessError, LaunchError};
use crate::events::{Event, EventKind};
use crate::listeners::{ListenerRegistry, Subscription};
use crate::model::{Application, Device, Service};

/// Facade over the listener registry and the launch lifecycle.
#[derive(Clone)]
pub struct Notificare {
    registry: Arc<ListenerRegistry>,
    lifecycle: Arc<Lifecycle>,
}

impl Notificare {
    /// Starts building a context from `config`.
    pub fn builder(config: Config) -> NotificareBuilder {
        NotificareBuilder::new(config)
    }

    pub(crate) fn from_parts(registry: Arc<ListenerRegistry>, lifecycle: Arc<Lifecycle>) -> Self {
        Self {
            registry,
            lifecycle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LaunchState {
        self.lifecycle.state()
    }

    /// Receiver notified on every state transition.
    pub fn watch_state(&self) -> watch::Receiver<LaunchState> {
        self.lifecycle.watch_state()
    }

    /// Launches: settles once the state is `Ready`, or with the failure that returned it to `Unlaunched`.
    ///
    /// Idempotent. Concurrent calls share one launch sequence; calling it once the launch
    /// settled resolves immediately without re-initializing or re-dispatching `ready`.
    /// A launch settles after its `device_registered` and `ready` listeners returned.
    /// Must be polled inside a Tokio runtime.
    pub async fn launch(&self) -> Result<(), LaunchError> {
        self.lifecycle.launch().await
    }

    /// Tears down started services and settles once the state is `Unlaunched`.
    ///
    /// A no-op when nothing is launched. Waits for an in-flight launch to settle first.
    pub async fn unlaunch(&self) {
        self.lifecycle.unlaunch().await
    }

    /// Registers `callback` for event `E` and returns its disposer.
    ///
    /// There is no replay: the callback only receives events dispatched after this call.
    pub fn register_listener<E, F>(&self, callback: F) -> Subscription
    where
        E: Event,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        self.registry.register::<E, F>(callback)
    }

    /// Number of listeners currently registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry.listener_count(kind)
    }

    /// The application snapshot.
    ///
    /// Fails with [`AccessError::ApplicationUnavailable`] unless the state is `Ready`.
    pub fn application(&self) -> Result<Arc<Application>, AccessError> {
        self.lifecycle.application()
    }

    /// Succeeds if the snapshot enables `service`.
    ///
    /// Fails with [`AccessError::ApplicationUnavailable`] unless `Ready`, and with
    /// [`AccessError::ServiceUnavailable`] when the service is disabled.
    pub fn require_service(&self, service: Service) -> Result<(), AccessError> {
        self.lifecycle.require_service(service)
    }

    /// Services whose components were started by the current launch.
    pub fn active_services(&self) -> Result<Vec<Service>, AccessError> {
        self.lifecycle.active_services()
    }

    /// Device identity; `None` until the first launch established it.
    pub fn device(&self) -> Option<Device> {
        self.lifecycle.device()
    }

    /// Configuration the context was built with.
    pub fn config(&self) -> &Config {
        self.lifecycle.config()
    }

    #[cfg_attr(not(feature = "logging"), allow(dead_code))]
    pub(crate) fn registry(&self) -> &Arc<ListenerRegistry> {
        &self.registry
    }
}

impl fmt::Debug for Notificare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notificare")
            .field("state", &self.state())
            .field("listeners", &self.registry)
            .finish()
    }
}
