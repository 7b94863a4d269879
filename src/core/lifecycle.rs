//! # Lifecycle: the launch/unlaunch state machine.
//!
//! [`Lifecycle`] owns the application snapshot, the device identity and the set of
//! started components, and serializes every transition.
//!
//! ## Transitions
//! ```text
//!  Unlaunched ──launch()──► Launching ──fetch ok──► Ready ──unlaunch()──► Unlaunching ──► Unlaunched
//!       ▲                       │                                                          │
//!       └──────fetch/init err───┘                                                          │
//!       ▲                                                                                  │
//!       └──────────────────────────── teardown complete, dispatch `unlaunched` ◄───────────┘
//! ```
//!
//! ## Launch sequence
//! ```text
//! ensure_device()            load from DeviceStore, or create + save
//!   └─► source.fetch()       suspension point; failure → Unlaunched, LaunchError::Fetch
//!        └─► start components enabled by the snapshot (registration order)
//!             ├─ init error  → stop the started ones (reverse), Unlaunched, LaunchError::ServiceInit
//!             └─ ok          → Ready(snapshot, started)
//!                              dispatch device_registered, then ready, then settle
//! ```
//!
//! ## Rules
//! - Launch and teardown run as spawned tasks; their completion is shared with every
//!   caller attached to them, so dropping a caller never cancels them.
//! - A launch settles only after `device_registered` and `ready` were dispatched. Until
//!   then `Ready` keeps the in-flight attempt so later callers can attach to it.
//! - `launch()` while `Launching` (or `Ready` but unsettled) attaches to the in-flight
//!   attempt; while settled `Ready` it returns at once; while `Unlaunching` it waits for
//!   teardown, then launches.
//! - `unlaunch()` while `Unlaunched` is a no-op; while `Launching` (or `Ready` but
//!   unsettled) it waits for the launch to settle first; while `Unlaunching` it attaches
//!   to the in-flight teardown.
//! - Component panics are caught and treated as failures of that component.
//! - Teardown is best-effort: failed, panicked or timed-out service teardowns are logged
//!   and the remaining steps, plus the final `unlaunched` dispatch, still run.
//! - The phase lock is never held across a suspension point.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::{Config, LaunchState};
use crate::backend::{ApplicationSource, Component, DeviceStore, FetchRequest};
use crate::error::{AccessError, BoxError, LaunchError};
use crate::events;
use crate::listeners::{panic_message, Emitter, ListenerRegistry};
use crate::model::{Application, Device, Service};

type SharedLaunch = Shared<BoxFuture<'static, Result<(), LaunchError>>>;
type SharedUnlaunch = Shared<BoxFuture<'static, ()>>;

/// Internal phase; the snapshot only exists inside `Ready`.
///
/// `Ready` holds the launch attempt until its dispatches returned.
enum Phase {
    Unlaunched,
    Launching(SharedLaunch),
    Ready(Arc<Launched>, Option<SharedLaunch>),
    Unlaunching(SharedUnlaunch),
}

impl Phase {
    fn state(&self) -> LaunchState {
        match self {
            Phase::Unlaunched => LaunchState::Unlaunched,
            Phase::Launching(_) => LaunchState::Launching,
            Phase::Ready(..) => LaunchState::Ready,
            Phase::Unlaunching(_) => LaunchState::Unlaunching,
        }
    }
}

/// What a successful launch produced.
struct Launched {
    application: Arc<Application>,
    started: Vec<Arc<dyn Component>>,
}

/// A transition some other caller already started.
enum Pending {
    Launch(SharedLaunch),
    Unlaunch(SharedUnlaunch),
}

/// Collaborators the lifecycle drives.
pub(crate) struct LifecycleParts {
    pub config: Config,
    pub source: Arc<dyn ApplicationSource>,
    pub store: Arc<dyn DeviceStore>,
    pub components: Vec<Arc<dyn Component>>,
    pub registry: Arc<ListenerRegistry>,
}

/// Launch lifecycle state machine.
pub(crate) struct Lifecycle {
    config: Config,
    source: Arc<dyn ApplicationSource>,
    store: Arc<dyn DeviceStore>,
    components: Vec<Arc<dyn Component>>,
    registry: Arc<ListenerRegistry>,

    phase: Mutex<Phase>,
    device: Mutex<Option<Device>>,
    state_tx: watch::Sender<LaunchState>,
}

impl Lifecycle {
    pub(crate) fn new(parts: LifecycleParts) -> Arc<Self> {
        let (state_tx, _rx) = watch::channel(LaunchState::Unlaunched);
        Arc::new(Self {
            config: parts.config,
            source: parts.source,
            store: parts.store,
            components: parts.components,
            registry: parts.registry,
            phase: Mutex::new(Phase::Unlaunched),
            device: Mutex::new(None),
            state_tx,
        })
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// Current state (always read from the phase, never cached).
    pub(crate) fn state(&self) -> LaunchState {
        self.phase().state()
    }

    pub(crate) fn watch_state(&self) -> watch::Receiver<LaunchState> {
        self.state_tx.subscribe()
    }

    /// Device identity, once the first launch established it.
    pub(crate) fn device(&self) -> Option<Device> {
        self.device.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn application(&self) -> Result<Arc<Application>, AccessError> {
        Ok(Arc::clone(&self.launched()?.application))
    }

    pub(crate) fn require_service(&self, service: Service) -> Result<(), AccessError> {
        if self.launched()?.application.is_enabled(service) {
            Ok(())
        } else {
            Err(AccessError::ServiceUnavailable { service })
        }
    }

    pub(crate) fn active_services(&self) -> Result<Vec<Service>, AccessError> {
        Ok(self
            .launched()?
            .started
            .iter()
            .map(|c| c.service())
            .collect())
    }

    /// Drives the machine to `Ready`, attaching to an in-flight launch if there is one.
    pub(crate) async fn launch(self: &Arc<Self>) -> Result<(), LaunchError> {
        loop {
            let pending = {
                let mut phase = self.phase();
                match &*phase {
                    Phase::Ready(_, None) => {
                        debug!("already launched");
                        return Ok(());
                    }
                    Phase::Ready(_, Some(launch)) | Phase::Launching(launch) => {
                        Pending::Launch(launch.clone())
                    }
                    Phase::Unlaunching(unlaunch) => Pending::Unlaunch(unlaunch.clone()),
                    Phase::Unlaunched => {
                        let launch = self.spawn_launch();
                        *phase = Phase::Launching(launch.clone());
                        self.state_tx.send_replace(LaunchState::Launching);
                        Pending::Launch(launch)
                    }
                }
            };

            match pending {
                Pending::Launch(launch) => return launch.await,
                Pending::Unlaunch(unlaunch) => {
                    debug!("waiting for teardown before launching");
                    unlaunch.await;
                }
            }
        }
    }

    /// Drives the machine to `Unlaunched`.
    pub(crate) async fn unlaunch(self: &Arc<Self>) {
        loop {
            let pending = {
                let mut phase = self.phase();
                match &*phase {
                    Phase::Unlaunched => {
                        debug!("not launched; nothing to unlaunch");
                        return;
                    }
                    Phase::Ready(_, Some(launch)) | Phase::Launching(launch) => {
                        Pending::Launch(launch.clone())
                    }
                    Phase::Unlaunching(unlaunch) => Pending::Unlaunch(unlaunch.clone()),
                    Phase::Ready(launched, None) => {
                        let unlaunch = self.spawn_unlaunch(Arc::clone(launched));
                        *phase = Phase::Unlaunching(unlaunch.clone());
                        self.state_tx.send_replace(LaunchState::Unlaunching);
                        Pending::Unlaunch(unlaunch)
                    }
                }
            };

            match pending {
                Pending::Launch(launch) => {
                    debug!("waiting for launch to settle before unlaunching");
                    let _ = launch.await;
                }
                Pending::Unlaunch(unlaunch) => return unlaunch.await,
            }
        }
    }

    fn spawn_launch(self: &Arc<Self>) -> SharedLaunch {
        let handle = tokio::spawn(Arc::clone(self).run_launch());
        let me = Arc::clone(self);
        async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(join) => {
                    error!(error = %join, "launch sequence aborted");
                    me.leave_transition(LaunchState::Launching);
                    me.settle();
                    Err(LaunchError::Aborted {
                        reason: join.to_string(),
                    })
                }
            }
        }
        .boxed()
        .shared()
    }

    fn spawn_unlaunch(self: &Arc<Self>, launched: Arc<Launched>) -> SharedUnlaunch {
        let handle = tokio::spawn(Arc::clone(self).run_unlaunch(launched));
        let me = Arc::clone(self);
        async move {
            if let Err(join) = handle.await {
                error!(error = %join, "teardown sequence aborted");
                me.leave_transition(LaunchState::Unlaunching);
            }
        }
        .boxed()
        .shared()
    }

    async fn run_launch(self: Arc<Self>) -> Result<(), LaunchError> {
        info!("launching notificare");
        match self.bootstrap().await {
            Ok((device, launched)) => {
                let application = Arc::clone(&launched.application);
                let active: Vec<&'static str> =
                    launched.started.iter().map(|c| c.service().as_str()).collect();
                self.enter_ready(launched);
                info!(services = ?active, "notificare is ready");

                self.registry.dispatch::<events::DeviceRegistered>(&device);
                self.registry.dispatch::<events::Ready>(application.as_ref());
                self.settle();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, label = err.as_label(), "launch failed");
                self.enter(Phase::Unlaunched);
                Err(err)
            }
        }
    }

    async fn bootstrap(&self) -> Result<(Device, Arc<Launched>), LaunchError> {
        let device = self.ensure_device().await?;

        let request = FetchRequest {
            application_key: self.config.application_key.clone(),
            application_secret: self.config.application_secret.clone(),
            device_id: device.id,
            language: self.config.language.clone(),
        };
        let application = self
            .source
            .fetch(&request)
            .await
            .map_err(|e| LaunchError::Fetch {
                error: e.to_string(),
            })?;
        let application = Arc::new(application);
        debug!(application = %application.id, "application snapshot fetched");

        let started = self.start_components(&application).await?;
        Ok((
            device,
            Arc::new(Launched {
                application,
                started,
            }),
        ))
    }

    async fn ensure_device(&self) -> Result<Device, LaunchError> {
        if let Some(device) = self.device() {
            return Ok(device);
        }

        let registration = |e: BoxError| LaunchError::DeviceRegistration {
            error: e.to_string(),
        };
        let device = match self.store.load().await.map_err(registration)? {
            Some(device) => {
                debug!(device = %device.id, "device identity restored");
                device
            }
            None => {
                let device = Device::new(self.config.language.clone(), self.config.region.clone());
                self.store.save(&device).await.map_err(registration)?;
                info!(device = %device.id, "device identity created");
                device
            }
        };

        *self.device.lock().unwrap_or_else(PoisonError::into_inner) = Some(device.clone());
        Ok(device)
    }

    async fn start_components(
        &self,
        application: &Application,
    ) -> Result<Vec<Arc<dyn Component>>, LaunchError> {
        let emitter = Emitter::new(Arc::clone(&self.registry));
        let mut started: Vec<Arc<dyn Component>> = Vec::new();

        for component in &self.components {
            let service = component.service();
            if !application.is_enabled(service) {
                debug!(%service, "service disabled; not launching");
                continue;
            }
            if let Err(e) = unwind_safe(component.launch(application, &emitter)).await {
                let error = e.to_string();
                error!(%service, %error, "service failed to launch");
                self.stop_components(&started).await;
                return Err(LaunchError::ServiceInit { service, error });
            }
            debug!(%service, "service launched");
            started.push(Arc::clone(component));
        }

        Ok(started)
    }

    async fn run_unlaunch(self: Arc<Self>, launched: Arc<Launched>) {
        info!("unlaunching notificare");
        self.stop_components(&launched.started).await;
        self.enter(Phase::Unlaunched);
        info!("notificare unlaunched");
        self.registry.dispatch::<events::Unlaunched>(&());
    }

    /// Tears down `started` in reverse order; failures are tolerated.
    async fn stop_components(&self, started: &[Arc<dyn Component>]) {
        for component in started.iter().rev() {
            let service = component.service();
            let outcome = match self.config.teardown_timeout() {
                Some(limit) => {
                    match tokio::time::timeout(limit, unwind_safe(component.unlaunch())).await {
                        Ok(outcome) => outcome,
                        Err(_) => Err(format!("teardown timed out after {limit:?}").into()),
                    }
                }
                None => unwind_safe(component.unlaunch()).await,
            };

            match outcome {
                Ok(()) => debug!(%service, "service unlaunched"),
                Err(e) => warn!(%service, error = %e, "service teardown failed; continuing"),
            }
        }
    }

    fn enter(&self, next: Phase) {
        let state = next.state();
        *self.phase() = next;
        self.state_tx.send_replace(state);
    }

    /// Enters `Ready`, keeping the in-flight attempt attached until [`settle`](Self::settle).
    fn enter_ready(&self, launched: Arc<Launched>) {
        let mut phase = self.phase();
        let launch = match &*phase {
            Phase::Launching(launch) => Some(launch.clone()),
            _ => None,
        };
        *phase = Phase::Ready(launched, launch);
        drop(phase);
        self.state_tx.send_replace(LaunchState::Ready);
    }

    /// Marks the launch as settled: `device_registered` and `ready` were dispatched.
    fn settle(&self) {
        if let Phase::Ready(_, launch) = &mut *self.phase() {
            *launch = None;
        }
    }

    /// Forces `Unlaunched` if the machine is still in `from`; returns whether it did.
    fn leave_transition(&self, from: LaunchState) -> bool {
        let mut phase = self.phase();
        if phase.state() != from {
            return false;
        }
        *phase = Phase::Unlaunched;
        drop(phase);
        self.state_tx.send_replace(LaunchState::Unlaunched);
        true
    }

    fn launched(&self) -> Result<Arc<Launched>, AccessError> {
        match &*self.phase() {
            Phase::Ready(launched, _) => Ok(Arc::clone(launched)),
            _ => Err(AccessError::ApplicationUnavailable),
        }
    }

    fn phase(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs a component step, turning a panic into an error.
async fn unwind_safe<F>(step: F) -> Result<(), BoxError>
where
    F: Future<Output = Result<(), BoxError>>,
{
    match AssertUnwindSafe(step).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => Err(format!("panicked: {}", panic_message(panic.as_ref())).into()),
    }
}
