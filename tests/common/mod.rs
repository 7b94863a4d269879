//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use notificare::{
    events, Application, ApplicationSource, BoxError, Component, Config, Emitter, Event,
    FetchRequest, Notificare, Service, Subscription,
};
use tokio::sync::Notify;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn config() -> Config {
    Config::new("test-key", "test-secret")
}

/// Ordered record of everything the test observed.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == entry).count()
    }

    /// Records the name of every dispatch of `E`.
    pub fn listen<E: Event>(&self, notificare: &Notificare) -> Subscription {
        let journal = self.clone();
        notificare.register_listener::<E, _>(move |_| journal.push(E::KIND.as_str()))
    }

    pub fn listen_lifecycle(&self, notificare: &Notificare) -> Vec<Subscription> {
        vec![
            self.listen::<events::DeviceRegistered>(notificare),
            self.listen::<events::Ready>(notificare),
            self.listen::<events::Unlaunched>(notificare),
        ]
    }
}

/// Source returning a fixed snapshot (or failure), optionally held until released.
pub struct TestSource {
    outcome: Result<Application, String>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<FetchRequest>>,
}

impl TestSource {
    pub fn ok(application: Application) -> Arc<Self> {
        Arc::new(Self::new(Ok(application), None))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self::new(Err(message.to_string()), None))
    }

    pub fn gated(outcome: Result<Application, String>, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self::new(outcome, Some(gate)))
    }

    fn new(outcome: Result<Application, String>, gate: Option<Arc<Notify>>) -> Self {
        Self {
            outcome,
            gate,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApplicationSource for TestSource {
    async fn fetch(&self, request: &FetchRequest) -> Result<Application, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome.clone().map_err(BoxError::from)
    }
}

/// Component that journals its launch/unlaunch calls.
pub struct TestComponent {
    service: Service,
    journal: Journal,
    fail_launch: bool,
    fail_unlaunch: bool,
    panic_launch: bool,
    panic_unlaunch: bool,
    unlaunch_delay: Option<Duration>,
    emitter: Mutex<Option<Emitter>>,
}

impl TestComponent {
    pub fn new(service: Service, journal: &Journal) -> Self {
        Self {
            service,
            journal: journal.clone(),
            fail_launch: false,
            fail_unlaunch: false,
            panic_launch: false,
            panic_unlaunch: false,
            unlaunch_delay: None,
            emitter: Mutex::new(None),
        }
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    pub fn failing_unlaunch(mut self) -> Self {
        self.fail_unlaunch = true;
        self
    }

    pub fn panicking_launch(mut self) -> Self {
        self.panic_launch = true;
        self
    }

    pub fn panicking_unlaunch(mut self) -> Self {
        self.panic_unlaunch = true;
        self
    }

    pub fn slow_unlaunch(mut self, delay: Duration) -> Self {
        self.unlaunch_delay = Some(delay);
        self
    }

    /// The emitter handed over at launch, if launched.
    pub fn emitter(&self) -> Option<Emitter> {
        self.emitter.lock().unwrap().clone()
    }
}

#[async_trait]
impl Component for TestComponent {
    fn service(&self) -> Service {
        self.service
    }

    async fn launch(&self, _application: &Application, emitter: &Emitter) -> Result<(), BoxError> {
        self.journal.push(format!("launch:{}", self.service));
        if self.panic_launch {
            panic!("{} component bug", self.service);
        }
        if self.fail_launch {
            return Err(format!("{} exploded", self.service).into());
        }
        *self.emitter.lock().unwrap() = Some(emitter.clone());
        Ok(())
    }

    async fn unlaunch(&self) -> Result<(), BoxError> {
        self.journal.push(format!("unlaunch:{}", self.service));
        if let Some(delay) = self.unlaunch_delay {
            tokio::time::sleep(delay).await;
        }
        if self.panic_unlaunch {
            panic!("{} teardown bug", self.service);
        }
        if self.fail_unlaunch {
            return Err("teardown refused".into());
        }
        Ok(())
    }
}
