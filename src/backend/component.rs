use async_trait::async_trait;

use crate::error::BoxError;
use crate::listeners::Emitter;
use crate::model::{Application, Service};

/// A configuration-gated service driven by the lifecycle.
///
/// Launched (in registration order) only when the snapshot enables
/// [`service`](Component::service); only launched components are unlaunched,
/// in reverse order. Teardown failures are logged and tolerated.
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// The service this component implements.
    fn service(&self) -> Service;

    /// Initializes the service. Keep a clone of `emitter` to dispatch domain events later.
    async fn launch(&self, application: &Application, emitter: &Emitter) -> Result<(), BoxError>;

    /// Tears the service down.
    async fn unlaunch(&self) -> Result<(), BoxError>;
}
