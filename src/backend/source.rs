//! # Application snapshot source and its function-backed implementation.
//!
//! [`SourceFn`] wraps a closure `F: Fn(FetchRequest) -> Fut`, producing a fresh
//! future per fetch. Each launch attempt calls the source exactly once; the core
//! defines no timeout, failure is signalled only by the returned error.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use notificare::{Application, ApplicationSource, BoxError, FetchRequest, Service, SourceFn};
//!
//! let source: Arc<dyn ApplicationSource> = SourceFn::arc(|req: FetchRequest| async move {
//!     let _ = req.application_key;
//!     Ok::<_, BoxError>(Application::with_services("demo", &[Service::Push]))
//! });
//! # let _ = source;
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::BoxError;
use crate::model::Application;

/// Parameters of one snapshot fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub application_key: String,
    pub application_secret: String,
    /// Identity of the launching device.
    pub device_id: Uuid,
    pub language: Option<String>,
}

/// Fetches the remote application configuration.
#[async_trait]
pub trait ApplicationSource: Send + Sync + 'static {
    /// Fetches the snapshot for the given request.
    async fn fetch(&self, request: &FetchRequest) -> Result<Application, BoxError>;
}

/// Function-backed source.
pub struct SourceFn<F> {
    f: F,
}

impl<F> SourceFn<F> {
    /// Creates a new function-backed source.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the source and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<F> fmt::Debug for SourceFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SourceFn")
    }
}

#[async_trait]
impl<F, Fut> ApplicationSource for SourceFn<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Application, BoxError>> + Send + 'static,
{
    async fn fetch(&self, request: &FetchRequest) -> Result<Application, BoxError> {
        (self.f)(request.clone()).await
    }
}
