//! Error types used by the notificare context and its collaborators.
//!
//! This module defines three error enums:
//!
//! - [`AccessError`]: raised synchronously by accessors that need the application snapshot.
//! - [`LaunchError`]: the failure a `launch()` call settles with.
//! - [`ConfigError`]: raised while loading configuration or building the context.
//!
//! All of them provide `as_label` (stable snake_case label for logs).
//! Collaborators (sources, stores, components) report failures as [`BoxError`].

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Service;

/// Boxed error returned by collaborator seams (sources, device stores, components).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors raised by snapshot-dependent accessors.
///
/// Both variants are raised immediately at the call site; accessors never wait for `Ready`.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The application snapshot is not available (state is not `Ready`).
    #[error("notificare is not ready; the application snapshot is unavailable")]
    ApplicationUnavailable,

    /// The snapshot exists but the given service is not enabled for this application.
    #[error("notificare service '{service}' is not available")]
    ServiceUnavailable {
        /// The service that was requested.
        service: Service,
    },
}

impl AccessError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use notificare::{AccessError, Service};
    ///
    /// let err = AccessError::ServiceUnavailable { service: Service::Geo };
    /// assert_eq!(err.as_label(), "service_unavailable");
    /// assert_eq!(err.to_string(), "notificare service 'geo' is not available");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            AccessError::ApplicationUnavailable => "application_unavailable",
            AccessError::ServiceUnavailable { .. } => "service_unavailable",
        }
    }

    /// The service named by the error, if any.
    pub fn service(&self) -> Option<Service> {
        match self {
            AccessError::ApplicationUnavailable => None,
            AccessError::ServiceUnavailable { service } => Some(*service),
        }
    }
}

/// # Failures of a launch attempt.
///
/// `Clone` so every caller attached to the same in-flight launch observes the same failure.
/// After any of these the state is back to `Unlaunched`.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    /// The device identity could not be loaded or persisted.
    #[error("device registration failed: {error}")]
    DeviceRegistration {
        /// The underlying error message.
        error: String,
    },

    /// The application configuration fetch was rejected.
    #[error("application fetch failed: {error}")]
    Fetch {
        /// The underlying error message.
        error: String,
    },

    /// An enabled service failed to initialize.
    #[error("service '{service}' failed to launch: {error}")]
    ServiceInit {
        /// The service whose component failed.
        service: Service,
        /// The underlying error message.
        error: String,
    },

    /// The launch sequence terminated abnormally (panicked).
    #[error("launch aborted: {reason}")]
    Aborted {
        /// Panic or join failure description.
        reason: String,
    },
}

impl LaunchError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use notificare::LaunchError;
    ///
    /// let err = LaunchError::Fetch { error: "offline".into() };
    /// assert_eq!(err.as_label(), "launch_fetch_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LaunchError::DeviceRegistration { .. } => "launch_device_registration_failed",
            LaunchError::Fetch { .. } => "launch_fetch_failed",
            LaunchError::ServiceInit { .. } => "launch_service_init_failed",
            LaunchError::Aborted { .. } => "launch_aborted",
        }
    }
}

/// # Errors raised while loading configuration or building a context.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `application_key` is empty.
    #[error("missing application key")]
    MissingApplicationKey,

    /// `application_secret` is empty.
    #[error("missing application secret")]
    MissingApplicationSecret,

    /// No application source was supplied to the builder.
    #[error("no application source configured")]
    MissingSource,

    /// The services file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the services file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The services document is not valid.
    #[error("invalid services document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MissingApplicationKey => "config_missing_application_key",
            ConfigError::MissingApplicationSecret => "config_missing_application_secret",
            ConfigError::MissingSource => "config_missing_source",
            ConfigError::Read { .. } => "config_read_failed",
            ConfigError::Parse(_) => "config_parse_failed",
        }
    }
}
