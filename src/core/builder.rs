use std::sync::Arc;

use super::lifecycle::{Lifecycle, LifecycleParts};
use super::{Config, Notificare};
use crate::backend::{ApplicationSource, Component, DeviceStore, MemoryDeviceStore};
use crate::error::ConfigError;
use crate::listeners::ListenerRegistry;

/// Builder for constructing a [`Notificare`] context.
pub struct NotificareBuilder {
    cfg: Config,
    source: Option<Arc<dyn ApplicationSource>>,
    store: Option<Arc<dyn DeviceStore>>,
    components: Vec<Arc<dyn Component>>,
}

impl NotificareBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            source: None,
            store: None,
            components: Vec::new(),
        }
    }

    /// Sets where the application snapshot is fetched from (required).
    pub fn with_source(mut self, source: Arc<dyn ApplicationSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets where the device identity is persisted.
    ///
    /// Defaults to a [`MemoryDeviceStore`] (identity lives as long as the process).
    pub fn with_device_store(mut self, store: Arc<dyn DeviceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the service components; they launch in this order when enabled.
    pub fn with_components(mut self, components: Vec<Arc<dyn Component>>) -> Self {
        self.components = components;
        self
    }

    /// Appends one service component.
    pub fn with_component(mut self, component: Arc<dyn Component>) -> Self {
        self.components.push(component);
        self
    }

    /// Validates the configuration and builds the context.
    ///
    /// Nothing is started: the context begins `Unlaunched`.
    pub fn build(self) -> Result<Notificare, ConfigError> {
        self.cfg.validate()?;
        let source = self.source.ok_or(ConfigError::MissingSource)?;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryDeviceStore::new()));

        let registry = ListenerRegistry::new();
        let lifecycle = Lifecycle::new(LifecycleParts {
            config: self.cfg,
            source,
            store,
            components: self.components,
            registry: Arc::clone(&registry),
        });

        Ok(Notificare::from_parts(registry, lifecycle))
    }
}
