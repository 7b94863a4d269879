//! # Device identity persistence.
//!
//! The lifecycle loads the identity on the first launch of a process and saves a
//! freshly generated one when the store is empty.
//!
//! - [`MemoryDeviceStore`]: process-local (tests, ephemeral clients)
//! - [`FileDeviceStore`]: JSON document on disk, survives restarts

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::BoxError;
use crate::model::Device;

/// Persists the device identity across sessions.
#[async_trait]
pub trait DeviceStore: Send + Sync + 'static {
    /// Returns the stored identity, if any.
    async fn load(&self) -> Result<Option<Device>, BoxError>;

    /// Replaces the stored identity.
    async fn save(&self, device: &Device) -> Result<(), BoxError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryDeviceStore {
    device: Mutex<Option<Device>>,
}

impl MemoryDeviceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `device`.
    pub fn with_device(device: Device) -> Self {
        Self {
            device: Mutex::new(Some(device)),
        }
    }

    /// Current content.
    pub fn get(&self) -> Option<Device> {
        self.device
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DeviceStore for MemoryDeviceStore {
    async fn load(&self) -> Result<Option<Device>, BoxError> {
        Ok(self.get())
    }

    async fn save(&self, device: &Device) -> Result<(), BoxError> {
        *self.device.lock().unwrap_or_else(PoisonError::into_inner) = Some(device.clone());
        Ok(())
    }
}

/// JSON file store.
///
/// Writes go to a sibling temporary file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileDeviceStore {
    path: PathBuf,
}

impl FileDeviceStore {
    /// Store backed by the file at `path` (created on first save).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DeviceStore for FileDeviceStore {
    async fn load(&self) -> Result<Option<Device>, BoxError> {
        match tokio::fs::read(&self.path).await {
            Ok(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, device: &Device) -> Result<(), BoxError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_vec_pretty(device)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_round_trips_identity() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDeviceStore::new(dir.path().join("nested").join("device.json"));

        assert!(store.load().await.unwrap().is_none());

        let device = Device::new(Some("en".into()), None);
        store.save(&device).await.unwrap();

        let reopened = FileDeviceStore::new(store.path().to_path_buf());
        assert_eq!(reopened.load().await.unwrap(), Some(device));
    }

    #[tokio::test]
    async fn file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.json");
        std::fs::write(&path, b"not json").unwrap();

        assert!(FileDeviceStore::new(path).load().await.is_err());
    }

    #[tokio::test]
    async fn memory_store_replaces_content() {
        let store = MemoryDeviceStore::new();
        let first = Device::new(None, None);
        let second = Device::new(None, None);

        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(second));
    }
}
