use std::sync::Arc;

use models::device::{DevicePatch, Model, NewDevice};
use models::errors::ModelError;
use tracing::{info, instrument};

use super::repository::DeviceRepository;
use crate::errors::{parse_id, ServiceError};
use crate::scene::repository::SceneRepository;

const INVALID_ID: &str = "Invalid device ID format";
const DUPLICATE_IP: &str = "A device with this IP address already exists";

/// Counts reported by [`DeviceService::delete_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteAllOutcome {
    pub deleted_devices: u64,
    pub deleted_scenes: u64,
}

/// Device CRUD. Owns the device -> scene cascade.
pub struct DeviceService {
    devices: Arc<dyn DeviceRepository>,
    scenes: Arc<dyn SceneRepository>,
}

impl DeviceService {
    pub fn new(devices: Arc<dyn DeviceRepository>, scenes: Arc<dyn SceneRepository>) -> Self {
        Self { devices, scenes }
    }

    pub async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        self.devices.list().await.map_err(|e| ServiceError::store(e, "Failed to fetch devices"))
    }

    /// Create a device with a trimmed name and a unique IPv4 address.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::device::DeviceService;
    /// use service::device::repository::mock::MockDeviceRepository;
    /// use service::scene::repository::mock::MockSceneRepository;
    ///
    /// let svc = DeviceService::new(Arc::new(MockDeviceRepository::default()), Arc::new(MockSceneRepository::default()));
    /// let device = tokio_test::block_on(svc.create("  Bench PSU ", "192.168.1.20")).unwrap();
    /// assert_eq!(device.name, "Bench PSU");
    /// assert!(tokio_test::block_on(svc.create("Other", "192.168.1.20")).is_err());
    /// ```
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, ip: &str) -> Result<Model, ServiceError> {
        let input = NewDevice::validated(name, ip)?;
        let device = self.devices.create(input).await.map_err(|e| classify(e, "Failed to create device"))?;
        info!(device_id = %device.id, ip = %device.ip, "device_created");
        Ok(device)
    }

    /// Apply only the supplied fields.
    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, name: Option<&str>, ip: Option<&str>) -> Result<Model, ServiceError> {
        let id = parse_id(id, INVALID_ID)?;
        let patch = DevicePatch::validated(name, ip)?;
        let device = self
            .devices
            .update(&id, patch)
            .await
            .map_err(|e| classify(e, "Failed to update device"))?
            .ok_or_else(|| ServiceError::not_found("Device"))?;
        info!(device_id = %device.id, "device_updated");
        Ok(device)
    }

    /// Delete a device and every scene pointing at it. Returns the number of
    /// scenes removed. The two steps are not transactional.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<u64, ServiceError> {
        let id = parse_id(id, INVALID_ID)?;
        let removed = self.devices.delete(&id).await.map_err(|e| ServiceError::store(e, "Failed to delete device"))?;
        if !removed {
            return Err(ServiceError::not_found("Device"));
        }
        let deleted_scenes = self
            .scenes
            .delete_by_devices(&[id.to_hex()])
            .await
            .map_err(|e| ServiceError::store(e, "Failed to delete device"))?;
        info!(device_id = %id, deleted_scenes, "device_deleted");
        Ok(deleted_scenes)
    }

    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<DeleteAllOutcome, ServiceError> {
        let fail = |e| ServiceError::store(e, "Failed to delete all devices");
        let ids = self.devices.all_ids().await.map_err(fail)?;
        let deleted_scenes = self.scenes.delete_by_devices(&ids).await.map_err(fail)?;
        let deleted_devices = self.devices.delete_all().await.map_err(fail)?;
        info!(deleted_devices, deleted_scenes, "all_devices_deleted");
        Ok(DeleteAllOutcome { deleted_devices, deleted_scenes })
    }
}

fn classify(e: ModelError, failure: &str) -> ServiceError {
    match e {
        ModelError::Duplicate(_) => ServiceError::DuplicateKey(DUPLICATE_IP.to_string()),
        other => ServiceError::store(other, failure),
    }
}
