use std::sync::Arc;

use models::object_id::ObjectId;
use models::scene::{Model, NewScene, ScenePatch};
use tracing::{info, instrument};

use super::repository::SceneRepository;
use crate::device::repository::DeviceRepository;
use crate::errors::{parse_id, require_id, ServiceError};

const INVALID_ID: &str = "Invalid scene ID format";
const DEVICE_REQUIRED: &str = "Device ID is required";
const DEVICE_INVALID: &str = "Invalid device ID format";

/// Scene CRUD. The parent device must exist at write time; deleting a scene
/// leaves its tests in place.
pub struct SceneService {
    scenes: Arc<dyn SceneRepository>,
    devices: Arc<dyn DeviceRepository>,
}

impl SceneService {
    pub fn new(scenes: Arc<dyn SceneRepository>, devices: Arc<dyn DeviceRepository>) -> Self {
        Self { scenes, devices }
    }

    async fn ensure_device(&self, id: &ObjectId) -> Result<(), ServiceError> {
        match self.devices.find(id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ServiceError::not_found("Device")),
            Err(e) => Err(ServiceError::store(e, "Failed to look up device")),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_by_device(&self, device_id: Option<&str>) -> Result<Vec<Model>, ServiceError> {
        let device_id = require_id(device_id, DEVICE_REQUIRED, DEVICE_INVALID)?;
        self.ensure_device(&device_id).await?;
        self.scenes
            .list_by_device(&device_id)
            .await
            .map_err(|e| ServiceError::store(e, "Failed to fetch scenes"))
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, device_id: &str) -> Result<Model, ServiceError> {
        let parent = parse_id(device_id, DEVICE_INVALID)?;
        self.ensure_device(&parent).await?;
        let input = NewScene::validated(name, device_id)?;
        let scene = self
            .scenes
            .create(input)
            .await
            .map_err(|e| ServiceError::store(e, "Failed to create scene"))?;
        info!(scene_id = %scene.id, device_id = %scene.device_id, "scene_created");
        Ok(scene)
    }

    /// A supplied non-empty `device_id` is checked for shape and existence;
    /// an empty one fails field validation.
    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, name: Option<&str>, device_id: Option<&str>) -> Result<Model, ServiceError> {
        let id = parse_id(id, INVALID_ID)?;
        if let Some(raw) = device_id.filter(|d| !d.is_empty()) {
            let parent = parse_id(raw, DEVICE_INVALID)?;
            self.ensure_device(&parent).await?;
        }
        let patch = ScenePatch::validated(name, device_id)?;
        let scene = self
            .scenes
            .update(&id, patch)
            .await
            .map_err(|e| ServiceError::store(e, "Failed to update scene"))?
            .ok_or_else(|| ServiceError::not_found("Scene"))?;
        info!(scene_id = %scene.id, "scene_updated");
        Ok(scene)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id, INVALID_ID)?;
        let removed = self
            .scenes
            .delete(&id)
            .await
            .map_err(|e| ServiceError::store(e, "Failed to delete scene"))?;
        if !removed {
            return Err(ServiceError::not_found("Scene"));
        }
        info!(scene_id = %id, "scene_deleted");
        Ok(())
    }
}
