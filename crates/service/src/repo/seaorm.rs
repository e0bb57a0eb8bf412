//! SeaORM-backed repositories. Each holds a clone of the pooled connection.

use async_trait::async_trait;
use models::errors::ModelError;
use models::object_id::ObjectId;
use models::{device, scene, test};
use sea_orm::DatabaseConnection;

use crate::device::repository::DeviceRepository;
use crate::scene::repository::SceneRepository;
use crate::test::repository::TestRepository;

#[derive(Clone)]
pub struct SeaOrmDeviceRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl DeviceRepository for SeaOrmDeviceRepository {
    async fn list(&self) -> Result<Vec<device::Model>, ModelError> {
        device::list_newest_first(&self.db).await
    }

    async fn find(&self, id: &ObjectId) -> Result<Option<device::Model>, ModelError> {
        device::find(&self.db, id).await
    }

    async fn create(&self, input: device::NewDevice) -> Result<device::Model, ModelError> {
        device::create(&self.db, input).await
    }

    async fn update(&self, id: &ObjectId, patch: device::DevicePatch) -> Result<Option<device::Model>, ModelError> {
        device::update(&self.db, id, patch).await
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, ModelError> {
        device::delete(&self.db, id).await
    }

    async fn all_ids(&self) -> Result<Vec<String>, ModelError> {
        device::all_ids(&self.db).await
    }

    async fn delete_all(&self) -> Result<u64, ModelError> {
        device::delete_all(&self.db).await
    }
}

#[derive(Clone)]
pub struct SeaOrmSceneRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl SceneRepository for SeaOrmSceneRepository {
    async fn list_by_device(&self, device_id: &ObjectId) -> Result<Vec<scene::Model>, ModelError> {
        scene::list_by_device(&self.db, device_id).await
    }

    async fn find(&self, id: &ObjectId) -> Result<Option<scene::Model>, ModelError> {
        scene::find(&self.db, id).await
    }

    async fn create(&self, input: scene::NewScene) -> Result<scene::Model, ModelError> {
        scene::create(&self.db, input).await
    }

    async fn update(&self, id: &ObjectId, patch: scene::ScenePatch) -> Result<Option<scene::Model>, ModelError> {
        scene::update(&self.db, id, patch).await
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, ModelError> {
        scene::delete(&self.db, id).await
    }

    async fn delete_by_devices(&self, device_ids: &[String]) -> Result<u64, ModelError> {
        scene::delete_by_devices(&self.db, device_ids).await
    }
}

#[derive(Clone)]
pub struct SeaOrmTestRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TestRepository for SeaOrmTestRepository {
    async fn list_by_scene(&self, scene_id: &ObjectId) -> Result<Vec<test::Model>, ModelError> {
        test::list_by_scene(&self.db, scene_id).await
    }

    async fn find(&self, id: &ObjectId) -> Result<Option<test::Model>, ModelError> {
        test::find(&self.db, id).await
    }

    async fn create(&self, input: test::NewTest) -> Result<test::Model, ModelError> {
        test::create(&self.db, input).await
    }

    async fn toggle_state(&self, id: &ObjectId) -> Result<Option<test::Model>, ModelError> {
        test::toggle_state(&self.db, id).await
    }
}
