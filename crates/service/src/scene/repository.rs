use async_trait::async_trait;
use models::errors::ModelError;
use models::object_id::ObjectId;
use models::scene::{Model, NewScene, ScenePatch};

/// Persistence for scenes. Device references are not enforced here.
#[async_trait]
pub trait SceneRepository: Send + Sync {
    async fn list_by_device(&self, device_id: &ObjectId) -> Result<Vec<Model>, ModelError>;
    async fn find(&self, id: &ObjectId) -> Result<Option<Model>, ModelError>;
    async fn create(&self, input: NewScene) -> Result<Model, ModelError>;
    async fn update(&self, id: &ObjectId, patch: ScenePatch) -> Result<Option<Model>, ModelError>;
    async fn delete(&self, id: &ObjectId) -> Result<bool, ModelError>;
    /// Returns how many scenes were removed.
    async fn delete_by_devices(&self, device_ids: &[String]) -> Result<u64, ModelError>;
}

pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Default)]
    pub struct MockSceneRepository {
        rows: Mutex<Vec<Model>>,
    }

    impl MockSceneRepository {
        fn rows(&self) -> MutexGuard<'_, Vec<Model>> {
            self.rows.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl SceneRepository for MockSceneRepository {
        async fn list_by_device(&self, device_id: &ObjectId) -> Result<Vec<Model>, ModelError> {
            let hex = device_id.to_hex();
            let mut found: Vec<Model> = self.rows().iter().filter(|s| s.device_id == hex).cloned().collect();
            found.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
            Ok(found)
        }

        async fn find(&self, id: &ObjectId) -> Result<Option<Model>, ModelError> {
            let hex = id.to_hex();
            Ok(self.rows().iter().find(|s| s.id == hex).cloned())
        }

        async fn create(&self, input: NewScene) -> Result<Model, ModelError> {
            let model = input.into_model();
            self.rows().push(model.clone());
            Ok(model)
        }

        async fn update(&self, id: &ObjectId, patch: ScenePatch) -> Result<Option<Model>, ModelError> {
            let hex = id.to_hex();
            let mut rows = self.rows();
            let Some(row) = rows.iter_mut().find(|s| s.id == hex) else {
                return Ok(None);
            };
            patch.apply(row);
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: &ObjectId) -> Result<bool, ModelError> {
            let hex = id.to_hex();
            let mut rows = self.rows();
            let before = rows.len();
            rows.retain(|s| s.id != hex);
            Ok(rows.len() < before)
        }

        async fn delete_by_devices(&self, device_ids: &[String]) -> Result<u64, ModelError> {
            let mut rows = self.rows();
            let before = rows.len();
            rows.retain(|s| !device_ids.contains(&s.device_id));
            Ok((before - rows.len()) as u64)
        }
    }
}
