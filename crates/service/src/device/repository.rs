use async_trait::async_trait;
use models::device::{DevicePatch, Model, NewDevice};
use models::errors::ModelError;
use models::object_id::ObjectId;

/// Persistence for devices.
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Result<Vec<Model>, ModelError>;
    async fn find(&self, id: &ObjectId) -> Result<Option<Model>, ModelError>;
    async fn create(&self, input: NewDevice) -> Result<Model, ModelError>;
    async fn update(&self, id: &ObjectId, patch: DevicePatch) -> Result<Option<Model>, ModelError>;
    async fn delete(&self, id: &ObjectId) -> Result<bool, ModelError>;
    async fn all_ids(&self) -> Result<Vec<String>, ModelError>;
    async fn delete_all(&self) -> Result<u64, ModelError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Default)]
    pub struct MockDeviceRepository {
        rows: Mutex<Vec<Model>>,
    }

    impl MockDeviceRepository {
        fn rows(&self) -> MutexGuard<'_, Vec<Model>> {
            self.rows.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn ip_taken(rows: &[Model], ip: &str, except: Option<&str>) -> bool {
            rows.iter().any(|d| d.ip == ip && Some(d.id.as_str()) != except)
        }
    }

    #[async_trait]
    impl DeviceRepository for MockDeviceRepository {
        async fn list(&self) -> Result<Vec<Model>, ModelError> {
            let mut all = self.rows().clone();
            all.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
            Ok(all)
        }

        async fn find(&self, id: &ObjectId) -> Result<Option<Model>, ModelError> {
            let hex = id.to_hex();
            Ok(self.rows().iter().find(|d| d.id == hex).cloned())
        }

        async fn create(&self, input: NewDevice) -> Result<Model, ModelError> {
            let mut rows = self.rows();
            if Self::ip_taken(&rows, &input.ip, None) {
                return Err(ModelError::Duplicate("devices.ip".into()));
            }
            let model = input.into_model();
            rows.push(model.clone());
            Ok(model)
        }

        async fn update(&self, id: &ObjectId, patch: DevicePatch) -> Result<Option<Model>, ModelError> {
            let hex = id.to_hex();
            let mut rows = self.rows();
            if let Some(ip) = &patch.ip {
                if Self::ip_taken(&rows, ip, Some(&hex)) {
                    return Err(ModelError::Duplicate("devices.ip".into()));
                }
            }
            let Some(row) = rows.iter_mut().find(|d| d.id == hex) else {
                return Ok(None);
            };
            patch.apply(row);
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: &ObjectId) -> Result<bool, ModelError> {
            let hex = id.to_hex();
            let mut rows = self.rows();
            let before = rows.len();
            rows.retain(|d| d.id != hex);
            Ok(rows.len() < before)
        }

        async fn all_ids(&self) -> Result<Vec<String>, ModelError> {
            Ok(self.rows().iter().map(|d| d.id.clone()).collect())
        }

        async fn delete_all(&self) -> Result<u64, ModelError> {
            let mut rows = self.rows();
            let n = rows.len() as u64;
            rows.clear();
            Ok(n)
        }
    }
}
