use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::device::DeviceService;
use service::repo::seaorm::{SeaOrmDeviceRepository, SeaOrmSceneRepository, SeaOrmTestRepository};
use service::scene::SceneService;
use service::test::TestService;

/// Shared by every handler; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub devices: Arc<DeviceService>,
    pub scenes: Arc<SceneService>,
    pub tests: Arc<TestService>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let device_repo = Arc::new(SeaOrmDeviceRepository { db: db.clone() });
        let scene_repo = Arc::new(SeaOrmSceneRepository { db: db.clone() });
        let test_repo = Arc::new(SeaOrmTestRepository { db });
        Self {
            devices: Arc::new(DeviceService::new(device_repo.clone(), scene_repo.clone())),
            scenes: Arc::new(SceneService::new(scene_repo.clone(), device_repo)),
            tests: Arc::new(TestService::new(test_repo, scene_repo)),
        }
    }
}
