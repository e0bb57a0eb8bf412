use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::{devices, scenes, tests};

#[derive(ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    pub timestamp: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        devices::list,
        devices::create,
        devices::update,
        devices::delete,
        devices::delete_all,
        scenes::list,
        scenes::create,
        scenes::update,
        scenes::delete,
        tests::list,
        tests::get,
        tests::create,
        tests::create_bulk,
        tests::start_stop,
    ),
    components(
        schemas(
            HealthResponse,
            devices::CreateDeviceRequest,
            devices::UpdateDeviceRequest,
            devices::DeviceResponse,
            devices::DeleteDeviceResponse,
            devices::DeleteAllDevicesResponse,
            scenes::CreateSceneRequest,
            scenes::UpdateSceneRequest,
            scenes::SceneResponse,
            scenes::MessageResponse,
            tests::CreateTestRequest,
            tests::BulkTestEntry,
            tests::CreateBulkTestsRequest,
            tests::TestResponse,
            tests::FailedTest,
            tests::CreateBulkTestsResponse,
            tests::StartStopResponse,
            models::test::TestState,
        )
    ),
    tags(
        (name = "health"),
        (name = "devices", description = "Devices; deleting one deletes its scenes"),
        (name = "scenes"),
        (name = "tests")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod openapi_tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for p in ["/health", "/devices", "/devices/{id}", "/scenes", "/scenes/{id}", "/tests", "/tests/bulk", "/tests/{id}", "/tests/{id}/start-stop"] {
            assert!(paths.iter().any(|k| k.as_str() == p), "missing {p}");
        }
    }
}
