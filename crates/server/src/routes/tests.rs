use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::test::{self as test_model, TestState};
use serde::{Deserialize, Serialize};
use service::test::{BulkFailure, BulkItem};
use utoipa::{IntoParams, ToSchema};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::routes::timestamp;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TestQuery {
    /// Parent scene
    pub scene_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestRequest {
    pub name: String,
    pub scene_id: String,
    /// Defaults to `inactive`
    pub state: Option<TestState>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkTestEntry {
    pub name: String,
    pub state: Option<TestState>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBulkTestsRequest {
    pub scene_id: String,
    pub tests: Vec<BulkTestEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestResponse {
    pub id: String,
    pub name: String,
    pub scene_id: String,
    #[schema(example = "inactive")]
    pub state: String,
    pub created_at: String,
}

impl From<test_model::Model> for TestResponse {
    fn from(m: test_model::Model) -> Self {
        Self { created_at: timestamp(&m.created_at), id: m.id, name: m.name, scene_id: m.scene_id, state: m.state }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FailedTest {
    pub name: String,
    pub error: String,
}

impl From<BulkFailure> for FailedTest {
    fn from(f: BulkFailure) -> Self {
        Self { name: f.name, error: f.error }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBulkTestsResponse {
    pub success: bool,
    pub message: String,
    pub created_tests: Vec<TestResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_tests: Vec<FailedTest>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartStopResponse {
    pub id: String,
    pub name: String,
    pub scene_id: String,
    pub state: String,
    pub message: String,
}

#[utoipa::path(
    get, path = "/tests", tag = "tests",
    params(TestQuery),
    responses(
        (status = 200, description = "Tests of the scene, newest first", body = [TestResponse]),
        (status = 400, description = "Missing or malformed scene ID"),
        (status = 404, description = "Scene not found")
    )
)]
pub async fn list(State(state): State<AppState>, ApiQuery(q): ApiQuery<TestQuery>) -> Result<Json<Vec<TestResponse>>, ApiError> {
    let tests = state.tests.list_by_scene(q.scene_id.as_deref()).await?;
    Ok(Json(tests.into_iter().map(TestResponse::from).collect()))
}

#[utoipa::path(
    get, path = "/tests/{id}", tag = "tests",
    params(("id" = String, Path, description = "Test ID")),
    responses(
        (status = 200, description = "OK", body = TestResponse),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Test not found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<TestResponse>, ApiError> {
    Ok(Json(state.tests.get_by_id(&id).await?.into()))
}

#[utoipa::path(
    post, path = "/tests", tag = "tests",
    request_body = CreateTestRequest,
    responses(
        (status = 201, description = "Created", body = TestResponse),
        (status = 400, description = "Invalid scene ID or Validation Error"),
        (status = 404, description = "Scene not found")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateTestRequest>,
) -> Result<(StatusCode, Json<TestResponse>), ApiError> {
    let test = state.tests.create(&input.name, &input.scene_id, input.state).await?;
    Ok((StatusCode::CREATED, Json(test.into())))
}

/// 201 when at least one test was stored, 400 when none were.
#[utoipa::path(
    post, path = "/tests/bulk", tag = "tests",
    request_body = CreateBulkTestsRequest,
    responses(
        (status = 201, description = "Some or all tests created", body = CreateBulkTestsResponse),
        (status = 400, description = "Batch rejected or every entry failed"),
        (status = 404, description = "Scene not found")
    )
)]
pub async fn create_bulk(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateBulkTestsRequest>,
) -> Result<(StatusCode, Json<CreateBulkTestsResponse>), ApiError> {
    let items = input.tests.into_iter().map(|t| BulkItem { name: t.name, state: t.state }).collect();
    let out = state.tests.create_bulk(&input.scene_id, items).await?;

    let status = if out.success() { StatusCode::CREATED } else { StatusCode::BAD_REQUEST };
    let body = CreateBulkTestsResponse {
        success: out.success(),
        message: out.message(),
        created_tests: out.created.into_iter().map(TestResponse::from).collect(),
        failed_tests: out.failed.into_iter().map(FailedTest::from).collect(),
    };
    Ok((status, Json(body)))
}

#[utoipa::path(
    put, path = "/tests/{id}/start-stop", tag = "tests",
    params(("id" = String, Path, description = "Test ID")),
    responses(
        (status = 200, description = "State toggled", body = StartStopResponse),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Test not found")
    )
)]
pub async fn start_stop(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<StartStopResponse>, ApiError> {
    let toggled = state.tests.start_stop(&id).await?;
    let t = toggled.test;
    Ok(Json(StartStopResponse { id: t.id, name: t.name, scene_id: t.scene_id, state: t.state, message: toggled.message.into() }))
}
