use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::scene;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::routes::timestamp;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SceneQuery {
    /// Parent device
    pub device_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSceneRequest {
    pub name: String,
    pub device_id: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSceneRequest {
    pub name: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SceneResponse {
    pub id: String,
    pub name: String,
    pub device_id: String,
    pub created_at: String,
}

impl From<scene::Model> for SceneResponse {
    fn from(m: scene::Model) -> Self {
        Self { created_at: timestamp(&m.created_at), id: m.id, name: m.name, device_id: m.device_id }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    get, path = "/scenes", tag = "scenes",
    params(SceneQuery),
    responses(
        (status = 200, description = "Scenes of the device, newest first", body = [SceneResponse]),
        (status = 400, description = "Missing or malformed device ID"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn list(State(state): State<AppState>, ApiQuery(q): ApiQuery<SceneQuery>) -> Result<Json<Vec<SceneResponse>>, ApiError> {
    let scenes = state.scenes.list_by_device(q.device_id.as_deref()).await?;
    Ok(Json(scenes.into_iter().map(SceneResponse::from).collect()))
}

#[utoipa::path(
    post, path = "/scenes", tag = "scenes",
    request_body = CreateSceneRequest,
    responses(
        (status = 201, description = "Created", body = SceneResponse),
        (status = 400, description = "Invalid device ID or Validation Error"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateSceneRequest>,
) -> Result<(StatusCode, Json<SceneResponse>), ApiError> {
    let scene = state.scenes.create(&input.name, &input.device_id).await?;
    Ok((StatusCode::CREATED, Json(scene.into())))
}

#[utoipa::path(
    put, path = "/scenes/{id}", tag = "scenes",
    params(("id" = String, Path, description = "Scene ID")),
    request_body = UpdateSceneRequest,
    responses(
        (status = 200, description = "Updated", body = SceneResponse),
        (status = 400, description = "Invalid ID or Validation Error"),
        (status = 404, description = "Scene or device not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateSceneRequest>,
) -> Result<Json<SceneResponse>, ApiError> {
    let scene = state.scenes.update(&id, input.name.as_deref(), input.device_id.as_deref()).await?;
    Ok(Json(scene.into()))
}

#[utoipa::path(
    delete, path = "/scenes/{id}", tag = "scenes",
    params(("id" = String, Path, description = "Scene ID")),
    responses(
        (status = 200, description = "Deleted; its tests are kept", body = MessageResponse),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Scene not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<MessageResponse>, ApiError> {
    state.scenes.delete(&id).await?;
    Ok(Json(MessageResponse { message: "Scene deleted successfully".into() }))
}
