use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::device;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::routes::timestamp;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDeviceRequest {
    #[schema(example = "Living room")]
    pub name: String,
    #[schema(example = "192.168.1.10")]
    pub ip: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub ip: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub created_at: String,
}

impl From<device::Model> for DeviceResponse {
    fn from(m: device::Model) -> Self {
        Self { created_at: timestamp(&m.created_at), id: m.id, name: m.name, ip: m.ip }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDeviceResponse {
    pub message: String,
    pub deleted_scenes: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllDevicesResponse {
    pub message: String,
    pub deleted_devices: u64,
    pub deleted_scenes: u64,
}

#[utoipa::path(
    get, path = "/devices", tag = "devices",
    responses(
        (status = 200, description = "All devices, newest first", body = [DeviceResponse]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<DeviceResponse>>, ApiError> {
    let devices = state.devices.list().await?;
    Ok(Json(devices.into_iter().map(DeviceResponse::from).collect()))
}

#[utoipa::path(
    post, path = "/devices", tag = "devices",
    request_body = CreateDeviceRequest,
    responses(
        (status = 201, description = "Created", body = DeviceResponse),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "IP address already in use")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<DeviceResponse>), ApiError> {
    let device = state.devices.create(&input.name, &input.ip).await?;
    Ok((StatusCode::CREATED, Json(device.into())))
}

#[utoipa::path(
    put, path = "/devices/{id}", tag = "devices",
    params(("id" = String, Path, description = "Device ID")),
    request_body = UpdateDeviceRequest,
    responses(
        (status = 200, description = "Updated", body = DeviceResponse),
        (status = 400, description = "Invalid ID or Validation Error"),
        (status = 404, description = "Device not found"),
        (status = 409, description = "IP address already in use")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateDeviceRequest>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let device = state.devices.update(&id, input.name.as_deref(), input.ip.as_deref()).await?;
    Ok(Json(device.into()))
}

#[utoipa::path(
    delete, path = "/devices/{id}", tag = "devices",
    params(("id" = String, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Deleted along with its scenes", body = DeleteDeviceResponse),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<DeleteDeviceResponse>, ApiError> {
    let deleted_scenes = state.devices.delete(&id).await?;
    Ok(Json(DeleteDeviceResponse { message: "Device deleted successfully".into(), deleted_scenes }))
}

#[utoipa::path(
    delete, path = "/devices", tag = "devices",
    responses(
        (status = 200, description = "Every device and its scenes deleted", body = DeleteAllDevicesResponse),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_all(State(state): State<AppState>) -> Result<Json<DeleteAllDevicesResponse>, ApiError> {
    let out = state.devices.delete_all().await?;
    Ok(Json(DeleteAllDevicesResponse {
        message: "All devices and related scenes deleted successfully".into(),
        deleted_devices: out.deleted_devices,
        deleted_scenes: out.deleted_scenes,
    }))
}
