use super::models::{Device, DeviceUpdate};
use super::services;
use crate::common::auth::Role;
use crate::common::errors::{BusinessError, DbErrorExt};
use crate::common::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_keycloak_auth::{PassthroughMode, layer::KeycloakAuthLayer};
use sea_orm::DatabaseConnection;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    let read_router = OpenApiRouter::new()
        .routes(routes!(get_waiting_activation))
        .routes(routes!(get_available_for_sale))
        .with_state(state.db.clone());

    let mut mutating_router = OpenApiRouter::new()
        .routes(routes!(update_device, delete_device))
        .with_state(state.db.clone());

    if let Some(instance) = state.keycloak_auth_instance.clone() {
        mutating_router = mutating_router.layer(
            KeycloakAuthLayer::<Role>::builder()
                .instance(instance)
                .passthrough_mode(PassthroughMode::Block)
                .persist_raw_claims(false)
                .expected_audiences(vec![String::from("account")])
                .required_roles(vec![Role::Administrator])
                .build(),
        );
    } else if !state.config.tests_running {
        tracing::warn!("Mutating routes of the devices router are not protected");
    }

    read_router.merge(mutating_router)
}

#[utoipa::path(
    get,
    path = "/waiting-activation",
    responses(
        (status = 200, description = "Devices whose SIM is waiting for activation", body = Vec<Device>),
        (status = 500, description = "Internal server error")
    ),
    tag = "devices",
    summary = "List devices waiting for activation",
    description = "Returns every device whose SIM has the status 'Waiting for activation'."
)]
pub async fn get_waiting_activation(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<Device>>, BusinessError> {
    let devices = services::find_waiting_activation(&db)
        .await
        .map_err(|e| e.to_business_error("device"))?;

    Ok(Json(devices))
}

#[utoipa::path(
    get,
    path = "/available-for-sale",
    responses(
        (status = 200, description = "Sellable devices ordered by SIM id", body = Vec<Device>),
        (status = 500, description = "Internal server error")
    ),
    tag = "devices",
    summary = "List devices available for sale",
    description = "A device can be sold when its status is READY, it has a SIM, and its temperature is between -25 and 85 degrees Celsius."
)]
pub async fn get_available_for_sale(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<Device>>, BusinessError> {
    let devices = services::find_available_for_sale(&db)
        .await
        .map_err(|e| e.to_business_error("device"))?;

    Ok(Json(devices))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(
        ("id" = i64, Path, description = "Device ID to update")
    ),
    request_body = DeviceUpdate,
    responses(
        (status = 200, description = "Device updated", body = Device),
        (status = 400, description = "Referenced SIM does not exist"),
        (status = 404, description = "Device not found"),
        (status = 409, description = "SIM is already attached to another device"),
        (status = 500, description = "Internal server error")
    ),
    tag = "devices",
    summary = "Replace a device",
    description = "Overwrites status, temperature and SIM of the device. The id in the path selects the device; an id in the body is ignored."
)]
pub async fn update_device(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    Json(update): Json<DeviceUpdate>,
) -> Result<Json<Device>, BusinessError> {
    let device = services::update_device(&db, id, update).await?;
    tracing::info!("Updated device {id}");
    Ok(Json(device))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(
        ("id" = i64, Path, description = "Device ID to delete")
    ),
    responses(
        (status = 200, description = "Device deleted"),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "devices",
    summary = "Delete a device",
    description = "Removes the device. Its SIM card is kept."
)]
pub async fn delete_device(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> Result<StatusCode, BusinessError> {
    services::delete_device(&db, id).await?;
    tracing::info!("Deleted device {id}");
    Ok(StatusCode::OK)
}
