use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use configs::StatusMode;
use serde::Serialize;
use service::places::domain::{Place, PlaceInput};
use tracing::{error, warn};

use crate::errors::PlainError;
use crate::state::ServerState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AddPlaceResponse {
    pub message: String,
    pub id: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Whether an update/delete that matched nothing should still answer as a success.
fn miss_is_success(mode: StatusMode) -> bool {
    mode == StatusMode::Legacy
}

/// A body that cannot be read as a place. Legacy clients only know the
/// storage failure text, so legacy mode answers 500 with it.
fn unreadable_body(mode: StatusMode, rejection: JsonRejection, message: &'static str) -> PlainError {
    warn!(status = %rejection.status(), reason = %rejection.body_text(), "place body rejected");
    match mode {
        StatusMode::Legacy => PlainError::internal(message),
        StatusMode::Normalized => PlainError { status: rejection.status(), message },
    }
}

#[utoipa::path(
    post, path = "/api/addPlace", tag = "places",
    request_body = crate::openapi::PlaceRequest,
    responses(
        (status = 200, description = "Added", body = AddPlaceResponse),
        (status = 422, description = "Unreadable body, normalized mode only", body = String),
        (status = 500, description = "Storage error or unreadable body", body = String)
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    body: Result<Json<PlaceInput>, JsonRejection>,
) -> Result<Json<AddPlaceResponse>, PlainError> {
    let Json(input) = body.map_err(|r| unreadable_body(state.status_mode, r, "Error adding the place"))?;
    match state.places.add(input).await {
        Ok(id) => Ok(Json(AddPlaceResponse { message: "Place added successfully.".into(), id })),
        Err(e) => {
            error!(err = %e, "add place failed");
            Err(PlainError::internal("Error adding the place"))
        }
    }
}

#[utoipa::path(
    put, path = "/api/updatePlace/{id}", tag = "places",
    params(("id" = i32, Path, description = "Place ID")),
    request_body = crate::openapi::PlaceRequest,
    responses(
        (status = 200, description = "Updated (also for an unknown id in legacy mode)", body = MessageResponse),
        (status = 404, description = "Unknown id, normalized mode only", body = String),
        (status = 422, description = "Unreadable body, normalized mode only", body = String),
        (status = 500, description = "Storage error or unreadable body", body = String)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    body: Result<Json<PlaceInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, PlainError> {
    let Json(input) = body.map_err(|r| unreadable_body(state.status_mode, r, "Error updating the place"))?;
    match state.places.update(id, input).await {
        Ok(matched) if matched || miss_is_success(state.status_mode) => {
            Ok(Json(MessageResponse { message: "Place updated successfully.".into() }))
        }
        Ok(_) => Err(PlainError::not_found()),
        Err(e) => {
            error!(place_id = id, err = %e, "update place failed");
            Err(PlainError::internal("Error updating the place"))
        }
    }
}

#[utoipa::path(
    get, path = "/api/getPlaces", tag = "places",
    responses(
        (status = 200, description = "All places, storage order", body = [crate::openapi::PlaceDoc]),
        (status = 500, description = "Storage error", body = String)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Place>>, PlainError> {
    match state.places.list().await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            error!(err = %e, "list places failed");
            Err(PlainError::internal("Error fetching places"))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/deletePlace/{id}", tag = "places",
    params(("id" = i32, Path, description = "Place ID")),
    responses(
        (status = 200, description = "Deleted (also for an unknown id in legacy mode)", body = String),
        (status = 404, description = "Unknown id, normalized mode only", body = String),
        (status = 500, description = "Storage error", body = String)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<(StatusCode, &'static str), PlainError> {
    match state.places.delete(id).await {
        Ok(removed) if removed || miss_is_success(state.status_mode) => Ok((StatusCode::OK, "Marker deleted")),
        Ok(_) => Err(PlainError::not_found()),
        Err(e) => {
            error!(place_id = id, err = %e, "delete place failed");
            Err(PlainError::internal("Error deleting marker"))
        }
    }
}
