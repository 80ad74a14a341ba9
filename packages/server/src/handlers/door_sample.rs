use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::{info, instrument};

use crate::catalog::images::ImageOwner;
use crate::catalog::search::{find_door_sample, search_door_samples};
use crate::entity::door_sample;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::door_sample::{DoorSampleQuery, DoorSampleRequest, DoorSampleResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/door-samples",
    tag = "Door Samples",
    operation_id = "searchDoorSamples",
    summary = "List or search door samples",
    description = "Without filters every door sample is returned. With filters a sample matches when ANY selected colour, wood or door style id matches, or when `searchText` occurs in its colour, wood or door style name. Results are ordered by image filename.",
    params(DoorSampleQuery),
    responses(
        (status = 200, description = "Matching door samples", body = Vec<DoorSampleResponse>),
        (status = 400, description = "Malformed id list (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_door_samples(
    State(state): State<AppState>,
    Query(query): Query<DoorSampleQuery>,
) -> Result<Json<Vec<DoorSampleResponse>>, AppError> {
    let search = query.into_search()?;
    Ok(Json(search_door_samples(&state.db, &search).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/door-samples/{id}",
    tag = "Door Samples",
    operation_id = "getDoorSample",
    summary = "Get a door sample by ID",
    params(("id" = i32, Path, description = "Door sample ID")),
    responses(
        (status = 200, description = "Door sample", body = DoorSampleResponse),
        (status = 404, description = "Door sample not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_door_sample(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DoorSampleResponse>, AppError> {
    Ok(Json(find_door_sample(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/door-samples",
    tag = "Door Samples",
    operation_id = "createDoorSample",
    summary = "Create a door sample",
    description = "The image must already be uploaded through a signed URL. Requires an admin token.",
    request_body = DoorSampleRequest,
    responses(
        (status = 201, description = "Door sample created", body = DoorSampleResponse),
        (status = 400, description = "Validation error or unknown reference (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Image filename taken (UNIQUE_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_door_sample(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<DoorSampleRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    let image = payload.validate()?;

    let sample = door_sample::ActiveModel {
        door_style_id: Set(payload.door_style_id),
        wood_id: Set(payload.wood_id),
        colour_id: Set(payload.colour_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    state
        .images()
        .attach(ImageOwner::door_sample(sample.id), &image)
        .await?;

    info!(door_sample_id = sample.id, "Door sample created");
    Ok((
        StatusCode::CREATED,
        Json(find_door_sample(&state.db, sample.id).await?),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/door-samples/{id}",
    tag = "Door Samples",
    operation_id = "updateDoorSample",
    summary = "Update a door sample",
    description = "Updates the image row and the facet references together, then deletes the previous upload when the filename changed. Requires an admin token.",
    params(("id" = i32, Path, description = "Door sample ID")),
    request_body = DoorSampleRequest,
    responses(
        (status = 200, description = "Door sample updated", body = DoorSampleResponse),
        (status = 400, description = "Validation error or unknown reference (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Door sample not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Image filename taken (UNIQUE_CONFLICT)", body = ErrorBody),
        (status = 502, description = "Blob store failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_door_sample(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<DoorSampleRequest>,
) -> Result<Json<DoorSampleResponse>, AppError> {
    auth_user.require_admin()?;
    let image = payload.validate()?;

    let owner = ImageOwner::door_sample(id);
    let txn = state.db.begin().await?;
    let outcome = state.images_on(&txn).replace_row(owner, &image).await?;

    let result = door_sample::Entity::update_many()
        .col_expr(
            door_sample::Column::DoorStyleId,
            Expr::value(payload.door_style_id),
        )
        .col_expr(door_sample::Column::WoodId, Expr::value(payload.wood_id))
        .col_expr(door_sample::Column::ColourId, Expr::value(payload.colour_id))
        .filter(door_sample::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    if result.rows_affected != 1 {
        return Err(AppError::NotFound(format!("Door sample {id} not found")));
    }
    txn.commit().await?;

    state.images().remove_replaced(owner, &outcome).await?;

    Ok(Json(find_door_sample(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/door-samples/{id}",
    tag = "Door Samples",
    operation_id = "deleteDoorSample",
    summary = "Delete a door sample",
    description = "Deletes the uploaded image, then the image row and the door sample together. Safe to retry after an UPSTREAM_ERROR. Requires an admin token.",
    params(("id" = i32, Path, description = "Door sample ID")),
    responses(
        (status = 204, description = "Door sample deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Door sample not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Blob store failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_door_sample(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_admin()?;
    state.images().detach(ImageOwner::door_sample(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
