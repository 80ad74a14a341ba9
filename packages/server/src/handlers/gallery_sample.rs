use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::catalog::images::{ImageOwner, OwnerKind, load_images};
use crate::entity::gallery_sample;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::gallery_sample::{GallerySampleRequest, GallerySampleResponse};
use crate::state::AppState;

async fn load_gallery_sample<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<GallerySampleResponse, AppError> {
    let model = gallery_sample::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gallery sample {id} not found")))?;
    let mut images = load_images(db, OwnerKind::GallerySample, &[id]).await?;
    Ok(GallerySampleResponse {
        id: model.id,
        image: images.remove(&id),
        created_at: model.created_at,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/gallery-samples",
    tag = "Gallery Samples",
    operation_id = "listGallerySamples",
    summary = "List gallery samples",
    responses(
        (status = 200, description = "Gallery samples, oldest first", body = Vec<GallerySampleResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_gallery_samples(
    State(state): State<AppState>,
) -> Result<Json<Vec<GallerySampleResponse>>, AppError> {
    let samples = gallery_sample::Entity::find()
        .order_by_asc(gallery_sample::Column::CreatedAt)
        .order_by_asc(gallery_sample::Column::Id)
        .all(&state.db)
        .await?;
    let ids: Vec<i32> = samples.iter().map(|s| s.id).collect();
    let mut images = load_images(&state.db, OwnerKind::GallerySample, &ids).await?;

    let data = samples
        .into_iter()
        .map(|s| GallerySampleResponse {
            image: images.remove(&s.id),
            id: s.id,
            created_at: s.created_at,
        })
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/api/v1/gallery-samples/{id}",
    tag = "Gallery Samples",
    operation_id = "getGallerySample",
    summary = "Get a gallery sample by ID",
    params(("id" = i32, Path, description = "Gallery sample ID")),
    responses(
        (status = 200, description = "Gallery sample", body = GallerySampleResponse),
        (status = 404, description = "Gallery sample not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_gallery_sample(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GallerySampleResponse>, AppError> {
    Ok(Json(load_gallery_sample(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/gallery-samples",
    tag = "Gallery Samples",
    operation_id = "createGallerySample",
    summary = "Create a gallery sample",
    description = "Requires an admin token.",
    request_body = GallerySampleRequest,
    responses(
        (status = 201, description = "Gallery sample created", body = GallerySampleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Image filename taken (UNIQUE_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_gallery_sample(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<GallerySampleRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    let image = payload.image.validate()?;

    let sample = gallery_sample::ActiveModel {
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    state
        .images()
        .attach(ImageOwner::gallery_sample(sample.id), &image)
        .await?;

    info!(gallery_sample_id = sample.id, "Gallery sample created");
    Ok((
        StatusCode::CREATED,
        Json(load_gallery_sample(&state.db, sample.id).await?),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/gallery-samples/{id}",
    tag = "Gallery Samples",
    operation_id = "updateGallerySample",
    summary = "Replace a gallery sample's image",
    description = "Requires an admin token.",
    params(("id" = i32, Path, description = "Gallery sample ID")),
    request_body = GallerySampleRequest,
    responses(
        (status = 200, description = "Gallery sample updated", body = GallerySampleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Gallery sample not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Image filename taken (UNIQUE_CONFLICT)", body = ErrorBody),
        (status = 502, description = "Blob store failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_gallery_sample(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<GallerySampleRequest>,
) -> Result<Json<GallerySampleResponse>, AppError> {
    auth_user.require_admin()?;
    let image = payload.image.validate()?;

    state
        .images()
        .replace(ImageOwner::gallery_sample(id), &image)
        .await?;

    Ok(Json(load_gallery_sample(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/gallery-samples/{id}",
    tag = "Gallery Samples",
    operation_id = "deleteGallerySample",
    summary = "Delete a gallery sample",
    description = "Deletes the uploaded image, then the image row and the gallery sample together. Requires an admin token.",
    params(("id" = i32, Path, description = "Gallery sample ID")),
    responses(
        (status = 204, description = "Gallery sample deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Gallery sample not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Blob store failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_gallery_sample(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_admin()?;
    state
        .images()
        .detach(ImageOwner::gallery_sample(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
