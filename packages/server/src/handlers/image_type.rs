use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::image_type;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::image_type::{ImageTypeRequest, ImageTypeResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/image-types",
    tag = "Image Types",
    operation_id = "listImageTypes",
    summary = "List image types",
    responses(
        (status = 200, description = "Image types ordered by name", body = Vec<ImageTypeResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_image_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<ImageTypeResponse>>, AppError> {
    let types = image_type::Entity::find()
        .order_by_asc(image_type::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(types.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/image-types/{id}",
    tag = "Image Types",
    operation_id = "getImageType",
    summary = "Get an image type by ID",
    params(("id" = i32, Path, description = "Image type ID")),
    responses(
        (status = 200, description = "Image type", body = ImageTypeResponse),
        (status = 404, description = "Image type not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_image_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ImageTypeResponse>, AppError> {
    Ok(Json(find_image_type(&state.db, id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/image-types",
    tag = "Image Types",
    operation_id = "createImageType",
    summary = "Create an image type",
    description = "Requires an admin token.",
    request_body = ImageTypeRequest,
    responses(
        (status = 201, description = "Image type created", body = ImageTypeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Name taken (UNIQUE_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_image_type(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ImageTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    let name = payload.validate()?;

    let model = image_type::ActiveModel {
        name: Set(name),
        is_specific_dimension: Set(payload.is_specific_dimension),
        width: Set(payload.width),
        height: Set(payload.height),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(ImageTypeResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/api/v1/image-types/{id}",
    tag = "Image Types",
    operation_id = "updateImageType",
    summary = "Update an image type",
    description = "Replaces every field. Requires an admin token.",
    params(("id" = i32, Path, description = "Image type ID")),
    request_body = ImageTypeRequest,
    responses(
        (status = 200, description = "Image type updated", body = ImageTypeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Image type not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name taken (UNIQUE_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_image_type(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ImageTypeRequest>,
) -> Result<Json<ImageTypeResponse>, AppError> {
    auth_user.require_admin()?;
    let name = payload.validate()?;

    let result = image_type::Entity::update_many()
        .col_expr(image_type::Column::Name, Expr::value(name))
        .col_expr(
            image_type::Column::IsSpecificDimension,
            Expr::value(payload.is_specific_dimension),
        )
        .col_expr(image_type::Column::Width, Expr::value(payload.width))
        .col_expr(image_type::Column::Height, Expr::value(payload.height))
        .filter(image_type::Column::Id.eq(id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Image type {id} not found")));
    }

    Ok(Json(find_image_type(&state.db, id).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/image-types/{id}",
    tag = "Image Types",
    operation_id = "deleteImageType",
    summary = "Delete an image type",
    description = "Fails with CONFLICT while an image uses the type. Requires an admin token.",
    params(("id" = i32, Path, description = "Image type ID")),
    responses(
        (status = 204, description = "Image type deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Image type not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Image type in use (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_image_type(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_admin()?;

    let result = image_type::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Image type {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_image_type<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<image_type::Model, AppError> {
    image_type::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Image type {id} not found")))
}
