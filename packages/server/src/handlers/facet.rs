use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::catalog::facets::FacetStore;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::facet::{FacetKind, FacetRequest, FacetResponse};
use crate::models::shared::validate_name;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/{facet}",
    tag = "Facets",
    operation_id = "listFacets",
    summary = "List colours, woods or door style types",
    description = "Returns every facet of the given kind ordered by name.",
    params(("facet" = FacetKind, Path, description = "colours, woods or door-style-types")),
    responses(
        (status = 200, description = "Facets", body = Vec<FacetResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_facets(
    State(state): State<AppState>,
    Extension(kind): Extension<FacetKind>,
) -> Result<Json<Vec<FacetResponse>>, AppError> {
    Ok(Json(FacetStore::new(&state.db, kind).list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/{facet}/{id}",
    tag = "Facets",
    operation_id = "getFacet",
    summary = "Get a facet by ID",
    params(
        ("facet" = FacetKind, Path, description = "colours, woods or door-style-types"),
        ("id" = i32, Path, description = "Facet ID"),
    ),
    responses(
        (status = 200, description = "Facet", body = FacetResponse),
        (status = 404, description = "Facet not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_facet(
    State(state): State<AppState>,
    Extension(kind): Extension<FacetKind>,
    Path(id): Path<i32>,
) -> Result<Json<FacetResponse>, AppError> {
    Ok(Json(FacetStore::new(&state.db, kind).get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/{facet}",
    tag = "Facets",
    operation_id = "createFacet",
    summary = "Create a facet",
    description = "Names are unique case-insensitively within a kind. Requires an admin token.",
    params(("facet" = FacetKind, Path, description = "colours, woods or door-style-types")),
    request_body = FacetRequest,
    responses(
        (status = 201, description = "Facet created", body = FacetResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Name taken (UNIQUE_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_facet(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<FacetKind>,
    AppJson(payload): AppJson<FacetRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    let name = validate_name(&payload.name, "Name")?;

    let facet = FacetStore::new(&state.db, kind).create(&name).await?;
    Ok((StatusCode::CREATED, Json(facet)))
}

#[utoipa::path(
    put,
    path = "/api/v1/{facet}/{id}",
    tag = "Facets",
    operation_id = "updateFacet",
    summary = "Rename a facet",
    description = "Requires an admin token.",
    params(
        ("facet" = FacetKind, Path, description = "colours, woods or door-style-types"),
        ("id" = i32, Path, description = "Facet ID"),
    ),
    request_body = FacetRequest,
    responses(
        (status = 200, description = "Facet renamed", body = FacetResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Facet not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name taken (UNIQUE_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_facet(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<FacetKind>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<FacetRequest>,
) -> Result<Json<FacetResponse>, AppError> {
    auth_user.require_admin()?;
    let name = validate_name(&payload.name, "Name")?;

    Ok(Json(FacetStore::new(&state.db, kind).rename(id, &name).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/{facet}/{id}",
    tag = "Facets",
    operation_id = "deleteFacet",
    summary = "Delete a facet",
    description = "Fails with CONFLICT while a door sample still references the facet. Deleting a door style type also removes it from every door style. Requires an admin token.",
    params(
        ("facet" = FacetKind, Path, description = "colours, woods or door-style-types"),
        ("id" = i32, Path, description = "Facet ID"),
    ),
    responses(
        (status = 204, description = "Facet deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Facet not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Facet still referenced (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_facet(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<FacetKind>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_admin()?;
    FacetStore::new(&state.db, kind).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
