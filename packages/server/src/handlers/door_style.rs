use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{door_style, door_style_door_style_type};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::door_style::{DoorStyleRequest, DoorStyleResponse};
use crate::models::shared::NamedRef;
use crate::state::AppState;

#[derive(Debug, FromQueryResult)]
struct StyleTypeLink {
    door_style_id: i32,
    id: i32,
    name: String,
}

/// Style types of the given door styles, ordered by name, keyed by style id.
async fn style_types_for<C: ConnectionTrait>(
    db: &C,
    door_style_ids: &[i32],
) -> Result<HashMap<i32, Vec<NamedRef>>, DbErr> {
    if door_style_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = (1..=door_style_ids.len())
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT j.door_style_id, t.id, t.name \
         FROM door_style_door_style_types j \
         JOIN door_style_types t ON t.id = j.door_style_type_id \
         WHERE j.door_style_id IN ({placeholders}) \
         ORDER BY lower(t.name), t.id"
    );
    let links = StyleTypeLink::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        door_style_ids.iter().map(|&id| Value::from(id)),
    ))
    .all(db)
    .await?;

    let mut grouped: HashMap<i32, Vec<NamedRef>> = HashMap::new();
    for link in links {
        grouped.entry(link.door_style_id).or_default().push(NamedRef {
            id: link.id,
            name: link.name,
        });
    }
    Ok(grouped)
}

/// Replace a door style's style type links wholesale.
async fn replace_style_types(
    txn: &DatabaseTransaction,
    door_style_id: i32,
    style_type_ids: &[i32],
) -> Result<(), AppError> {
    door_style_door_style_type::Entity::delete_many()
        .filter(door_style_door_style_type::Column::DoorStyleId.eq(door_style_id))
        .exec(txn)
        .await?;

    if style_type_ids.is_empty() {
        return Ok(());
    }

    let links = style_type_ids
        .iter()
        .map(|&type_id| door_style_door_style_type::ActiveModel {
            door_style_id: Set(door_style_id),
            door_style_type_id: Set(type_id),
            ..Default::default()
        });
    door_style_door_style_type::Entity::insert_many(links)
        .exec(txn)
        .await?;
    Ok(())
}

async fn load_door_style<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<DoorStyleResponse, AppError> {
    let ids = [id];
    let (style, mut types) = tokio::try_join!(
        door_style::Entity::find_by_id(id).one(db),
        style_types_for(db, &ids),
    )?;
    let style = style.ok_or_else(|| AppError::NotFound(format!("Door style {id} not found")))?;

    Ok(DoorStyleResponse {
        id: style.id,
        name: style.name,
        style_types: types.remove(&id).unwrap_or_default(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/door-styles",
    tag = "Door Styles",
    operation_id = "listDoorStyles",
    summary = "List door styles with their style types",
    responses(
        (status = 200, description = "Door styles ordered by name", body = Vec<DoorStyleResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_door_styles(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoorStyleResponse>>, AppError> {
    let styles = door_style::Entity::find()
        .from_raw_sql(Statement::from_string(
            DbBackend::Postgres,
            "SELECT id, name FROM door_styles ORDER BY lower(name), id",
        ))
        .all(&state.db)
        .await?;
    let ids: Vec<i32> = styles.iter().map(|s| s.id).collect();
    let mut types = style_types_for(&state.db, &ids).await?;

    let data = styles
        .into_iter()
        .map(|s| DoorStyleResponse {
            style_types: types.remove(&s.id).unwrap_or_default(),
            id: s.id,
            name: s.name,
        })
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/api/v1/door-styles/{id}",
    tag = "Door Styles",
    operation_id = "getDoorStyle",
    summary = "Get a door style by ID",
    params(("id" = i32, Path, description = "Door style ID")),
    responses(
        (status = 200, description = "Door style", body = DoorStyleResponse),
        (status = 404, description = "Door style not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_door_style(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DoorStyleResponse>, AppError> {
    Ok(Json(load_door_style(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/door-styles",
    tag = "Door Styles",
    operation_id = "createDoorStyle",
    summary = "Create a door style",
    description = "Creates the style and links it to `styleTypeIds` in one transaction. Requires an admin token.",
    request_body = DoorStyleRequest,
    responses(
        (status = 201, description = "Door style created", body = DoorStyleResponse),
        (status = 400, description = "Validation error or unknown style type (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Name taken (UNIQUE_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_door_style(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<DoorStyleRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    let (name, style_type_ids) = payload.validate()?;

    let txn = state.db.begin().await?;
    let style = door_style::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    replace_style_types(&txn, style.id, &style_type_ids).await?;
    txn.commit().await?;

    info!(door_style_id = style.id, style_types = style_type_ids.len(), "Door style created");
    Ok((
        StatusCode::CREATED,
        Json(load_door_style(&state.db, style.id).await?),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/door-styles/{id}",
    tag = "Door Styles",
    operation_id = "updateDoorStyle",
    summary = "Update a door style",
    description = "Renames the style and replaces its style types with exactly `styleTypeIds`. Requires an admin token.",
    params(("id" = i32, Path, description = "Door style ID")),
    request_body = DoorStyleRequest,
    responses(
        (status = 200, description = "Door style updated", body = DoorStyleResponse),
        (status = 400, description = "Validation error or unknown style type (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Door style not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name taken (UNIQUE_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_door_style(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<DoorStyleRequest>,
) -> Result<Json<DoorStyleResponse>, AppError> {
    auth_user.require_admin()?;
    let (name, style_type_ids) = payload.validate()?;

    let txn = state.db.begin().await?;
    let result = door_style::Entity::update_many()
        .col_expr(door_style::Column::Name, Expr::value(name))
        .filter(door_style::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    if result.rows_affected != 1 {
        return Err(AppError::NotFound(format!("Door style {id} not found")));
    }
    replace_style_types(&txn, id, &style_type_ids).await?;
    txn.commit().await?;

    Ok(Json(load_door_style(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/door-styles/{id}",
    tag = "Door Styles",
    operation_id = "deleteDoorStyle",
    summary = "Delete a door style",
    description = "Removes the style and its style type links. Fails with CONFLICT while a door sample uses the style. Requires an admin token.",
    params(("id" = i32, Path, description = "Door style ID")),
    responses(
        (status = 204, description = "Door style deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Door style not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Door style in use (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_door_style(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_admin()?;

    let txn = state.db.begin().await?;
    door_style_door_style_type::Entity::delete_many()
        .filter(door_style_door_style_type::Column::DoorStyleId.eq(id))
        .exec(&txn)
        .await?;
    let result = door_style::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected != 1 {
        return Err(AppError::NotFound(format!("Door style {id} not found")));
    }
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
