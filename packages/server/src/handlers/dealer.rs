use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::{info, instrument};

use crate::catalog::images::{ImageOwner, OwnerKind, load_images};
use crate::catalog::ordinal::{OrdinalResequencer, find_dealer_for_update, next_order_num};
use crate::entity::dealer;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::dealer::{CreateDealerRequest, DealerResponse, UpdateDealerRequest};
use crate::state::AppState;

async fn load_dealer<C: ConnectionTrait>(db: &C, id: i32) -> Result<DealerResponse, AppError> {
    let model = dealer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dealer {id} not found")))?;
    let mut images = load_images(db, OwnerKind::Dealer, &[id]).await?;
    Ok(DealerResponse::new(model, images.remove(&id)))
}

#[utoipa::path(
    get,
    path = "/api/v1/dealers",
    tag = "Dealers",
    operation_id = "listDealers",
    summary = "List dealers in display order",
    responses(
        (status = 200, description = "Dealers ordered by orderNum", body = Vec<DealerResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_dealers(
    State(state): State<AppState>,
) -> Result<Json<Vec<DealerResponse>>, AppError> {
    let dealers = dealer::Entity::find()
        .order_by_asc(dealer::Column::OrderNum)
        .all(&state.db)
        .await?;
    let ids: Vec<i32> = dealers.iter().map(|d| d.id).collect();
    let mut images = load_images(&state.db, OwnerKind::Dealer, &ids).await?;

    let data = dealers
        .into_iter()
        .map(|d| {
            let image = images.remove(&d.id);
            DealerResponse::new(d, image)
        })
        .collect();
    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/api/v1/dealers/{id}",
    tag = "Dealers",
    operation_id = "getDealer",
    summary = "Get a dealer by ID",
    params(("id" = i32, Path, description = "Dealer ID")),
    responses(
        (status = 200, description = "Dealer", body = DealerResponse),
        (status = 404, description = "Dealer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_dealer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DealerResponse>, AppError> {
    Ok(Json(load_dealer(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/dealers",
    tag = "Dealers",
    operation_id = "createDealer",
    summary = "Create a dealer",
    description = "`orderNum` defaults to one past the current maximum. Requires an admin token.",
    request_body = CreateDealerRequest,
    responses(
        (status = 201, description = "Dealer created", body = DealerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Name, orderNum or image filename taken (UNIQUE_CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_dealer(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDealerRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    let (fields, image) = payload.validate()?;

    let order_num = match payload.order_num {
        Some(n) => n,
        None => next_order_num(&state.db).await?,
    };

    let model = dealer::ActiveModel {
        name: Set(fields.name),
        link: Set(fields.link),
        location: Set(fields.location),
        phone_number: Set(fields.phone_number),
        email: Set(fields.email),
        order_num: Set(order_num),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    state
        .images()
        .attach(ImageOwner::dealer(model.id), &image)
        .await?;

    info!(dealer_id = model.id, order_num, "Dealer created");
    Ok((StatusCode::CREATED, Json(load_dealer(&state.db, model.id).await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/dealers/{id}",
    tag = "Dealers",
    operation_id = "updateDealer",
    summary = "Update a dealer",
    description = "A changed `orderNum` must already belong to another dealer; the two dealers swap positions. Contact fields are replaced and the image is swapped when its filename or size changed. Requires an admin token.",
    params(("id" = i32, Path, description = "Dealer ID")),
    request_body = UpdateDealerRequest,
    responses(
        (status = 200, description = "Dealer updated", body = DealerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Dealer or target orderNum not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name or image filename taken (UNIQUE_CONFLICT)", body = ErrorBody),
        (status = 502, description = "Blob store failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_dealer(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateDealerRequest>,
) -> Result<Json<DealerResponse>, AppError> {
    auth_user.require_admin()?;
    let (fields, image) = payload.validate()?;

    let txn = state.db.begin().await?;
    let existing = find_dealer_for_update(&txn, id).await?;

    OrdinalResequencer::new(&txn)
        .move_to(&existing, payload.order_num)
        .await?;

    let result = dealer::Entity::update_many()
        .col_expr(dealer::Column::Name, Expr::value(fields.name))
        .col_expr(dealer::Column::Link, Expr::value(fields.link))
        .col_expr(dealer::Column::Location, Expr::value(fields.location))
        .col_expr(dealer::Column::PhoneNumber, Expr::value(fields.phone_number))
        .col_expr(dealer::Column::Email, Expr::value(fields.email))
        .filter(dealer::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    if result.rows_affected != 1 {
        return Err(AppError::NotFound(format!("Dealer {id} not found")));
    }

    let owner = ImageOwner::dealer(id);
    let outcome = state.images_on(&txn).replace_row(owner, &image).await?;
    txn.commit().await?;

    state.images().remove_replaced(owner, &outcome).await?;

    Ok(Json(load_dealer(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/dealers/{id}",
    tag = "Dealers",
    operation_id = "deleteDealer",
    summary = "Delete a dealer",
    description = "Deletes the uploaded image, then the image row and the dealer together. The dealer's orderNum is left as a gap. Requires an admin token.",
    params(("id" = i32, Path, description = "Dealer ID")),
    responses(
        (status = 204, description = "Dealer deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Dealer not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Blob store failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_dealer(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_admin()?;
    state.images().detach(ImageOwner::dealer(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
