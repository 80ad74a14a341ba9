use std::time::Duration;

use axum::Json;
use axum::extract::State;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::upload::{SignedUrlRequest, SignedUrlResponse};
use crate::state::AppState;
use crate::utils::filename::canonical_image_filename;

#[utoipa::path(
    post,
    path = "/api/v1/uploads/signed-url",
    tag = "Uploads",
    operation_id = "createSignedUploadUrl",
    summary = "Get a presigned URL for an image upload",
    description = "Returns a short-lived URL the client `PUT`s the image bytes to with a `Content-Type` equal to `mimeType`, together with the canonical filename to send in the following catalog write. Requires an admin token.",
    request_body = SignedUrlRequest,
    responses(
        (status = 200, description = "Signed URL issued", body = SignedUrlResponse),
        (status = 400, description = "Invalid filename or MIME type (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 502, description = "Blob store failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_signed_url(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignedUrlRequest>,
) -> Result<Json<SignedUrlResponse>, AppError> {
    auth_user.require_admin()?;
    let mime_type = payload.validate_mime_type()?;
    let filename = canonical_image_filename(&payload.filename)
        .map_err(|e| AppError::Validation(e.message().into()))?;

    let expires_in_secs = state.config.storage.presign_expiry_secs;
    let (key, signed_url) = state
        .images()
        .presign_upload(
            &filename,
            mime_type,
            Duration::from_secs(u64::from(expires_in_secs)),
        )
        .await?;

    info!(key = %key, by = %auth_user.username, "Issued upload URL");
    Ok(Json(SignedUrlResponse {
        signed_url,
        filename,
        key: key.to_string(),
        expires_in_secs,
    }))
}
