use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlRequest {
    #[schema(example = "shaker oak.jpg")]
    pub filename: String,
    #[schema(example = "image/jpeg")]
    pub mime_type: String,
}

impl SignedUrlRequest {
    pub fn validate_mime_type(&self) -> Result<&str, AppError> {
        let mime = self.mime_type.trim();
        match mime.split_once('/') {
            Some(("image", subtype)) if !subtype.is_empty() => Ok(mime),
            _ => Err(AppError::Validation(
                "mimeType must be an image type such as image/jpeg".into(),
            )),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    /// URL the client sends the image bytes to with `PUT`.
    pub signed_url: String,
    /// Canonical filename to use in the subsequent catalog write.
    #[schema(example = "shaker%20oak.jpg")]
    pub filename: String,
    /// Object key inside the bucket.
    #[schema(example = "assets/uploads/shaker%20oak.jpg")]
    pub key: String,
    pub expires_in_secs: u32,
}
