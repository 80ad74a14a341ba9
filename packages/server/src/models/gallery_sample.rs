use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::{ImageInput, ImageResponse};

#[derive(Deserialize, ToSchema)]
pub struct GallerySampleRequest {
    pub image: ImageInput,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GallerySampleResponse {
    pub id: i32,
    pub image: Option<ImageResponse>,
    pub created_at: DateTime<Utc>,
}
