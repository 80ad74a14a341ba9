use serde::Deserialize;
use utoipa::ToSchema;

use super::shared::validate_name;
use crate::error::AppError;

pub use super::shared::ImageTypeResponse;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageTypeRequest {
    #[schema(example = "Thumbnail")]
    pub name: String,
    #[serde(default)]
    pub is_specific_dimension: bool,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

impl ImageTypeRequest {
    /// Returns the trimmed name.
    pub fn validate(&self) -> Result<String, AppError> {
        let name = validate_name(&self.name, "Name")?;
        if self.width < 0 || self.height < 0 {
            return Err(AppError::Validation(
                "Width and height must be >= 0".into(),
            ));
        }
        if self.is_specific_dimension && (self.width == 0 || self.height == 0) {
            return Err(AppError::Validation(
                "Width and height are required when isSpecificDimension is set".into(),
            ));
        }
        Ok(name)
    }
}
