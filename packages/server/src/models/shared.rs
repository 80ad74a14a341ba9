use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::image_type;
use crate::error::AppError;
use crate::utils::filename::canonical_image_filename;

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Validate and trim a display name (1-100 Unicode characters).
pub fn validate_name(name: &str, what: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return Err(AppError::Validation(format!(
            "{what} must be 1-100 characters"
        )));
    }
    Ok(name.to_string())
}

/// Parse an id-list query parameter. Accepts `1,2,3` and `[1,2,3]`.
pub fn parse_id_list(raw: Option<&str>, what: &str) -> Result<Vec<i32>, AppError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let inner = raw.trim();
    let inner = inner
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(inner);

    let mut ids = Vec::new();
    for part in inner.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = part
            .parse::<i32>()
            .map_err(|_| AppError::Validation(format!("{what} must be a list of integer ids")))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Image descriptor carried by every composite catalog write.
#[derive(Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    /// Filename the client uploaded to through a presigned URL.
    #[schema(example = "shaker-oak.jpg")]
    pub filename: String,
    /// Size in bytes.
    #[schema(example = 48213)]
    pub size: i64,
    pub image_type_id: i32,
}

/// Validated image descriptor with a canonical filename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub filename: String,
    pub size: i64,
    pub image_type_id: i32,
}

impl ImageInput {
    pub fn validate(&self) -> Result<ImageDescriptor, AppError> {
        let filename = canonical_image_filename(&self.filename)
            .map_err(|e| AppError::Validation(e.message().into()))?;
        if self.size <= 0 {
            return Err(AppError::Validation("Image size must be positive".into()));
        }
        Ok(ImageDescriptor {
            filename,
            size: self.size,
            image_type_id: self.image_type_id,
        })
    }
}

/// A facet reference embedded by value in aggregate responses.
#[derive(Serialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct NamedRef {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImageTypeResponse {
    pub id: i32,
    pub name: String,
    pub is_specific_dimension: bool,
    pub width: i32,
    pub height: i32,
}

impl From<image_type::Model> for ImageTypeResponse {
    fn from(m: image_type::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            is_specific_dimension: m.is_specific_dimension,
            width: m.width,
            height: m.height,
        }
    }
}

#[derive(Serialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: i32,
    pub filename: String,
    pub size: i64,
    pub image_type: ImageTypeResponse,
}
