use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::{NamedRef, validate_name};
use crate::error::AppError;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoorStyleRequest {
    #[schema(example = "Shaker")]
    pub name: String,
    /// Complete set of style type ids. Replaces the current set on update.
    #[serde(default)]
    pub style_type_ids: Vec<i32>,
}

impl DoorStyleRequest {
    /// Returns the trimmed name and the de-duplicated style type ids.
    pub fn validate(&self) -> Result<(String, Vec<i32>), AppError> {
        let name = validate_name(&self.name, "Name")?;
        let mut ids: Vec<i32> = Vec::with_capacity(self.style_type_ids.len());
        for &id in &self.style_type_ids {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok((name, ids))
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DoorStyleResponse {
    pub id: i32,
    pub name: String,
    pub style_types: Vec<NamedRef>,
}
