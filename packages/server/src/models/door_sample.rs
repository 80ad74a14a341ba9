use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::shared::{ImageDescriptor, ImageInput, ImageResponse, NamedRef, parse_id_list};
use crate::catalog::search::DoorSampleSearch;
use crate::error::AppError;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoorSampleRequest {
    pub door_style_id: i32,
    pub wood_id: i32,
    /// Omit or null for an unfinished sample.
    #[serde(default)]
    pub colour_id: Option<i32>,
    pub image: ImageInput,
}

impl DoorSampleRequest {
    pub fn validate(&self) -> Result<ImageDescriptor, AppError> {
        self.image.validate()
    }
}

/// Door sample filter. Every id and the text term is OR-ed together.
#[derive(Deserialize, IntoParams, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DoorSampleQuery {
    /// Colour ids, e.g. `1,2` or `[1,2]`.
    pub colour_ids: Option<String>,
    /// Wood ids.
    pub wood_ids: Option<String>,
    /// Door style ids.
    pub door_style_ids: Option<String>,
    /// Case-insensitive match against colour, wood and door style names.
    pub search_text: Option<String>,
}

impl DoorSampleQuery {
    pub fn into_search(self) -> Result<DoorSampleSearch, AppError> {
        Ok(DoorSampleSearch {
            colour_ids: parse_id_list(self.colour_ids.as_deref(), "colourIds")?,
            wood_ids: parse_id_list(self.wood_ids.as_deref(), "woodIds")?,
            door_style_ids: parse_id_list(self.door_style_ids.as_deref(), "doorStyleIds")?,
            search_text: self.search_text.unwrap_or_default(),
        })
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DoorSampleResponse {
    pub id: i32,
    pub door_style: NamedRef,
    pub wood: NamedRef,
    pub colour: Option<NamedRef>,
    pub image: ImageResponse,
    pub created_at: DateTime<Utc>,
}
