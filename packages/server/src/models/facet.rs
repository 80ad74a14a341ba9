use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which simple named facet a request addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FacetKind {
    Colours,
    Woods,
    DoorStyleTypes,
}

impl FacetKind {
    pub fn table(self) -> &'static str {
        match self {
            FacetKind::Colours => "colours",
            FacetKind::Woods => "woods",
            FacetKind::DoorStyleTypes => "door_style_types",
        }
    }

    /// Singular label used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            FacetKind::Colours => "Colour",
            FacetKind::Woods => "Wood",
            FacetKind::DoorStyleTypes => "Door style type",
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct FacetRequest {
    #[schema(example = "Oak")]
    pub name: String,
}

#[derive(Serialize, ToSchema, Debug, sea_orm::FromQueryResult)]
pub struct FacetResponse {
    pub id: i32,
    pub name: String,
}
