use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "door_samples")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub door_style_id: i32,
    #[sea_orm(belongs_to, from = "door_style_id", to = "id")]
    pub door_style: HasOne<super::door_style::Entity>,

    pub wood_id: i32,
    #[sea_orm(belongs_to, from = "wood_id", to = "id")]
    pub wood: HasOne<super::wood::Entity>,

    /// NULL for unfinished samples.
    pub colour_id: Option<i32>,
    #[sea_orm(belongs_to, from = "colour_id", to = "id")]
    pub colour: Option<super::colour::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
