use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction between a door style and its style types.
///
/// Rewritten wholesale on every door style update.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "door_style_door_style_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub door_style_id: i32,
    #[sea_orm(belongs_to, from = "door_style_id", to = "id")]
    pub door_style: HasOne<super::door_style::Entity>,

    pub door_style_type_id: i32,
    #[sea_orm(belongs_to, from = "door_style_type_id", to = "id")]
    pub door_style_type: HasOne<super::door_style_type::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
