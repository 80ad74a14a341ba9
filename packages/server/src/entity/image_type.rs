use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    /// When true, uploads of this type are expected at exactly `width` x `height`.
    pub is_specific_dimension: bool,
    pub width: i32,
    pub height: i32,
}

impl ActiveModelBehavior for ActiveModel {}
