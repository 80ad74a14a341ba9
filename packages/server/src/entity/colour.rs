use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "colours")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique case-insensitively (`colours__name__key` on `lower(name)`).
    pub name: String,
}

impl ActiveModelBehavior for ActiveModel {}
