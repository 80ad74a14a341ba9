use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dealers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub link: String,
    pub location: String,
    pub phone_number: String,
    pub email: String,
    /// Display position. Unique through the deferrable `dealers__order_num__key`
    /// constraint so that two rows can trade values in one statement.
    pub order_num: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
