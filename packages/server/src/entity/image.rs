use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An uploaded image and the catalog item that owns it.
///
/// `filename` is the canonical (URL-escaped) name and doubles as the object
/// key suffix in the blob store. Exactly one owner column is set, enforced by
/// the `images__owner__check` constraint.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub filename: String,
    /// Size in bytes as reported by the client.
    pub size: i64,

    pub image_type_id: i32,
    #[sea_orm(belongs_to, from = "image_type_id", to = "id")]
    pub image_type: HasOne<super::image_type::Entity>,

    pub door_sample_id: Option<i32>,
    #[sea_orm(belongs_to, from = "door_sample_id", to = "id")]
    pub door_sample: Option<super::door_sample::Entity>,

    pub gallery_sample_id: Option<i32>,
    #[sea_orm(belongs_to, from = "gallery_sample_id", to = "id")]
    pub gallery_sample: Option<super::gallery_sample::Entity>,

    pub dealer_id: Option<i32>,
    #[sea_orm(belongs_to, from = "dealer_id", to = "id")]
    pub dealer: Option<super::dealer::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
