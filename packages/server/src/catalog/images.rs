//! Image lifecycle.
//!
//! Keeps image rows and blob store objects consistent for the catalog items
//! that own them. The two stores never share a transaction, so each
//! operation orders its steps to make the failure window leak a blob rather
//! than leave a row pointing at a missing object.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::Utc;
use common::storage::{BlobStore, ObjectKey};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionSession, TransactionTrait,
};
use tracing::{info, warn};

use crate::entity::{dealer, door_sample, gallery_sample, image, image_type};
use crate::error::AppError;
use crate::models::shared::{ImageDescriptor, ImageResponse};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnerKind {
    DoorSample,
    GallerySample,
    Dealer,
}

impl OwnerKind {
    fn column(self) -> image::Column {
        match self {
            OwnerKind::DoorSample => image::Column::DoorSampleId,
            OwnerKind::GallerySample => image::Column::GallerySampleId,
            OwnerKind::Dealer => image::Column::DealerId,
        }
    }

    fn label(self) -> &'static str {
        match self {
            OwnerKind::DoorSample => "Door sample",
            OwnerKind::GallerySample => "Gallery sample",
            OwnerKind::Dealer => "Dealer",
        }
    }
}

/// The catalog item an image belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageOwner {
    pub kind: OwnerKind,
    pub id: i32,
}

impl ImageOwner {
    pub fn door_sample(id: i32) -> Self {
        Self {
            kind: OwnerKind::DoorSample,
            id,
        }
    }

    pub fn gallery_sample(id: i32) -> Self {
        Self {
            kind: OwnerKind::GallerySample,
            id,
        }
    }

    pub fn dealer(id: i32) -> Self {
        Self {
            kind: OwnerKind::Dealer,
            id,
        }
    }
}

impl fmt::Display for ImageOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.label(), self.id)
    }
}

/// What [`ImageService::replace_row`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Unchanged,
    /// Row updated; `removed` is the old filename whose blob is now unreferenced.
    Replaced { removed: Option<String> },
}

pub struct ImageService<'a, C> {
    conn: &'a C,
    blobs: &'a dyn BlobStore,
    key_prefix: &'a str,
}

impl<'a, C: ConnectionTrait> ImageService<'a, C> {
    pub fn new(conn: &'a C, blobs: &'a dyn BlobStore, key_prefix: &'a str) -> Self {
        Self {
            conn,
            blobs,
            key_prefix,
        }
    }

    /// Object key for a stored filename.
    pub fn key_for(&self, filename: &str) -> Result<ObjectKey, AppError> {
        Ok(ObjectKey::for_asset(self.key_prefix, filename)?)
    }

    /// Issue a presigned upload URL for a canonical filename.
    pub async fn presign_upload(
        &self,
        filename: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<(ObjectKey, String), AppError> {
        let key = self.key_for(filename)?;
        let url = self
            .blobs
            .presign_put(&key, content_type, expires_in)
            .await
            .inspect_err(|e| warn!(key = %key, error = %e, "Presign failed"))?;
        Ok((key, url))
    }

    /// Insert the image row for a freshly created owner.
    ///
    /// The object is expected to be in the blob store already. A failure here
    /// leaves the owner row in place.
    pub async fn attach(
        &self,
        owner: ImageOwner,
        desc: &ImageDescriptor,
    ) -> Result<image::Model, AppError> {
        let mut model = image::ActiveModel {
            filename: Set(desc.filename.clone()),
            size: Set(desc.size),
            image_type_id: Set(desc.image_type_id),
            door_sample_id: Set(None),
            gallery_sample_id: Set(None),
            dealer_id: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        match owner.kind {
            OwnerKind::DoorSample => model.door_sample_id = Set(Some(owner.id)),
            OwnerKind::GallerySample => model.gallery_sample_id = Set(Some(owner.id)),
            OwnerKind::Dealer => model.dealer_id = Set(Some(owner.id)),
        }

        let inserted = model.insert(self.conn).await.inspect_err(|e| {
            warn!(owner = %owner, filename = %desc.filename, error = %e, "Image attach failed");
        })?;
        info!(owner = %owner, filename = %inserted.filename, "Image attached");
        Ok(inserted)
    }

    /// Load the image row owned by `owner`.
    pub async fn find(&self, owner: ImageOwner) -> Result<image::Model, AppError> {
        image::Entity::find()
            .filter(owner.kind.column().eq(owner.id))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{owner} has no image")))
    }

    /// Point the owner's image row at a new descriptor, then delete the old
    /// object.
    ///
    /// Must not run inside an uncommitted transaction. Owners updated in a
    /// transaction call [`Self::replace_row`] on it and
    /// [`Self::remove_replaced`] after commit.
    pub async fn replace(
        &self,
        owner: ImageOwner,
        desc: &ImageDescriptor,
    ) -> Result<ReplaceOutcome, AppError> {
        let outcome = self.replace_row(owner, desc).await?;
        self.remove_replaced(owner, &outcome).await?;
        Ok(outcome)
    }

    /// Update the image row only. The old blob is left in place.
    pub async fn replace_row(
        &self,
        owner: ImageOwner,
        desc: &ImageDescriptor,
    ) -> Result<ReplaceOutcome, AppError> {
        let current = self.find(owner).await?;

        if current.filename == desc.filename && current.size == desc.size {
            if current.image_type_id != desc.image_type_id {
                self.update_row(owner, current.id, desc).await?;
            }
            return Ok(ReplaceOutcome::Unchanged);
        }

        self.update_row(owner, current.id, desc).await?;

        if current.filename == desc.filename {
            info!(owner = %owner, filename = %desc.filename, "Image metadata updated");
            return Ok(ReplaceOutcome::Replaced { removed: None });
        }
        Ok(ReplaceOutcome::Replaced {
            removed: Some(current.filename),
        })
    }

    /// Delete the blob a committed [`Self::replace_row`] stopped referencing.
    ///
    /// The row already points at the new file, so a crash before this call
    /// orphans the old object instead of dangling the row.
    pub async fn remove_replaced(
        &self,
        owner: ImageOwner,
        outcome: &ReplaceOutcome,
    ) -> Result<(), AppError> {
        let ReplaceOutcome::Replaced {
            removed: Some(old_filename),
        } = outcome
        else {
            return Ok(());
        };

        let old_key = self.key_for(old_filename)?;
        self.blobs.delete(&old_key).await.inspect_err(|e| {
            tracing::error!(
                owner = %owner,
                filename = %old_filename,
                error = %e,
                "Old image blob could not be deleted"
            );
        })?;

        info!(owner = %owner, removed = %old_filename, "Image replaced");
        Ok(())
    }

    async fn update_row(
        &self,
        owner: ImageOwner,
        image_id: i32,
        desc: &ImageDescriptor,
    ) -> Result<(), AppError> {
        let result = image::Entity::update_many()
            .col_expr(image::Column::Filename, Expr::value(desc.filename.clone()))
            .col_expr(image::Column::Size, Expr::value(desc.size))
            .col_expr(image::Column::ImageTypeId, Expr::value(desc.image_type_id))
            .filter(image::Column::Id.eq(image_id))
            .filter(owner.kind.column().eq(owner.id))
            .exec(self.conn)
            .await?;
        if result.rows_affected != 1 {
            return Err(AppError::NotFound(format!("{owner} has no image")));
        }
        Ok(())
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> ImageService<'a, C> {
    /// Delete the owner together with its image.
    ///
    /// The blob goes first, outside any transaction, so a blob store failure
    /// aborts before relational state changes. An already-absent blob counts
    /// as deleted, which makes a failed delete safe to retry. The image row
    /// and the owner row are then removed in one transaction.
    ///
    /// An owner whose image was never attached is deleted on its own.
    pub async fn detach(&self, owner: ImageOwner) -> Result<(), AppError> {
        let current = image::Entity::find()
            .filter(owner.kind.column().eq(owner.id))
            .one(self.conn)
            .await?;

        if let Some(current) = &current {
            let key = self.key_for(&current.filename)?;
            let existed = self.blobs.delete(&key).await.inspect_err(|e| {
                tracing::error!(owner = %owner, filename = %current.filename, error = %e, "Image blob delete failed");
            })?;
            if !existed {
                warn!(owner = %owner, filename = %current.filename, "Image blob was already absent");
            }
        }

        let txn = self.conn.begin().await?;

        if let Some(current) = &current {
            let result = image::Entity::delete_many()
                .filter(image::Column::Id.eq(current.id))
                .filter(owner.kind.column().eq(owner.id))
                .exec(&txn)
                .await?;
            if result.rows_affected != 1 {
                return Err(AppError::NotFound(format!("{owner} has no image")));
            }
        }

        let result = match owner.kind {
            OwnerKind::DoorSample => door_sample::Entity::delete_by_id(owner.id).exec(&txn).await?,
            OwnerKind::GallerySample => {
                gallery_sample::Entity::delete_by_id(owner.id).exec(&txn).await?
            }
            OwnerKind::Dealer => dealer::Entity::delete_by_id(owner.id).exec(&txn).await?,
        };
        if result.rows_affected != 1 {
            return Err(AppError::NotFound(format!("{owner} not found")));
        }

        txn.commit().await?;

        match current {
            Some(current) => {
                info!(owner = %owner, filename = %current.filename, "Image detached and owner deleted")
            }
            None => warn!(owner = %owner, "Owner without an image deleted"),
        }
        Ok(())
    }
}

/// Load image responses for a batch of owners of one kind, keyed by owner id.
pub async fn load_images<C: ConnectionTrait>(
    db: &C,
    kind: OwnerKind,
    owner_ids: &[i32],
) -> Result<HashMap<i32, ImageResponse>, AppError> {
    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let images = image::Entity::find()
        .filter(kind.column().is_in(owner_ids.iter().copied()))
        .all(db)
        .await?;

    let mut type_ids: Vec<i32> = images.iter().map(|i| i.image_type_id).collect();
    type_ids.sort_unstable();
    type_ids.dedup();
    let types: HashMap<i32, image_type::Model> = image_type::Entity::find()
        .filter(image_type::Column::Id.is_in(type_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let mut out = HashMap::with_capacity(images.len());
    for img in images {
        let owner_id = match kind {
            OwnerKind::DoorSample => img.door_sample_id,
            OwnerKind::GallerySample => img.gallery_sample_id,
            OwnerKind::Dealer => img.dealer_id,
        };
        let (Some(owner_id), Some(image_type)) = (owner_id, types.get(&img.image_type_id)) else {
            continue;
        };
        out.insert(
            owner_id,
            ImageResponse {
                id: img.id,
                filename: img.filename,
                size: img.size,
                image_type: image_type.clone().into(),
            },
        );
    }
    Ok(out)
}
