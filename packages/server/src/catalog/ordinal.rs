//! Dealer display ordering.
//!
//! `order_num` values form a closed permutation over existing dealers: an
//! update can only trade places with the dealer already holding the target
//! value. Deleting a dealer leaves a gap that nothing compacts.

use sea_orm::sea_query::LockType;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, DbBackend, EntityTrait, QueryFilter,
    QuerySelect, Statement,
};
use tracing::info;

use crate::entity::dealer;
use crate::error::AppError;

/// Exchanges the `order_num` of two dealers in one statement. The unique
/// constraint is deferrable, so it is checked once both rows are written.
const SWAP_ORDER_NUM: &str = "UPDATE dealers AS dst \
     SET order_num = src.order_num \
     FROM dealers AS src \
     WHERE dst.id IN ($1, $2) AND src.id IN ($1, $2) AND dst.id <> src.id";

/// Outcome of [`OrdinalResequencer::move_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resequence {
    Unchanged,
    Swapped { displaced_id: i32 },
}

pub struct OrdinalResequencer<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> OrdinalResequencer<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Move `dealer` (already locked by the caller) to `target`, swapping
    /// with whichever dealer holds it now.
    pub async fn move_to(
        &self,
        dealer: &dealer::Model,
        target: i32,
    ) -> Result<Resequence, AppError> {
        if dealer.order_num == target {
            return Ok(Resequence::Unchanged);
        }

        let displaced = dealer::Entity::find()
            .filter(dealer::Column::OrderNum.eq(target))
            .lock(LockType::Update)
            .one(self.txn)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No dealer holds order num {target}"))
            })?;

        let result = self
            .txn
            .execute_raw(Statement::from_sql_and_values(
                DbBackend::Postgres,
                SWAP_ORDER_NUM,
                [dealer.id.into(), displaced.id.into()],
            ))
            .await?;
        if result.rows_affected() != 2 {
            return Err(AppError::Internal(format!(
                "order num swap of dealers {} and {} touched {} rows",
                dealer.id,
                displaced.id,
                result.rows_affected()
            )));
        }

        info!(
            dealer_id = dealer.id,
            displaced_id = displaced.id,
            from = dealer.order_num,
            to = target,
            "Swapped dealer order"
        );
        Ok(Resequence::Swapped {
            displaced_id: displaced.id,
        })
    }
}

/// Lock a dealer row for the rest of the transaction.
pub async fn find_dealer_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<dealer::Model, AppError> {
    dealer::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dealer {id} not found")))
}

/// One past the highest `order_num` in use, or 1 when there are no dealers.
pub async fn next_order_num<C: ConnectionTrait>(db: &C) -> Result<i32, AppError> {
    let max: Option<Option<i32>> = dealer::Entity::find()
        .select_only()
        .column_as(dealer::Column::OrderNum.max(), "max_order_num")
        .into_tuple()
        .one(db)
        .await?;
    Ok(max.flatten().unwrap_or(0) + 1)
}
