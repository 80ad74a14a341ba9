//! Colours, woods and door style types.
//!
//! The three tables share the `{id, name}` shape, so one store serves all of
//! them with the table chosen from a fixed set.

use sea_orm::{
    ConnectionTrait, DbBackend, FromQueryResult, Statement, TransactionSession, TransactionTrait,
};

use crate::error::AppError;
use crate::models::facet::{FacetKind, FacetResponse};

pub struct FacetStore<'a, C> {
    conn: &'a C,
    kind: FacetKind,
}

impl<'a, C: ConnectionTrait + TransactionTrait> FacetStore<'a, C> {
    pub fn new(conn: &'a C, kind: FacetKind) -> Self {
        Self { conn, kind }
    }

    fn statement(&self, sql: String, values: Vec<sea_orm::Value>) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }

    fn not_found(&self, id: i32) -> AppError {
        AppError::NotFound(format!("{} {id} not found", self.kind.label()))
    }

    /// All facets of this kind ordered by name.
    pub async fn list(&self) -> Result<Vec<FacetResponse>, AppError> {
        let sql = format!(
            "SELECT id, name FROM {} ORDER BY lower(name), id",
            self.kind.table()
        );
        Ok(FacetResponse::find_by_statement(self.statement(sql, vec![]))
            .all(self.conn)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<FacetResponse, AppError> {
        let sql = format!("SELECT id, name FROM {} WHERE id = $1", self.kind.table());
        FacetResponse::find_by_statement(self.statement(sql, vec![id.into()]))
            .one(self.conn)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn create(&self, name: &str) -> Result<FacetResponse, AppError> {
        let sql = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name",
            self.kind.table()
        );
        FacetResponse::find_by_statement(self.statement(sql, vec![name.into()]))
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::Internal("INSERT ... RETURNING produced no row".into()))
    }

    pub async fn rename(&self, id: i32, name: &str) -> Result<FacetResponse, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $1 WHERE id = $2 RETURNING id, name",
            self.kind.table()
        );
        FacetResponse::find_by_statement(self.statement(sql, vec![name.into(), id.into()]))
            .one(self.conn)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    /// Delete a facet. Fails with a conflict while a door sample references
    /// it. A door style type is first unlinked from every door style.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;

        if self.kind == FacetKind::DoorStyleTypes {
            txn.execute_raw(self.statement(
                "DELETE FROM door_style_door_style_types WHERE door_style_type_id = $1".into(),
                vec![id.into()],
            ))
            .await?;
        }

        let sql = format!("DELETE FROM {} WHERE id = $1", self.kind.table());
        let result = txn.execute_raw(self.statement(sql, vec![id.into()])).await?;
        if result.rows_affected() != 1 {
            return Err(self.not_found(id));
        }

        txn.commit().await?;
        Ok(())
    }
}
