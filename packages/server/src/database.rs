use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DatabaseConfig;

/// Connect, sync the schema and ensure the constraints sync cannot express.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("catalog_server::entity::*")
        .sync(&db)
        .await?;

    ensure_constraints(&db).await?;

    Ok(db)
}

/// Case-insensitive uniqueness. Index names follow `<table>__<column>__key`
/// so violations can be traced back to the offending field.
const UNIQUE_INDEXES: &[(&str, &str)] = &[
    (
        "colours__name__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS colours__name__key ON colours (lower(name))",
    ),
    (
        "woods__name__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS woods__name__key ON woods (lower(name))",
    ),
    (
        "door_style_types__name__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS door_style_types__name__key ON door_style_types (lower(name))",
    ),
    (
        "door_styles__name__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS door_styles__name__key ON door_styles (lower(name))",
    ),
    (
        "image_types__name__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS image_types__name__key ON image_types (lower(name))",
    ),
    (
        "dealers__name__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS dealers__name__key ON dealers (lower(name))",
    ),
    (
        "images__filename__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS images__filename__key ON images (lower(filename))",
    ),
    (
        "images__door_sample_id__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS images__door_sample_id__key ON images (door_sample_id)",
    ),
    (
        "images__gallery_sample_id__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS images__gallery_sample_id__key ON images (gallery_sample_id)",
    ),
    (
        "images__dealer_id__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS images__dealer_id__key ON images (dealer_id)",
    ),
    (
        "door_style_door_style_types__pair__key",
        "CREATE UNIQUE INDEX IF NOT EXISTS door_style_door_style_types__pair__key \
         ON door_style_door_style_types (door_style_id, door_style_type_id)",
    ),
];

/// Table constraints, added only when absent from `pg_constraint`.
///
/// The order_num constraint is DEFERRABLE so it is checked at statement end,
/// which lets the dealer swap exchange two values in a single UPDATE.
const TABLE_CONSTRAINTS: &[(&str, &str, &str)] = &[
    (
        "dealers__order_num__key",
        "dealers",
        "UNIQUE (order_num) DEFERRABLE INITIALLY IMMEDIATE",
    ),
    (
        "images__owner__check",
        "images",
        "CHECK (num_nonnulls(door_sample_id, gallery_sample_id, dealer_id) = 1)",
    ),
];

/// Ensure uniqueness and owner constraints exist. Idempotent.
pub async fn ensure_constraints<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    for (name, ddl) in UNIQUE_INDEXES {
        db.execute_unprepared(ddl).await.inspect_err(|e| {
            tracing::error!("Failed to create index {}: {}", name, e);
        })?;
        info!("Ensured index {} exists", name);
    }

    for (name, table, definition) in TABLE_CONSTRAINTS {
        let ddl = format!(
            "DO $$ BEGIN \
               IF NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = '{name}') THEN \
                 ALTER TABLE {table} ADD CONSTRAINT {name} {definition}; \
               END IF; \
             END $$"
        );
        db.execute_unprepared(&ddl).await.inspect_err(|e| {
            tracing::error!("Failed to add constraint {}: {}", name, e);
        })?;
        info!("Ensured constraint {} exists", name);
    }

    Ok(())
}
