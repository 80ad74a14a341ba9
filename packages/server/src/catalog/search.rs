//! Door sample search.
//!
//! The filter compiles to one parameterized predicate. Every selected id and
//! the free-text term contribute alternatives joined with OR, so a sample
//! matches when it satisfies any of them. Only structural SQL is assembled
//! here; values are always bound.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement, Value};

use crate::error::AppError;
use crate::models::door_sample::DoorSampleResponse;
use crate::models::shared::{ImageResponse, ImageTypeResponse, NamedRef, escape_like};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoorSampleSearch {
    pub colour_ids: Vec<i32>,
    pub wood_ids: Vec<i32>,
    pub door_style_ids: Vec<i32>,
    pub search_text: String,
}

/// A WHERE body and its positional values (`$1`, `$2`, ... in order).
#[derive(Debug, Default, PartialEq)]
pub struct SearchPredicate {
    pub clause: String,
    pub values: Vec<Value>,
}

impl SearchPredicate {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }
}

/// Columns the free-text term is matched against.
const TEXT_COLUMNS: [&str; 3] = ["colours.name", "woods.name", "door_styles.name"];

/// Compile a search into a predicate. Placeholders are numbered from 1 in
/// the order colour ids, wood ids, door style ids, then the text term, which
/// is bound once and referenced by all three LIKE alternatives.
pub fn build_search_predicate(search: &DoorSampleSearch) -> SearchPredicate {
    let mut terms: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    let id_filters = [
        ("door_samples.colour_id", &search.colour_ids),
        ("door_samples.wood_id", &search.wood_ids),
        ("door_samples.door_style_id", &search.door_style_ids),
    ];
    for (column, ids) in id_filters {
        for &id in ids {
            values.push(id.into());
            terms.push(format!("{column} = ${}", values.len()));
        }
    }

    let text = search.search_text.trim().to_lowercase();
    if !text.is_empty() {
        values.push(escape_like(&text).into());
        let n = values.len();
        for column in TEXT_COLUMNS {
            terms.push(format!(
                "LOWER({column}) LIKE '%' || ${n} || '%' ESCAPE '\\'"
            ));
        }
    }

    SearchPredicate {
        clause: terms.join(" OR "),
        values,
    }
}

const SELECT_DOOR_SAMPLES: &str = r#"SELECT
    door_samples.id,
    door_samples.created_at,
    door_styles.id AS door_style_id,
    door_styles.name AS door_style_name,
    woods.id AS wood_id,
    woods.name AS wood_name,
    colours.id AS colour_id,
    colours.name AS colour_name,
    images.id AS image_id,
    images.filename AS image_filename,
    images.size AS image_size,
    image_types.id AS image_type_id,
    image_types.name AS image_type_name,
    image_types.is_specific_dimension AS image_type_is_specific_dimension,
    image_types.width AS image_type_width,
    image_types.height AS image_type_height
FROM door_samples
JOIN door_styles ON door_styles.id = door_samples.door_style_id
JOIN woods ON woods.id = door_samples.wood_id
LEFT JOIN colours ON colours.id = door_samples.colour_id
LEFT JOIN images ON images.door_sample_id = door_samples.id
LEFT JOIN image_types ON image_types.id = images.image_type_id"#;

/// Byte-order sort on the filename, ties broken by id for a stable listing.
const ORDER_DOOR_SAMPLES: &str = r#"ORDER BY images.filename COLLATE "C" ASC, door_samples.id ASC"#;

#[derive(Debug, FromQueryResult)]
struct DoorSampleRow {
    id: i32,
    created_at: DateTime<Utc>,
    door_style_id: i32,
    door_style_name: String,
    wood_id: i32,
    wood_name: String,
    colour_id: Option<i32>,
    colour_name: Option<String>,
    image_id: Option<i32>,
    image_filename: Option<String>,
    image_size: Option<i64>,
    image_type_id: Option<i32>,
    image_type_name: Option<String>,
    image_type_is_specific_dimension: Option<bool>,
    image_type_width: Option<i32>,
    image_type_height: Option<i32>,
}

impl DoorSampleRow {
    fn into_response(self) -> Result<DoorSampleResponse, AppError> {
        let colour = match (self.colour_id, self.colour_name) {
            (Some(id), Some(name)) => Some(NamedRef { id, name }),
            _ => None,
        };
        let image = match (self.image_id, self.image_filename, self.image_size) {
            (Some(id), Some(filename), Some(size)) => ImageResponse {
                id,
                filename,
                size,
                image_type: ImageTypeResponse {
                    id: self.image_type_id.unwrap_or_default(),
                    name: self.image_type_name.unwrap_or_default(),
                    is_specific_dimension: self
                        .image_type_is_specific_dimension
                        .unwrap_or_default(),
                    width: self.image_type_width.unwrap_or_default(),
                    height: self.image_type_height.unwrap_or_default(),
                },
            },
            // A door sample whose image insert failed after the row was created.
            _ => {
                return Err(AppError::NotFound(format!(
                    "Door sample {} has no image",
                    self.id
                )));
            }
        };
        Ok(DoorSampleResponse {
            id: self.id,
            door_style: NamedRef {
                id: self.door_style_id,
                name: self.door_style_name,
            },
            wood: NamedRef {
                id: self.wood_id,
                name: self.wood_name,
            },
            colour,
            image,
            created_at: self.created_at,
        })
    }
}

/// Run a search against the door sample aggregate.
pub async fn search_door_samples<C: ConnectionTrait>(
    db: &C,
    search: &DoorSampleSearch,
) -> Result<Vec<DoorSampleResponse>, AppError> {
    let predicate = build_search_predicate(search);
    let sql = if predicate.is_empty() {
        format!("{SELECT_DOOR_SAMPLES}\n{ORDER_DOOR_SAMPLES}")
    } else {
        format!(
            "{SELECT_DOOR_SAMPLES}\nWHERE {}\n{ORDER_DOOR_SAMPLES}",
            predicate.clause
        )
    };

    let rows = DoorSampleRow::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        predicate.values,
    ))
    .all(db)
    .await?;

    tracing::debug!(matched = rows.len(), "door sample search");

    // Rows without an image are half-created samples; they are not listed.
    Ok(rows
        .into_iter()
        .filter_map(|row| row.into_response().ok())
        .collect())
}

/// Load a single door sample aggregate.
pub async fn find_door_sample<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<DoorSampleResponse, AppError> {
    let row = DoorSampleRow::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        format!("{SELECT_DOOR_SAMPLES}\nWHERE door_samples.id = $1"),
        [id.into()],
    ))
    .one(db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Door sample {id} not found")))?;

    row.into_response()
}
