//! Row materialization: `SqliteRow` → [`Record`].
//!
//! Values are decoded by their SQLite storage class, not the declared
//! column type, so a `TEXT` column holding `42` still comes back as text
//! and an untyped expression like `AVG(...)` comes back as a real.

use flight_core::{Record, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::error::{DbError, DbResult};

/// Converts one row into a record, keeping projection order.
///
/// Fails on the first column that cannot be represented as a [`Value`];
/// callers never see a partially filled record.
pub fn record_from_row(row: &SqliteRow) -> DbResult<Record> {
    let mut record = Record::with_capacity(row.len());

    for (index, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INTEGER" | "BOOLEAN" => Value::Integer(row.try_get::<i64, _>(index)?),
                "REAL" => Value::Real(row.try_get::<f64, _>(index)?),
                "NUMERIC" => match row.try_get::<i64, _>(index) {
                    Ok(v) => Value::Integer(v),
                    Err(_) => Value::Real(row.try_get::<f64, _>(index)?),
                },
                "TEXT" | "DATE" | "TIME" | "DATETIME" => {
                    Value::Text(row.try_get::<String, _>(index)?)
                }
                _ => {
                    return Err(DbError::UnsupportedColumn {
                        column: column.name().to_string(),
                        type_name,
                    })
                }
            }
        };

        record.push(column.name(), value);
    }

    Ok(record)
}

/// Converts every row, all-or-nothing.
pub fn records_from_rows(rows: &[SqliteRow]) -> DbResult<Vec<Record>> {
    rows.iter().map(record_from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_storage_classes_map_to_values() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let row = sqlx::query("SELECT 42 AS I, 2.5 AS R, 'ATL' AS T, NULL AS N")
            .fetch_one(db.pool())
            .await
            .unwrap();

        let record = record_from_row(&row).unwrap();
        let names: Vec<&str> = record.column_names().collect();
        assert_eq!(names, vec!["I", "R", "T", "N"]);
        assert_eq!(record.get("I"), Some(&Value::Integer(42)));
        assert_eq!(record.get("R"), Some(&Value::Real(2.5)));
        assert_eq!(record.get("T"), Some(&Value::Text("ATL".to_string())));
        assert_eq!(record.get("N"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_blob_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let rows = sqlx::query("SELECT 1 AS ok, x'00ff' AS payload")
            .fetch_all(db.pool())
            .await
            .unwrap();

        let err = records_from_rows(&rows).unwrap_err();
        assert!(matches!(
            err,
            DbError::UnsupportedColumn { ref column, .. } if column == "payload"
        ));
    }
}
