//! PostgreSQL implementation of the page content store.
//!
//! Each page owns one table holding a single content row; all content
//! columns are TEXT. Column and table names in the dynamically built SQL
//! come exclusively from the static registry in `parish_core::pages`, so
//! no caller-supplied identifier ever reaches a query string. Values are
//! always bound as parameters.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use parish_core::error::{StoreError, StoreOp};
use parish_core::pages::PageId;
use parish_core::store::PageStore;
use parish_core::types::PageRecord;

use crate::DbPool;

/// `PageStore` backed by the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgPageStore {
    pool: DbPool,
}

impl PgPageStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Comma-separated list of every content column of a page.
    fn column_list(page: PageId) -> String {
        page.columns().collect::<Vec<_>>().join(", ")
    }

    /// Read a fetched row into a record. NULL columns stay absent from
    /// the map; projection fills them with defaults downstream.
    fn row_to_record(page: PageId, row: &PgRow) -> Result<PageRecord, sqlx::Error> {
        let mut record = PageRecord::new();
        for column in page.columns() {
            if let Some(value) = row.try_get::<Option<String>, _>(column)? {
                record.insert(column.to_string(), value);
            }
        }
        Ok(record)
    }
}

#[async_trait]
impl PageStore for PgPageStore {
    async fn fetch(&self, page: PageId) -> Result<Option<PageRecord>, StoreError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY id LIMIT 1",
            Self::column_list(page),
            page.table(),
        );

        let row = sqlx::query(&query)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence(page, StoreOp::Read, &e))?;

        row.map(|r| Self::row_to_record(page, &r))
            .transpose()
            .map_err(|e| persistence(page, StoreOp::Read, &e))
    }

    async fn insert(&self, page: PageId, record: &PageRecord) -> Result<PageRecord, StoreError> {
        let columns: Vec<&str> = record.keys().map(String::as_str).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
        let query = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            page.table(),
            columns.join(", "),
            placeholders.join(", "),
            Self::column_list(page),
        );

        let mut q = sqlx::query(&query);
        for value in record.values() {
            q = q.bind(value);
        }

        let row = q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| persistence(page, StoreOp::Write, &e))?;

        Self::row_to_record(page, &row).map_err(|e| persistence(page, StoreOp::Write, &e))
    }

    async fn update(&self, page: PageId, columns: &PageRecord) -> Result<PageRecord, StoreError> {
        let assignments: Vec<String> = columns
            .keys()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 1))
            .collect();
        // The table's single row is addressed in the statement itself, so
        // the update is atomic per call.
        let query = format!(
            "UPDATE {table} SET {assignments}, updated_at = now() \
             WHERE id = (SELECT id FROM {table} ORDER BY id LIMIT 1) \
             RETURNING {cols}",
            table = page.table(),
            assignments = assignments.join(", "),
            cols = Self::column_list(page),
        );

        let mut q = sqlx::query(&query);
        for value in columns.values() {
            q = q.bind(value);
        }

        let row = q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| persistence(page, StoreOp::Write, &e))?;

        Self::row_to_record(page, &row).map_err(|e| persistence(page, StoreOp::Write, &e))
    }
}

fn persistence(page: PageId, op: StoreOp, err: &sqlx::Error) -> StoreError {
    tracing::error!(page = %page, %op, error = %err, "Page store call failed");
    StoreError::Persistence {
        page,
        op,
        message: err.to_string(),
    }
}
