//! Section-level content store over a single-row-per-page persistence
//! collaborator.
//!
//! [`SectionStore`] mediates between named page sections and the one
//! underlying row: it projects fetched rows down to a section's view,
//! writes back only that section's columns, and seeds every other
//! section's defaults when the first write creates the row. It provides
//! no ordering across concurrent calls beyond the collaborator's per-row
//! atomicity; last-write-wins under concurrent section edits is accepted.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::pages::{PageId, SectionDef};
use crate::types::{PageRecord, SectionView};

/// Row-oriented persistence collaborator for page content.
///
/// The production implementation talks to PostgreSQL (`parish-db`);
/// tests use an in-memory one. Absence is signalled as `Ok(None)` from
/// [`fetch`](PageStore::fetch), distinct from a transport error.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Fetch the single content row for a page, if one exists.
    async fn fetch(&self, page: PageId) -> Result<Option<PageRecord>, StoreError>;

    /// Insert the first content row for a page and return it as stored.
    async fn insert(&self, page: PageId, record: &PageRecord) -> Result<PageRecord, StoreError>;

    /// Update a subset of columns on the page's existing row, atomically,
    /// and return the full row as stored.
    async fn update(&self, page: PageId, columns: &PageRecord) -> Result<PageRecord, StoreError>;
}

/// Mediates between named page sections and the single underlying row.
#[derive(Debug, Clone)]
pub struct SectionStore<S> {
    store: S,
}

impl<S: PageStore> SectionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read one section's view.
    ///
    /// A present row is projected through the section's projection, with
    /// defaults filling missing columns. An absent row answers with the
    /// section's defaults for pages configured `create_on_missing`, and
    /// with [`StoreError::NotFound`] otherwise. Reads never persist.
    pub async fn get_section(
        &self,
        page: PageId,
        section: &SectionDef,
    ) -> Result<SectionView, StoreError> {
        let fetched = self
            .store
            .fetch(page)
            .await
            .map_err(|e| e.with_section(section.name))?;

        match fetched {
            Some(record) => Ok(section.project(&record)),
            None if page.create_on_missing() => Ok(section.default_view()),
            None => Err(StoreError::NotFound { page }),
        }
    }

    /// Write one section's view and return the canonical post-write view.
    ///
    /// On an existing row only this section's columns are written; all
    /// others stay untouched. When no row exists yet, the insert seeds
    /// every other section's columns with their registry defaults.
    /// Exactly one row is written per call.
    pub async fn put_section(
        &self,
        page: PageId,
        section: &SectionDef,
        view: &SectionView,
    ) -> Result<SectionView, StoreError> {
        let columns = section.to_columns(view)?;

        let existing = self
            .store
            .fetch(page)
            .await
            .map_err(|e| e.with_section(section.name))?;

        let stored = match existing {
            Some(_) => self.store.update(page, &columns).await,
            None => {
                let mut record = page.default_record();
                record.extend(columns);
                self.store.insert(page, &record).await
            }
        }
        .map_err(|e| e.with_section(section.name))?;

        Ok(section.project(&stored))
    }

    /// Whole-record read, bypassing section projection (bulk export).
    ///
    /// Absence follows the same per-page policy as [`get_section`].
    pub async fn get_record(&self, page: PageId) -> Result<PageRecord, StoreError> {
        match self.store.fetch(page).await? {
            Some(record) => Ok(record),
            None if page.create_on_missing() => Ok(page.default_record()),
            None => Err(StoreError::NotFound { page }),
        }
    }

    /// Whole-record replace, bypassing section projection (bulk import).
    ///
    /// The caller supplies a complete record; no default-filling happens
    /// here. Follows the same exists-then-update-else-insert decision as
    /// [`put_section`].
    pub async fn put_record(
        &self,
        page: PageId,
        record: &PageRecord,
    ) -> Result<PageRecord, StoreError> {
        let known: std::collections::BTreeSet<&str> = page.columns().collect();
        for key in record.keys() {
            if !known.contains(key.as_str()) {
                return Err(StoreError::Validation(format!(
                    "Page '{page}' has no column '{key}'"
                )));
            }
        }
        for column in &known {
            if !record.contains_key(*column) {
                return Err(StoreError::Validation(format!(
                    "Record for page '{page}' is missing column '{column}'"
                )));
            }
        }

        match self.store.fetch(page).await? {
            Some(_) => self.store.update(page, record).await,
            None => self.store.insert(page, record).await,
        }
    }
}
