//! Alias store: database setup and record persistence
//!
//! This module wraps the embedded redb database behind a [`UrlStore`] handle
//! that owns every lookup and write the handlers need. The handle is
//! constructed once at startup and cloned into the router state; nothing else
//! in the application touches the database directly.

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;
use thiserror::Error;

use crate::model::UrlRecord;

/// Main table for storing URL records
///
/// Key: the 8-character alias as string
/// Value: JSON-serialized UrlRecord as string
///
/// Example:
/// - Key: "x8FbQ2wZ"
/// - Value: '{"original_url":"https://example.com","short_url":"x8FbQ2wZ",...}'
pub const TABLE_URLS: TableDefinition<&str, &str> = TableDefinition::new("urls_v1");

/// Index table for looking up an existing alias by original URL
///
/// This secondary index is what makes repeat submissions of the same URL
/// return the alias that was already allocated, without scanning the main
/// table.
///
/// Key: the original URL exactly as submitted
/// Value: the alias it maps to in [`TABLE_URLS`]
pub const TABLE_ORIGINAL_INDEX: TableDefinition<&str, &str> =
    TableDefinition::new("original_index_v1");

/// Failures surfaced by [`UrlStore`] operations
///
/// Handlers never match on individual variants; everything here becomes a
/// generic 500 at the response boundary, with the detail logged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Open(#[from] redb::DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Persistent mapping from alias and from original URL to a [`UrlRecord`]
///
/// Cheap to clone (the database is behind an `Arc`); every handler
/// invocation gets its own copy from the router state.
#[derive(Clone)]
pub struct UrlStore {
    db: Arc<Database>,
}

impl UrlStore {
    /// Creates or opens the database file and ensures both tables exist
    ///
    /// # Arguments
    ///
    /// * `db_path` - File path where the database is stored (e.g. "data.db")
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use snip::database::UrlStore;
    /// let store = UrlStore::open("data.db").expect("Failed to initialize database");
    /// ```
    pub fn open(db_path: &str) -> Result<Self, StoreError> {
        let db = Database::create(db_path)?;

        // Opening a table inside a write transaction creates it if missing,
        // so later read transactions never hit TableDoesNotExist
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(TABLE_URLS)?;
            write_txn.open_table(TABLE_ORIGINAL_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Looks up the record allocated for an original URL, if any
    ///
    /// Resolves the original-URL index to an alias, then the alias to its
    /// record. Returns `Ok(None)` when the URL has never been shortened.
    pub fn find_by_original_url(&self, url: &str) -> Result<Option<UrlRecord>, StoreError> {
        let read_txn = self.db.begin_read()?;

        let index = read_txn.open_table(TABLE_ORIGINAL_INDEX)?;
        let alias = match index.get(url)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };

        let urls = read_txn.open_table(TABLE_URLS)?;
        match urls.get(alias.as_str())? {
            Some(guard) => Ok(Some(serde_json::from_str(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Looks up a record by its alias
    pub fn find_by_short_url(&self, alias: &str) -> Result<Option<UrlRecord>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let urls = read_txn.open_table(TABLE_URLS)?;

        match urls.get(alias)? {
            Some(guard) => Ok(Some(serde_json::from_str(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Persists a new record with zero clicks
    ///
    /// Writes to both tables in one transaction:
    /// 1. [`TABLE_URLS`] - the record itself, keyed by alias
    /// 2. [`TABLE_ORIGINAL_INDEX`] - original URL -> alias
    ///
    /// Callers are expected to have checked [`Self::find_by_original_url`]
    /// first; two racing first-time submissions of the same URL can each
    /// insert a record, in which case the index keeps the later alias.
    pub fn create(&self, original_url: String, short_url: String) -> Result<UrlRecord, StoreError> {
        let record = UrlRecord {
            original_url,
            short_url,
            created_at: Utc::now(),
            clicks: 0,
        };
        let record_json = serde_json::to_string(&record)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut urls = write_txn.open_table(TABLE_URLS)?;
            urls.insert(record.short_url.as_str(), record_json.as_str())?;

            let mut index = write_txn.open_table(TABLE_ORIGINAL_INDEX)?;
            index.insert(record.original_url.as_str(), record.short_url.as_str())?;
        }
        write_txn.commit()?;

        Ok(record)
    }

    /// Adds one click to the stored record and returns the new count
    ///
    /// The record is re-read inside the write transaction, so concurrent
    /// redirects for the same alias each land their increment. If the record
    /// vanished between lookup and increment the caller's copy is used as
    /// the base.
    pub fn increment_clicks(&self, record: &UrlRecord) -> Result<u64, StoreError> {
        let write_txn = self.db.begin_write()?;

        let clicks = {
            let mut urls = write_txn.open_table(TABLE_URLS)?;

            let current = match urls.get(record.short_url.as_str())? {
                Some(guard) => serde_json::from_str::<UrlRecord>(guard.value())?,
                None => record.clone(),
            };

            let updated = UrlRecord {
                clicks: current.clicks + 1,
                ..current
            };
            let record_json = serde_json::to_string(&updated)?;
            urls.insert(updated.short_url.as_str(), record_json.as_str())?;

            updated.clicks
        };

        write_txn.commit()?;

        Ok(clicks)
    }
}

/// Application state shared across all request handlers
///
/// Constructed once in `main` and injected into the Axum router.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the persistent alias store
    pub store: UrlStore,

    /// Public base URL short links are built from (e.g. "http://localhost:8080")
    pub base_url: String,
}
