//! Persistent document table
//!
//! Stores each mapping as a JSON document (`{"id": ..., "redirect_url": ...}`)
//! in the embedded redb database, keyed by short code.

use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata};

use crate::database::TABLE_URLS;
use crate::error::StoreError;
use crate::model::UrlMapping;
use crate::shortcode::ShortCode;
use crate::store::{InsertOutcome, UrlStore};

/// Persistent store keeping one JSON document per mapping in redb
///
/// redb runs one write transaction at a time, so the existence check and the
/// write in [`UrlStore::insert`] cannot interleave with another insert.
#[derive(Clone)]
pub struct DocumentStore {
    db: Arc<Database>,
}

impl DocumentStore {
    /// Wraps a database opened with [`crate::database::init_db`].
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }
}

impl UrlStore for DocumentStore {
    fn find(&self, code: &ShortCode) -> Result<Option<UrlMapping>, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::db)?;
        let table = read_txn.open_table(TABLE_URLS).map_err(StoreError::db)?;

        let Some(value) = table.get(code.as_str()).map_err(StoreError::db)? else {
            return Ok(None);
        };

        serde_json::from_str::<UrlMapping>(value.value())
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                code: code.to_string(),
                source,
            })
    }

    fn insert(&self, mapping: &UrlMapping) -> Result<InsertOutcome, StoreError> {
        let document = serde_json::to_string(mapping).map_err(|source| StoreError::Corrupt {
            code: mapping.short_code.clone(),
            source,
        })?;

        let write_txn = self.db.begin_write().map_err(StoreError::db)?;
        let outcome = {
            let mut table = write_txn.open_table(TABLE_URLS).map_err(StoreError::db)?;

            if table
                .get(mapping.short_code.as_str())
                .map_err(StoreError::db)?
                .is_some()
            {
                InsertOutcome::AlreadyExists
            } else {
                table
                    .insert(mapping.short_code.as_str(), document.as_str())
                    .map_err(StoreError::db)?;
                InsertOutcome::Inserted
            }
        };

        match outcome {
            InsertOutcome::Inserted => write_txn.commit().map_err(StoreError::db)?,
            InsertOutcome::AlreadyExists => write_txn.abort().map_err(StoreError::db)?,
        }

        Ok(outcome)
    }

    fn count(&self) -> Result<usize, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::db)?;
        let table = read_txn.open_table(TABLE_URLS).map_err(StoreError::db)?;
        let len = table.len().map_err(StoreError::db)?;

        Ok(len as usize)
    }

    fn backend_name(&self) -> &'static str {
        "redb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::init_db;
    use tempfile::NamedTempFile;

    fn setup_store() -> (DocumentStore, NamedTempFile) {
        let temp_db = NamedTempFile::new().expect("Failed to create temp file");
        let db = init_db(temp_db.path().to_str().unwrap()).expect("Failed to initialize database");
        (DocumentStore::new(db), temp_db)
    }

    fn mapping(code: &str, url: &str) -> UrlMapping {
        UrlMapping {
            short_code: code.to_string(),
            long_url: url.to_string(),
        }
    }

    #[test]
    fn insert_and_find() {
        let (store, _temp_db) = setup_store();

        let outcome = store.insert(&mapping("c984d06a", "https://example.com")).unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);

        let code = ShortCode::parse("c984d06a").unwrap();
        let found = store.find(&code).unwrap().unwrap();
        assert_eq!(found, mapping("c984d06a", "https://example.com"));
    }

    #[test]
    fn find_missing() {
        let (store, _temp_db) = setup_store();
        let code = ShortCode::parse("deadbeef").unwrap();

        assert!(store.find(&code).unwrap().is_none());
    }

    #[test]
    fn first_write_wins() {
        let (store, _temp_db) = setup_store();

        store.insert(&mapping("c984d06a", "https://example.com")).unwrap();
        let outcome = store.insert(&mapping("c984d06a", "https://other.com")).unwrap();
        assert_eq!(outcome, InsertOutcome::AlreadyExists);

        let code = ShortCode::parse("c984d06a").unwrap();
        assert_eq!(store.find(&code).unwrap().unwrap().long_url, "https://example.com");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn stores_document_shape() {
        let (store, _temp_db) = setup_store();
        store.insert(&mapping("c984d06a", "https://example.com")).unwrap();

        let read_txn = store.db.begin_read().unwrap();
        let table = read_txn.open_table(TABLE_URLS).unwrap();
        let raw = table.get("c984d06a").unwrap().unwrap();
        let doc: serde_json::Value = serde_json::from_str(raw.value()).unwrap();

        assert_eq!(doc["id"], "c984d06a");
        assert_eq!(doc["redirect_url"], "https://example.com");
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let (store, _temp_db) = setup_store();

        let write_txn = store.db.begin_write().unwrap();
        {
            let mut table = write_txn.open_table(TABLE_URLS).unwrap();
            table.insert("deadbeef", "not json").unwrap();
        }
        write_txn.commit().unwrap();

        let code = ShortCode::parse("deadbeef").unwrap();
        assert!(matches!(store.find(&code), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn survives_reopen() {
        let temp_db = NamedTempFile::new().unwrap();
        let path = temp_db.path().to_str().unwrap().to_owned();

        {
            let store = DocumentStore::new(init_db(&path).unwrap());
            store.insert(&mapping("c984d06a", "https://example.com")).unwrap();
        }

        let store = DocumentStore::new(init_db(&path).unwrap());
        let code = ShortCode::parse("c984d06a").unwrap();
        assert_eq!(store.find(&code).unwrap().unwrap().long_url, "https://example.com");
    }
}
