//! In-process mapping table
//!
//! Keeps mappings in a `HashMap` behind one mutex. Nothing is persisted, so
//! this backend suits tests and single-instance deployments that can lose
//! their links on restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::model::UrlMapping;
use crate::shortcode::ShortCode;
use crate::store::{InsertOutcome, UrlStore};

/// In-process mapping table guarded by a single mutex
///
/// Every read and write holds the lock for the whole operation. Contents are
/// lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.table.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl UrlStore for MemoryStore {
    fn find(&self, code: &ShortCode) -> Result<Option<UrlMapping>, StoreError> {
        let table = self.lock()?;

        Ok(table.get(code.as_str()).map(|long_url| UrlMapping {
            short_code: code.to_string(),
            long_url: long_url.clone(),
        }))
    }

    fn insert(&self, mapping: &UrlMapping) -> Result<InsertOutcome, StoreError> {
        let mut table = self.lock()?;

        if table.contains_key(&mapping.short_code) {
            return Ok(InsertOutcome::AlreadyExists);
        }

        table.insert(mapping.short_code.clone(), mapping.long_url.clone());
        Ok(InsertOutcome::Inserted)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
