//! Mapping store contract
//!
//! Both backends implement [`UrlStore`]; the service only ever talks to the
//! trait, and configuration picks which implementation is constructed.

pub mod document;
pub mod memory;

use crate::error::StoreError;
use crate::model::UrlMapping;
use crate::shortcode::ShortCode;

pub use document::DocumentStore;
pub use memory::MemoryStore;

/// Result of a first-write-wins insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The mapping was written
    Inserted,
    /// A mapping for the code was already present and has been left untouched
    AlreadyExists,
}

/// Storage for short code mappings
///
/// All operations are synchronous and complete before returning.
pub trait UrlStore: Send + Sync + 'static {
    /// Looks up the mapping for `code`. A miss is `Ok(None)`.
    fn find(&self, code: &ShortCode) -> Result<Option<UrlMapping>, StoreError>;

    /// Stores `mapping` unless its code is already taken.
    ///
    /// The existence check and the write are atomic with respect to other
    /// inserts on the same store.
    fn insert(&self, mapping: &UrlMapping) -> Result<InsertOutcome, StoreError>;

    /// Number of stored mappings.
    fn count(&self) -> Result<usize, StoreError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
