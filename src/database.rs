//! Database initialization and table definitions
//!
//! This module handles the setup of the embedded redb database that backs the
//! persistent document store.

use redb::{Database, TableDefinition};

/// Table holding one document per short code
///
/// Key: short code (8 hex characters)
/// Value: JSON-serialized `UrlMapping`
///
/// Example:
/// - Key: "c984d06a"
/// - Value: '{"id":"c984d06a","redirect_url":"https://example.com"}'
pub const TABLE_URLS: TableDefinition<&str, &str> = TableDefinition::new("url_info_v1");

/// Creates or opens the database file and makes sure the table exists
///
/// # Arguments
///
/// * `db_path` - File path where the database should be stored (e.g., "data.db")
///
/// # Example
///
/// ```no_run
/// # use hashlink::database::init_db;
/// let db = init_db("data.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    // Opening the table inside a committed write transaction creates it, so
    // read transactions never see a missing table.
    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_URLS)?;
    }
    write_txn.commit()?;

    Ok(db)
}
