//! Idempotent schema application, modeled on `db-turso`'s
//! `apply_full_sovereign_schema` (const-array-of-statements-plus-iteration).

use libsql::Connection;

use crate::errors::StoreError;

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS search_metadata (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        search_index_type TEXT NOT NULL,
        starting_search_index TEXT NOT NULL,
        ending_search_index TEXT NOT NULL,
        state TEXT NOT NULL CHECK (state IN ('NOT_STARTED', 'IN_PROGRESS', 'FINISHED', 'FAILED')),
        creation_time TEXT NOT NULL,
        start_time TEXT,
        end_time TEXT,
        block_hash TEXT,
        UNIQUE (search_index_type, starting_search_index, ending_search_index)
    )",
    "CREATE TABLE IF NOT EXISTS riemann_divisor_sums (
        n TEXT NOT NULL,
        divisor_sum TEXT NOT NULL,
        witness_value REAL NOT NULL
    )",
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_search_metadata_claimable
        ON search_metadata (search_index_type, state, creation_time)",
    "CREATE INDEX IF NOT EXISTS idx_search_metadata_in_progress
        ON search_metadata (state, start_time)",
    "CREATE INDEX IF NOT EXISTS idx_riemann_divisor_sums_n ON riemann_divisor_sums (n)",
];

pub async fn initialize_schema(connection: &Connection) -> Result<(), StoreError> {
    for statement in TABLES.iter().chain(INDEXES.iter()) {
        connection.execute(statement, ()).await?;
    }
    Ok(())
}
