//! Adapter-level configuration.
//!
//! # Responsibility
//! - Resolve the default catalog database location for hosts that do not
//!   pass one explicitly.
//!
//! # Invariants
//! - The resolved path is stable for the lifetime of the process.

use std::path::PathBuf;
use std::sync::OnceLock;

const DEFAULT_DB_FILE_NAME: &str = "bookshelf.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Returns the default database path.
///
/// `BOOKSHELF_DB_PATH` overrides the location when set to a non-empty
/// value; otherwise the file lives in the system temp directory. The first
/// resolution wins for the process lifetime.
pub fn default_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("BOOKSHELF_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
        })
        .clone()
}
