//! The archive's persistence collaborator.
//!
//! Resolution only needs two things from the persistence layer: something
//! to put in its dependency record, and a way to ask it to get ready for a
//! given output directory. [`PersistenceInitializer`] captures both so that
//! the backing store can be swapped without touching the registry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::SQL_INDEX_FILENAME;
use crate::error::{HoardError, Result};

/// Storage backend the archive writes its index into.
pub trait PersistenceInitializer {
    /// Short identifier shown in the dependency table.
    fn name(&self) -> &str;

    /// Backend version, if it can be determined.
    fn version(&self) -> Option<String>;

    /// Where the backend keeps its data.
    fn location(&self) -> Option<PathBuf>;

    /// Prepare the backend for `output_dir`.
    ///
    /// With `check_db`, fail if the backing store does not already exist.
    fn setup(&self, output_dir: &Path, check_db: bool) -> Result<()>;
}

/// File-backed index database living next to `index.json`.
#[derive(Debug, Clone)]
pub struct IndexDatabase {
    output_dir: PathBuf,
}

impl IndexDatabase {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// `<output_dir>/index.sqlite3`
    pub fn database_path(&self) -> PathBuf {
        self.output_dir.join(SQL_INDEX_FILENAME)
    }
}

impl PersistenceInitializer for IndexDatabase {
    fn name(&self) -> &str {
        "index-db"
    }

    fn version(&self) -> Option<String> {
        Some(env!("CARGO_PKG_VERSION").to_string())
    }

    fn location(&self) -> Option<PathBuf> {
        Some(self.database_path())
    }

    fn setup(&self, output_dir: &Path, check_db: bool) -> Result<()> {
        let db = output_dir.join(SQL_INDEX_FILENAME);
        if check_db {
            match fs::metadata(&db) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => return Err(HoardError::DatabaseMissing { path: db }),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(HoardError::DatabaseMissing { path: db })
                }
                Err(e) => return Err(e.into()),
            }
        }
        tracing::debug!(path = %db.display(), check_db, "Persistence ready");
        Ok(())
    }
}
