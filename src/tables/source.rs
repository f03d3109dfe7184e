//! Raw table providers
//!
//! Table data is identified by a numeric id (the id of the table in the
//! historical source edition) and stored as JSON:
//!
//! ```json
//! {
//!   "samples": [["0", "0;0"], ["1", "0;2,1"], ["2", "0;4,2"]],
//!   "symmetry": [{"kind": "anti_mirror"}]
//! }
//! ```
//!
//! Arguments and values are sexagesimal literals.

use super::{SymmetricTable, Symmetry, TableError};
use crate::sexagesimal::Sexagesimal;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "ALPHONSINE_DATA_DIR";

/// Identifier of a table in the source edition
pub type TableId = u32;

/// Error type for table sources
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Table {0} is not available")]
    NotFound(TableId),

    #[error("File I/O error on {path:?}: {source}")]
    FileError { path: PathBuf, source: io::Error },

    #[error("Invalid table file {path:?}: {source}")]
    InvalidFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Table {id} is malformed: {source}")]
    InvalidTable { id: TableId, source: TableError },
}

/// Table data as delivered by a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub samples: Vec<(Sexagesimal, Sexagesimal)>,
    #[serde(default)]
    pub symmetry: Vec<Symmetry>,
}

impl RawTable {
    pub fn new(samples: Vec<(Sexagesimal, Sexagesimal)>, symmetry: Vec<Symmetry>) -> Self {
        Self { samples, symmetry }
    }

    /// Build the lookup table with the source's own symmetries
    pub fn into_table(self) -> Result<SymmetricTable, TableError> {
        SymmetricTable::new(self.samples, self.symmetry)
    }
}

/// Provider of raw tables by id
///
/// Implementations must be shareable across threads; table sets are built
/// from a source and then used concurrently.
pub trait TableSource: Send + Sync {
    fn load(&self, id: TableId) -> Result<RawTable, SourceError>;

    /// Load and build a table in one step
    fn table(&self, id: TableId) -> Result<SymmetricTable, SourceError> {
        self.load(id)?
            .into_table()
            .map_err(|source| SourceError::InvalidTable { id, source })
    }
}

/// Get the default data directory path
///
/// `$ALPHONSINE_DATA_DIR` when set, `~/.cache/alphonsine` otherwise.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".cache").join("alphonsine")
}

/// Check if a file exists and is not empty
fn file_exists_and_not_empty<P: AsRef<Path>>(path: P) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.len() > 0,
        Err(_) => false,
    }
}

/// Tables stored as `<dir>/tables/<id>.json`
#[derive(Debug, Clone)]
pub struct DirectoryTableSource {
    root: PathBuf,
}

impl DirectoryTableSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding a table
    pub fn table_path(&self, id: TableId) -> PathBuf {
        self.root.join("tables").join(format!("{}.json", id))
    }
}

impl Default for DirectoryTableSource {
    fn default() -> Self {
        Self::new(get_data_dir())
    }
}

impl TableSource for DirectoryTableSource {
    fn load(&self, id: TableId) -> Result<RawTable, SourceError> {
        let path = self.table_path(id);
        if !file_exists_and_not_empty(&path) {
            return Err(SourceError::NotFound(id));
        }
        debug!("Reading table {} from {}", id, path.display());

        let file = File::open(&path).map_err(|source| SourceError::FileError {
            path: path.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| SourceError::InvalidFormat { path, source })
    }
}

/// Tables kept in memory, for tests and embedded table sets
#[derive(Debug, Clone, Default)]
pub struct MemoryTableSource {
    tables: HashMap<TableId, RawTable>,
}

impl MemoryTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TableId, table: RawTable) -> &mut Self {
        self.tables.insert(id, table);
        self
    }

    /// Builder-style insert
    pub fn with_table(mut self, id: TableId, table: RawTable) -> Self {
        self.tables.insert(id, table);
        self
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableSource for MemoryTableSource {
    fn load(&self, id: TableId) -> Result<RawTable, SourceError> {
        self.tables.get(&id).cloned().ok_or(SourceError::NotFound(id))
    }
}
