use std::path::{Path, PathBuf};
use std::fs;
use crate::core::error::{Error, ErrorKind, Result};

/// On-disk placement of the database file
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub base_dir: PathBuf,      // Directory holding the database file
    pub db_path: PathBuf,       // The redb file itself
}

impl StorageLayout {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if db_path.as_os_str().is_empty() || db_path.is_dir() {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("storage path {} is not a file path", db_path.display()),
            ));
        }

        let base_dir = match db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&base_dir)?;

        Ok(StorageLayout { base_dir, db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Current size of the database file, 0 if it does not exist yet.
    pub fn file_size(&self) -> Result<u64> {
        match fs::metadata(&self.db_path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}
