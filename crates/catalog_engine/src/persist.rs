//! Single-file state storage with atomic replacement.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),
    #[error("cannot create state directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// One state file. Readers see either the previous contents or the new
/// contents in full, never a partial write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(dir: impl Into<PathBuf>, filename: &str) -> Self {
        Self {
            path: dir.into().join(filename),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents; `Ok(None)` when nothing was stored yet.
    pub fn load(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces the contents, creating the parent directory if needed.
    pub fn store(&self, contents: &str) -> Result<(), PersistError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        prepare_dir(dir)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file_mut().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

fn prepare_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::NotADirectory(dir.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        Err(err) => Err(err.into()),
    }
}
