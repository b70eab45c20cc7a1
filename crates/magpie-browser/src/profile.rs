use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Throwaway Chrome user-data directory, removed when the session ends.
///
/// Each run starts from a clean profile the way a fresh webdriver session
/// would, so no login state leaks between runs.
pub struct ScratchProfile {
    path: PathBuf,
}

impl ScratchProfile {
    pub fn create() -> Result<Self> {
        let dir = tempfile::tempdir().map_err(Error::Io)?;
        Ok(Self { path: dir.keep() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchProfile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}
