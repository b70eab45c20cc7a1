use crate::{store, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The persisted set of profile URLs already contacted.
///
/// Backed by a newline-delimited text file; a missing file is an empty
/// ledger. Membership is deliberately loose: the lowercased candidate matches
/// an entry when either contains the other, so a stored profile URL also
/// covers the same profile with extra query parameters. The file is opened
/// and closed per operation.
#[derive(Debug, Clone)]
pub struct VisitedLedger {
    path: PathBuf,
}

impl VisitedLedger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether a profile URL is already covered by the ledger.
    pub fn is_visited(&self, url: &str) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        let needle = url.to_lowercase();
        let entries = store::read_url_lines(&self.path)?;
        Ok(entries
            .iter()
            .any(|entry| entry.contains(&needle) || needle.contains(entry.as_str())))
    }

    /// Record a profile URL, unless the loose membership test already covers it.
    pub fn mark_visited(&self, url: &str) -> Result<()> {
        if self.is_visited(url)? {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{url}")?;

        tracing::debug!("Marked {url} as visited in {}", self.path.display());
        Ok(())
    }
}
