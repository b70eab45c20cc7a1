use crate::Result;
use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append a set of links to a newline-delimited file, creating it on first use.
///
/// The file is opened, written, and closed per call; earlier contents are
/// never truncated, so repeated runs accumulate.
pub fn append_links(path: &Path, links: &BTreeSet<String>) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for link in links {
        writeln!(file, "{link}")?;
    }

    tracing::debug!("Appended {} links to {}", links.len(), path.display());
    Ok(())
}

/// Read a newline-delimited URL list, skipping blank lines.
pub fn read_url_lines(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_links_accumulates_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loot.txt");

        let first: BTreeSet<String> = ["https://example.com/in/alice".to_string()].into();
        let second: BTreeSet<String> = ["https://example.com/in/bob".to_string()].into();

        append_links(&path, &first).unwrap();
        append_links(&path, &second).unwrap();

        let lines = read_url_lines(&path).unwrap();
        assert_eq!(
            lines,
            vec![
                "https://example.com/in/alice".to_string(),
                "https://example.com/in/bob".to_string(),
            ]
        );
    }

    #[test]
    fn test_read_url_lines_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.txt");
        std::fs::write(&path, "https://a/in/x\n\n   \nhttps://a/in/y\n").unwrap();

        let lines = read_url_lines(&path).unwrap();
        assert_eq!(lines, vec!["https://a/in/x", "https://a/in/y"]);
    }

    #[test]
    fn test_read_url_lines_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_url_lines(&dir.path().join("absent.txt"));
        assert!(result.is_err());
    }
}
