use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Binary names probed on PATH before falling back to install locations.
const CHROME_BINARIES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

/// Locate a Chrome/Chromium binary.
///
/// An explicit path is validated as-is; otherwise well-known binary names are
/// looked up on PATH, then the platform's default install locations.
pub fn find_chrome(custom_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = custom_path {
        return validate(path);
    }

    for name in CHROME_BINARIES {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }

    for path in default_install_paths() {
        if validate(&path).is_ok() {
            return Ok(path);
        }
    }

    Err(Error::Browser(format!(
        "Chrome not found on PATH ({}) or at the default install locations. \
         Use --chrome-path to point at the binary.",
        CHROME_BINARIES.join(", ")
    )))
}

fn default_install_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    return vec![
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
    ];

    #[cfg(target_os = "linux")]
    return vec![
        PathBuf::from("/usr/bin/google-chrome"),
        PathBuf::from("/usr/bin/google-chrome-stable"),
        PathBuf::from("/usr/bin/chromium"),
        PathBuf::from("/usr/bin/chromium-browser"),
        PathBuf::from("/snap/bin/chromium"),
    ];

    #[cfg(target_os = "windows")]
    return vec![
        PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return vec![];
}

/// A usable binary exists and carries an executable bit.
fn validate(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::Browser(format!(
            "Chrome not found at: {}",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(path)?;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::Browser(format!(
                "Chrome binary not executable: {}",
                path.display()
            )));
        }
    }

    Ok(path.to_path_buf())
}
