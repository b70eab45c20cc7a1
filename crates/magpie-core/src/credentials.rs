use crate::{Error, Result};
use std::path::Path;

/// A resolved (login, password) pair.
///
/// Credentials come from either the `--login`/`--password` flags or a
/// credentials file, never a mix of all three. Resolution happens before any
/// browser is launched, so a bad configuration fails fast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    /// Resolve credentials from CLI flags and/or a credentials file.
    ///
    /// A credentials file combined with both flags is a configuration error.
    /// With a file present, the file wins over any single leftover flag.
    pub fn resolve(
        login: Option<String>,
        password: Option<String>,
        credentials_file: Option<&Path>,
    ) -> Result<Self> {
        match (login, password, credentials_file) {
            (Some(_), Some(_), Some(_)) => Err(Error::CredentialSourceConflict),
            (_, _, Some(path)) => Self::from_file(path),
            (Some(login), Some(password), None) => Ok(Self { login, password }),
            _ => Err(Error::MissingCredentials),
        }
    }

    /// Read credentials from a two-line `key=value` file.
    ///
    /// Key names are ignored; line order is the contract. The first non-blank
    /// line holds the login, the second the password.
    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut lines = raw.lines().map(str::trim).filter(|line| !line.is_empty());

        let login = Self::value_after_equals(path, lines.next(), "login")?;
        let password = Self::value_after_equals(path, lines.next(), "password")?;

        tracing::debug!("Resolved credentials for {login} from {}", path.display());
        Ok(Self { login, password })
    }

    fn value_after_equals(path: &Path, line: Option<&str>, which: &str) -> Result<String> {
        let line = line.ok_or_else(|| Error::MalformedCredentialsFile {
            path: path.to_path_buf(),
            reason: format!("missing the {which} line"),
        })?;

        let (_, value) = line
            .split_once('=')
            .ok_or_else(|| Error::MalformedCredentialsFile {
                path: path.to_path_buf(),
                reason: format!("the {which} line has no '='"),
            })?;

        Ok(value.to_string())
    }
}
