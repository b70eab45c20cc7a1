use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("specify either a credentials file or --login and --password, not both")]
    CredentialSourceConflict,

    #[error("one of the mandatory arguments is missing: --login or --password")]
    MissingCredentials,

    #[error("malformed credentials file {}: {reason}", path.display())]
    MalformedCredentialsFile { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
