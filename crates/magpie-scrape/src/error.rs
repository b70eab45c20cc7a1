use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("pagination UI not found on the search page")]
    PaginationUiNotFound,

    #[error("could not parse a page number from {0:?}")]
    InvalidPageNumber(String),
}

pub type Result<T> = std::result::Result<T, Error>;
