mod error;
mod links;
mod pagination;
mod search;

pub use error::{Error, Result};
pub use links::{profile_links, SITE_ORIGIN};
pub use pagination::{ButtonTextPagination, PageState};
pub use search::{page_url, search_url};
