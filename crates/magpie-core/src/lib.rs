pub mod credentials;
pub mod error;
pub mod ledger;
pub mod store;

pub use credentials::Credentials;
pub use error::{Error, Result};
pub use ledger::VisitedLedger;
