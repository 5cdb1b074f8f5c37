pub mod error;
pub mod roster;

pub use error::{ImporterError, Result};
pub use roster::parse_roster;
