//! Record types and constants shared by every snapfeed crate.

pub mod constants;
pub mod error;
pub mod types;

pub use error::ValidationError;
pub use types::*;
