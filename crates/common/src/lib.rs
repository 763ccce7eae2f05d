//! Common utilities and types shared across catforge crates.

pub mod error;
pub mod fsio;
pub mod timestamp;

pub use error::{Error, Result};
pub use timestamp::Timestamp;
