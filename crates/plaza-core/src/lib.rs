pub mod api;
pub mod config;
pub mod error;
pub mod page;
pub mod session;
pub mod token;

// Re-export common error type
pub use error::{PlazaError, Result};
