//! Coverdesk Core - In-memory insurance policy catalog
//!
//! This crate holds the policy record type, the built-in catalog and the
//! query model shared by the HTTP server and the command-line tool.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod query;
pub mod types;

pub use catalog::PolicyCatalog;
pub use error::{CatalogError, Result};
pub use query::{PolicyQuery, SortOrder};
pub use types::Policy;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }
}
