//! Error types for Coverdesk

use thiserror::Error;

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog contents violate a record invariant
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// No policy with the given id
    #[error("Policy not found: {0}")]
    NotFound(i64),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::InvalidCatalog("duplicate id 3".to_string());
        assert_eq!(err.to_string(), "Invalid catalog: duplicate id 3");

        let err = CatalogError::NotFound(42);
        assert_eq!(err.to_string(), "Policy not found: 42");
    }
}
