//! Error types for catalog access control

use thiserror::Error;

/// Access control result type
pub type Result<T> = std::result::Result<T, AclError>;

/// Failure to materialize the policy table from its source
///
/// Always fatal to construction: there is no partially loaded store.
#[derive(Error, Debug)]
pub enum PolicyLoadError {
    /// SQLite could not open, prepare or read the policy table
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A configured column does not exist in the policy table
    #[error("Column {column} not found in table {table}")]
    MissingColumn { table: String, column: String },

    /// The row source reported a failure of its own
    #[error("Row source failed: {0}")]
    Source(String),
}

/// Access control errors
#[derive(Error, Debug)]
pub enum AclError {
    /// Identity is not permitted to use the catalog
    #[error("Access Denied: Cannot access catalog {resource}")]
    Denied { resource: String },

    /// Policy table could not be loaded
    #[error("Policy load failed: {0}")]
    PolicyLoad(#[from] PolicyLoadError),

    /// Missing or malformed configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file is not valid TOML
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration values failed validation
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AclError {
    /// Build a denial for `resource`
    pub fn denied(resource: impl Into<String>) -> Self {
        AclError::Denied {
            resource: resource.into(),
        }
    }

    /// True for a negative authorization decision
    pub fn is_denied(&self) -> bool {
        matches!(self, AclError::Denied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_message() {
        let err = AclError::denied("finance");
        assert!(err.is_denied());
        assert_eq!(err.to_string(), "Access Denied: Cannot access catalog finance");
    }

    #[test]
    fn test_load_error_wraps() {
        let err: AclError = PolicyLoadError::Source("connection refused".to_string()).into();
        assert!(!err.is_denied());
        assert!(err.to_string().contains("connection refused"));
    }
}
