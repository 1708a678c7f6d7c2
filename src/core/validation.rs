//! Validation for SQL identifiers taken from configuration
//!
//! Table and column names are spliced into the policy query, so they are
//! restricted to plain identifiers and always emitted double-quoted.

use crate::error::{AclError, Result};
use regex::Regex;
use std::fmt;

/// A validated, unqualified SQL identifier
///
/// # Rules
/// - ASCII letters, digits and underscores only
/// - Must not start with a digit
/// - Length: 1-128 characters
///
/// Valid: `user_catalog`, `_acl`, `Grants2`
///
/// Invalid: `user-catalog`, `2grants`, `acl.grants`, `x; DROP TABLE y`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlIdentifier(String);

impl SqlIdentifier {
    /// Pattern for a plain identifier
    const PATTERN: &'static str = r"^[A-Za-z_][A-Za-z0-9_]*$";

    /// Maximum accepted length
    const MAX_LENGTH: usize = 128;

    /// Create a new validated identifier
    ///
    /// # Errors
    ///
    /// Returns `AclError::Config` if the name doesn't meet the rules above.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_acl::SqlIdentifier;
    ///
    /// let table = SqlIdentifier::new("user_catalog").unwrap();
    /// assert_eq!(table.quoted(), "\"user_catalog\"");
    ///
    /// assert!(SqlIdentifier::new("acl; DROP TABLE acl").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(SqlIdentifier(name))
    }

    fn validate(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(AclError::Config("identifier cannot be empty".to_string()));
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(AclError::Config(format!(
                "identifier too long (max {} characters)",
                Self::MAX_LENGTH
            )));
        }

        let re = Regex::new(Self::PATTERN).map_err(|e| AclError::Config(e.to_string()))?;
        if !re.is_match(name) {
            return Err(AclError::Config(format!(
                "identifier '{}' must contain only letters, digits and underscores",
                name
            )));
        }

        Ok(())
    }

    /// Default column holding the principal name
    pub(crate) fn user_column() -> Self {
        SqlIdentifier("user".to_string())
    }

    /// Default column holding the catalog name
    pub(crate) fn catalog_column() -> Self {
        SqlIdentifier("catalog".to_string())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for use in SQL text
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl AsRef<str> for SqlIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
