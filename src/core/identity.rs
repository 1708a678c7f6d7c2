//! Caller identity as handed over by the host

use std::fmt;

/// The authenticated principal making a request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    user: String,
    principal: Option<String>,
}

impl Identity {
    /// Identity for `user` with no separate authenticated principal
    pub fn new(user: impl Into<String>) -> Self {
        Identity {
            user: user.into(),
            principal: None,
        }
    }

    /// Attach the authenticated principal name
    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    /// User name that policy entries are matched against
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Authenticated principal, when the host supplied one
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.principal {
            Some(principal) => write!(f, "{} ({})", self.user, principal),
            None => write!(f, "{}", self.user),
        }
    }
}
