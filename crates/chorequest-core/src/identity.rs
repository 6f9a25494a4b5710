//! Caller identity supplied by the external authentication layer.
//!
//! ChoreQuest never authenticates anyone itself: the hosting layer resolves
//! each request to a stable principal string and passes it along as a
//! `CallerId`. Registration binds a `CallerId` to a profile id; all later
//! calls are authorized against that binding.

use serde::{Deserialize, Serialize};

/// An opaque, stable identifier for an authenticated caller.
///
/// Two requests carry the same `CallerId` exactly when they come from the
/// same authenticated principal. The value itself is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerId(String);

impl CallerId {
    /// Wraps a principal string from the authentication layer.
    pub fn new(principal: impl Into<String>) -> Self {
        Self(principal.into())
    }

    /// Returns the underlying principal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CallerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CallerId {
    fn from(principal: &str) -> Self {
        Self::new(principal)
    }
}

impl From<String> for CallerId {
    fn from(principal: String) -> Self {
        Self::new(principal)
    }
}

/// The authentication outcome attached to a request.
///
/// The hosting layer builds one of these per request; the ledger operations
/// never see a raw "maybe there is an identity" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// No identity present.
    Anonymous,
    /// An authenticated principal.
    Authenticated(CallerId),
}

impl AuthContext {
    /// Convenience constructor for an authenticated context.
    pub fn authenticated(principal: impl Into<String>) -> Self {
        Self::Authenticated(CallerId::new(principal))
    }

    /// Returns the caller id, or `Unauthenticated` when none is present.
    pub fn caller(&self) -> crate::error::Result<&CallerId> {
        match self {
            AuthContext::Anonymous => Err(crate::error::ChoreError::Unauthenticated),
            AuthContext::Authenticated(caller) => Ok(caller),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_id_equality() {
        let a = CallerId::new("principal-1");
        let b = CallerId::from("principal-1");
        let c = CallerId::from("principal-2".to_string());

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "principal-1");
    }
}
