use thiserror::Error;

use memberhub_core::DomainError;

/// Failures at the identity/role boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A role name that is not part of the closed role set.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// Persisted session data could not be turned into an identity.
    #[error("malformed session data: {0}")]
    MalformedSession(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
