//! Identity of the signed-in member and the provider seam it is read through.
//!
//! The core never touches persisted storage directly: the shell hands in an
//! [`IdentityProvider`], and access checks work on the [`IdentityState`] it
//! reports.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use memberhub_core::{DomainError, MemberId};

use crate::error::AuthError;
use crate::permissions::Permission;
use crate::roles::Role;

/// Authenticated member as reported by the backend.
///
/// Replaced wholesale on login/logout/refresh; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub verified: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Identity {
    pub fn new(
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            verified: true,
            active: true,
        }
    }

    pub fn unverified(mut self) -> Self {
        self.verified = false;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Structural checks applied to identities coming from persisted data.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("identity name is empty"));
        }
        if !self.email.contains('@') {
            return Err(DomainError::validation(format!(
                "identity email '{}' is not an address",
                self.email
            )));
        }
        Ok(())
    }

    pub fn permissions(&self) -> &'static [Permission] {
        self.role.permissions()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.role.has_permission(permission)
    }
}

/// What the identity source currently knows.
///
/// `Loading` is distinct from `Anonymous`: a guard renders a loading indicator
/// for the former and a denial for the latter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdentityState {
    #[default]
    Loading,
    Anonymous,
    Authenticated(Identity),
}

impl IdentityState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            IdentityState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, IdentityState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, IdentityState::Authenticated(_))
    }
}

impl From<Option<Identity>> for IdentityState {
    fn from(value: Option<Identity>) -> Self {
        match value {
            Some(identity) => IdentityState::Authenticated(identity),
            None => IdentityState::Anonymous,
        }
    }
}

/// Injected identity source.
///
/// Supplies the current identity on demand and accepts a request to forget
/// it (logout).
pub trait IdentityProvider: Send + Sync {
    fn state(&self) -> IdentityState;

    fn clear_identity(&self);
}

/// Persisted session envelope, as stored by the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub token: Option<String>,
    pub user: Identity,
}

impl PersistedSession {
    /// Parse and validate the persisted JSON envelope.
    pub fn from_json(raw: &str) -> Result<Self, AuthError> {
        let session: PersistedSession = serde_json::from_str(raw)
            .map_err(|e| AuthError::MalformedSession(e.to_string()))?;
        session.user.validate()?;
        Ok(session)
    }
}

/// In-memory identity provider.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    state: RwLock<IdentityState>,
}

impl InMemoryIdentityProvider {
    /// Starts in `Loading`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self {
            state: RwLock::new(IdentityState::Authenticated(identity)),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            state: RwLock::new(IdentityState::Anonymous),
        }
    }

    /// Mark a fresh identity fetch as in flight.
    pub fn begin_loading(&self) {
        self.replace(IdentityState::Loading);
    }

    pub fn set_identity(&self, identity: Identity) {
        self.replace(IdentityState::Authenticated(identity));
    }

    /// Resolve the identity from persisted session data.
    ///
    /// `None` (nothing stored) resolves to `Anonymous`. Malformed data also
    /// resolves to `Anonymous` and the error is returned to the caller.
    pub fn load_persisted(&self, raw: Option<&str>) -> Result<(), AuthError> {
        let Some(raw) = raw else {
            self.replace(IdentityState::Anonymous);
            return Ok(());
        };

        match PersistedSession::from_json(raw) {
            Ok(session) => {
                tracing::debug!(member_id = %session.user.id, role = %session.user.role, "identity loaded from persisted session");
                self.replace(IdentityState::Authenticated(session.user));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "discarding malformed persisted session");
                self.replace(IdentityState::Anonymous);
                Err(err)
            }
        }
    }

    fn replace(&self, next: IdentityState) {
        let mut state = self.state.write().unwrap_or_else(|p| p.into_inner());
        *state = next;
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn state(&self) -> IdentityState {
        self.state.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn clear_identity(&self) {
        tracing::debug!("identity cleared");
        self.replace(IdentityState::Anonymous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{MANAGE_USERS, VIEW_PROFILE};

    fn member() -> Identity {
        Identity::new(MemberId::new(), "Ada Member", "ada@example.org", Role::Member)
    }

    #[test]
    fn provider_starts_loading_and_resolves() {
        let provider = InMemoryIdentityProvider::new();
        assert!(provider.state().is_loading());

        let identity = member();
        provider.set_identity(identity.clone());
        assert_eq!(provider.state().identity(), Some(&identity));

        provider.clear_identity();
        assert_eq!(provider.state(), IdentityState::Anonymous);
    }

    #[test]
    fn loads_persisted_envelope() {
        let id = MemberId::new();
        let raw = format!(
            r#"{{"token":"abc","user":{{"id":"{id}","name":"Bo Board","email":"bo@example.org","role":"board","verified":true}}}}"#
        );

        let provider = InMemoryIdentityProvider::new();
        provider.load_persisted(Some(&raw)).unwrap();

        let state = provider.state();
        let identity = state.identity().unwrap();
        assert_eq!(identity.id, id);
        assert_eq!(identity.role, Role::Board);
        assert!(identity.active, "active defaults to true");
    }

    #[test]
    fn missing_session_resolves_anonymous() {
        let provider = InMemoryIdentityProvider::new();
        provider.load_persisted(None).unwrap();
        assert_eq!(provider.state(), IdentityState::Anonymous);
    }

    #[test]
    fn unknown_role_in_session_is_rejected() {
        let raw = format!(
            r#"{{"user":{{"id":"{}","name":"X","email":"x@example.org","role":"treasurer"}}}}"#,
            MemberId::new()
        );
        let provider = InMemoryIdentityProvider::new();
        let err = provider.load_persisted(Some(&raw)).unwrap_err();

        assert!(matches!(err, AuthError::MalformedSession(msg) if msg.contains("treasurer")));
        assert_eq!(provider.state(), IdentityState::Anonymous);
    }

    #[test]
    fn invalid_email_is_rejected() {
        let raw = format!(
            r#"{{"user":{{"id":"{}","name":"X","email":"nope","role":"member"}}}}"#,
            MemberId::new()
        );
        let err = PersistedSession::from_json(&raw).unwrap_err();
        assert!(matches!(err, AuthError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn identity_role_queries() {
        let identity = member();
        assert!(identity.has_role(Role::Member));
        assert!(identity.has_any_role(&[Role::Board, Role::Member]));
        assert!(!identity.has_any_role(&[]));
        assert!(identity.has_permission(&VIEW_PROFILE));
        assert!(!identity.has_permission(&MANAGE_USERS));
    }
}
