//! `memberhub-auth`: role/permission model, access evaluation and route
//! guarding for the MemberHub dashboard.
//!
//! This crate is intentionally decoupled from UI, HTTP and storage: identities
//! arrive through [`IdentityProvider`].

pub mod authorize;
pub mod error;
pub mod guard;
pub mod identity;
pub mod permissions;
pub mod registry;
pub mod roles;

pub use authorize::{
    AccessDecision, AccessError, AccessExplanation, AccessRequirement, authorize, can_access,
    evaluate, explain_access,
};
pub use error::AuthError;
pub use guard::{ACCESS_RESTRICTED_MESSAGE, GuardState, GuardView, RouteGuard};
pub use identity::{
    Identity, IdentityProvider, IdentityState, InMemoryIdentityProvider, PersistedSession,
};
pub use permissions::Permission;
pub use registry::RoleRegistry;
pub use roles::{Audience, Role};
