//! Route guard: decides whether a protected view renders its content, a
//! fallback, or a loading indicator.

use crate::authorize::{AccessDecision, AccessRequirement, evaluate};
use crate::identity::{Identity, IdentityProvider, IdentityState};

/// Message shown when a view is denied and no fallback was supplied.
pub const ACCESS_RESTRICTED_MESSAGE: &str =
    "Access restricted. You do not have permission to view this page.";

/// Guard lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Accessible,
    Denied,
}

impl From<AccessDecision> for GuardState {
    fn from(value: AccessDecision) -> Self {
        match value {
            AccessDecision::Loading => GuardState::Loading,
            AccessDecision::Granted => GuardState::Accessible,
            AccessDecision::Denied => GuardState::Denied,
        }
    }
}

/// What the guard asks the shell to render.
#[derive(Debug, PartialEq, Eq)]
pub enum GuardView<'a, V> {
    Loading,
    Content(&'a V),
    Fallback(&'a V),
    /// Denied with no fallback supplied.
    Restricted(&'static str),
}

/// Wraps protected content `V`.
///
/// The decision is made once per identity load and cached: it is only
/// recomputed when the provider reports a different identity, or reports
/// `Loading` again for a fresh fetch.
#[derive(Debug)]
pub struct RouteGuard<V> {
    requirement: AccessRequirement,
    children: V,
    fallback: Option<V>,
    state: GuardState,
    decided_for: Option<Option<Identity>>,
}

impl<V> RouteGuard<V> {
    pub fn new(requirement: AccessRequirement, children: V) -> Self {
        Self {
            requirement,
            children,
            fallback: None,
            state: GuardState::Loading,
            decided_for: None,
        }
    }

    pub fn with_fallback(mut self, fallback: V) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Bring the guard in line with the identity source.
    pub fn sync(&mut self, identity: &IdentityState) -> GuardState {
        let subject = match identity {
            IdentityState::Loading => {
                self.state = GuardState::Loading;
                self.decided_for = None;
                return self.state;
            }
            other => other.identity().cloned(),
        };

        if self.decided_for.as_ref() == Some(&subject) {
            return self.state;
        }

        let next = GuardState::from(evaluate(identity, &self.requirement));
        tracing::debug!(
            from = ?self.state,
            to = ?next,
            role = ?subject.as_ref().map(|i| i.role),
            required_roles = ?self.requirement.roles,
            "route guard resolved"
        );
        self.state = next;
        self.decided_for = Some(subject);
        self.state
    }

    /// View for the current state, without consulting the provider.
    pub fn view(&self) -> GuardView<'_, V> {
        match self.state {
            GuardState::Loading => GuardView::Loading,
            GuardState::Accessible => GuardView::Content(&self.children),
            GuardState::Denied => match &self.fallback {
                Some(fallback) => GuardView::Fallback(fallback),
                None => GuardView::Restricted(ACCESS_RESTRICTED_MESSAGE),
            },
        }
    }

    /// Sync against `provider` and return the view to render.
    pub fn render(&mut self, provider: &dyn IdentityProvider) -> GuardView<'_, V> {
        self.sync(&provider.state());
        self.view()
    }
}
