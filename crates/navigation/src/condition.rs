use std::sync::Arc;

use memberhub_auth::{Audience, Role};

use crate::item::NavigationItem;

/// Declarative audience test shared by section visibility and rule
/// conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudienceFilter {
    Only(Vec<Audience>),
    Except(Vec<Audience>),
    /// Verified role holders at or above the given rank.
    AtLeast(Role),
    /// Any verified role holder.
    Verified,
    Pending,
}

impl AudienceFilter {
    pub fn admits(&self, audience: Audience) -> bool {
        match self {
            AudienceFilter::Only(allowed) => allowed.contains(&audience),
            AudienceFilter::Except(denied) => !denied.contains(&audience),
            AudienceFilter::AtLeast(min) => audience.role().is_some_and(|r| r.is_at_least(*min)),
            AudienceFilter::Verified => !audience.is_pending(),
            AudienceFilter::Pending => audience.is_pending(),
        }
    }
}

type VisibilityFn = Arc<dyn Fn(Audience) -> bool + Send + Sync>;
type ConditionFn = Arc<dyn Fn(&NavigationItem, Audience) -> bool + Send + Sync>;

/// When a section is part of the navigation for an audience.
#[derive(Clone)]
pub enum Visibility {
    Filter(AudienceFilter),
    Custom(VisibilityFn),
}

impl Visibility {
    pub fn custom(f: impl Fn(Audience) -> bool + Send + Sync + 'static) -> Self {
        Visibility::Custom(Arc::new(f))
    }

    pub fn admits(&self, audience: Audience) -> bool {
        match self {
            Visibility::Filter(filter) => filter.admits(audience),
            Visibility::Custom(f) => f(audience),
        }
    }
}

impl From<AudienceFilter> for Visibility {
    fn from(value: AudienceFilter) -> Self {
        Visibility::Filter(value)
    }
}

impl core::fmt::Debug for Visibility {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Visibility::Filter(filter) => f.debug_tuple("Filter").field(filter).finish(),
            Visibility::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Extra test a rule applies after its name matcher.
#[derive(Clone)]
pub enum Condition {
    Filter(AudienceFilter),
    Custom(ConditionFn),
}

impl Condition {
    pub fn custom(f: impl Fn(&NavigationItem, Audience) -> bool + Send + Sync + 'static) -> Self {
        Condition::Custom(Arc::new(f))
    }

    pub fn holds(&self, item: &NavigationItem, audience: Audience) -> bool {
        match self {
            Condition::Filter(filter) => filter.admits(audience),
            Condition::Custom(f) => f(item, audience),
        }
    }
}

impl From<AudienceFilter> for Condition {
    fn from(value: AudienceFilter) -> Self {
        Condition::Filter(value)
    }
}

impl core::fmt::Debug for Condition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Condition::Filter(filter) => f.debug_tuple("Filter").field(filter).finish(),
            Condition::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
