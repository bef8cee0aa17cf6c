use memberhub_auth::Audience;

use crate::condition::Condition;
use crate::item::NavigationItem;
use crate::matcher::NameMatcher;

/// Pattern-to-section mapping. Rules are scanned in declaration order and the
/// first one that applies wins.
#[derive(Debug, Clone)]
pub struct NavigationRule {
    pub matcher: NameMatcher,
    pub target_section: String,
    pub order: Option<u32>,
    pub condition: Option<Condition>,
}

impl NavigationRule {
    pub fn new(matcher: NameMatcher, target_section: impl Into<String>) -> Self {
        Self {
            matcher,
            target_section: target_section.into(),
            order: None,
            condition: None,
        }
    }

    /// Unconditional catch-all into `target_section`.
    pub fn fallback(target_section: impl Into<String>) -> Self {
        Self::new(NameMatcher::Any, target_section)
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn when(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn applies_to(&self, item: &NavigationItem, audience: Audience) -> bool {
        self.matcher.matches(&item.name)
            && self
                .condition
                .as_ref()
                .is_none_or(|c| c.holds(item, audience))
    }

    pub fn is_catch_all(&self) -> bool {
        self.matcher.is_catch_all() && self.condition.is_none()
    }
}
