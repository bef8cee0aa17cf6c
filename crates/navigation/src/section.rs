use std::collections::HashMap;

use memberhub_auth::Audience;

use crate::condition::Visibility;

/// Named, conditionally visible grouping of navigation entries.
#[derive(Debug, Clone)]
pub struct NavigationSection {
    pub id: String,
    pub label: String,
    pub order: u32,
    pub visibility: Option<Visibility>,
    pub label_overrides: HashMap<Audience, String>,
}

impl NavigationSection {
    pub fn new(id: impl Into<String>, label: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            order,
            visibility: None,
            label_overrides: HashMap::new(),
        }
    }

    pub fn visible_to(mut self, visibility: impl Into<Visibility>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    pub fn label_for_audience(mut self, audience: Audience, label: impl Into<String>) -> Self {
        self.label_overrides.insert(audience, label.into());
        self
    }

    pub fn is_visible(&self, audience: Audience) -> bool {
        self.visibility.as_ref().is_none_or(|v| v.admits(audience))
    }

    pub fn label(&self, audience: Audience) -> &str {
        self.label_overrides
            .get(&audience)
            .map(String::as_str)
            .unwrap_or(&self.label)
    }
}
