use serde::{Deserialize, Serialize};

/// Order assigned to items whose rule does not specify one.
pub const DEFAULT_ITEM_ORDER: u32 = 100;

/// Entry supplied by the shell.
///
/// `order` is output only: classification assigns it from the matching rule
/// and ignores any incoming value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl NavigationItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_key: None,
            order: None,
        }
    }

    pub fn with_icon(mut self, icon_key: impl Into<String>) -> Self {
        self.icon_key = Some(icon_key.into());
        self
    }
}
