//! `memberhub-navigation`: groups the shell's flat navigation entries into
//! ordered, audience-specific sections.
//!
//! Classification is a pure function of the items, the audience and a
//! validated [`NavigationTable`].

pub mod classify;
pub mod condition;
pub mod defaults;
pub mod error;
pub mod item;
pub mod matcher;
pub mod rule;
pub mod section;

pub use classify::{ClassifiedNavigation, NavigationGroup, NavigationTable, classify};
pub use condition::{AudienceFilter, Condition, Visibility};
pub use error::NavigationError;
pub use item::{DEFAULT_ITEM_ORDER, NavigationItem};
pub use matcher::NameMatcher;
pub use rule::NavigationRule;
pub use section::NavigationSection;
