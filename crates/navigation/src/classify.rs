//! Classification of a flat item list into ordered, audience-specific
//! sections.

use std::collections::HashSet;

use serde::Serialize;

use memberhub_auth::Audience;

use crate::error::NavigationError;
use crate::item::{DEFAULT_ITEM_ORDER, NavigationItem};
use crate::rule::NavigationRule;
use crate::section::NavigationSection;

/// Validated section + rule tables.
///
/// # Invariants
/// - Section ids are unique.
/// - Every rule targets a declared section.
/// - The last rule is an unconditional catch-all.
#[derive(Debug, Clone)]
pub struct NavigationTable {
    sections: Vec<NavigationSection>,
    rules: Vec<NavigationRule>,
}

impl NavigationTable {
    pub fn new(
        mut sections: Vec<NavigationSection>,
        rules: Vec<NavigationRule>,
    ) -> Result<Self, NavigationError> {
        let mut ids = HashSet::new();
        for section in &sections {
            if !ids.insert(section.id.as_str()) {
                return Err(NavigationError::DuplicateSection(section.id.clone()));
            }
        }

        let last = rules.last().ok_or(NavigationError::NoRules)?;
        if !last.is_catch_all() {
            return Err(NavigationError::MissingCatchAll);
        }

        if let Some((rule_index, rule)) = rules
            .iter()
            .enumerate()
            .find(|(_, r)| !ids.contains(r.target_section.as_str()))
        {
            return Err(NavigationError::UnknownSection {
                rule_index,
                section: rule.target_section.clone(),
            });
        }

        // Stable: equal orders keep declaration order.
        sections.sort_by_key(|s| s.order);

        Ok(Self { sections, rules })
    }

    pub fn sections(&self) -> &[NavigationSection] {
        &self.sections
    }

    pub fn rules(&self) -> &[NavigationRule] {
        &self.rules
    }

    /// First rule that applies to `item` for `audience`.
    pub fn match_rule(&self, item: &NavigationItem, audience: Audience) -> Option<&NavigationRule> {
        self.rules.iter().find(|r| r.applies_to(item, audience))
    }

    /// Group `items` into the sections visible to `audience`.
    ///
    /// Items whose matching rule targets a hidden section are dropped, not
    /// reassigned.
    pub fn classify(&self, items: &[NavigationItem], audience: Audience) -> ClassifiedNavigation {
        let mut groups: Vec<NavigationGroup> = self
            .sections
            .iter()
            .filter(|s| s.is_visible(audience))
            .map(|s| NavigationGroup {
                id: s.id.clone(),
                label: s.label(audience).to_string(),
                order: s.order,
                items: Vec::new(),
            })
            .collect();

        for item in items {
            let Some(rule) = self.match_rule(item, audience) else {
                tracing::trace!(item = %item.name, "no navigation rule matched; dropping item");
                continue;
            };

            match groups.iter_mut().find(|g| g.id == rule.target_section) {
                Some(group) => group.items.push(NavigationItem {
                    order: Some(rule.order.unwrap_or(DEFAULT_ITEM_ORDER)),
                    ..item.clone()
                }),
                None => {
                    tracing::trace!(
                        item = %item.name,
                        section = %rule.target_section,
                        ?audience,
                        "target section hidden; dropping item"
                    );
                }
            }
        }

        for group in &mut groups {
            group
                .items
                .sort_by_key(|i| i.order.unwrap_or(DEFAULT_ITEM_ORDER));
        }

        ClassifiedNavigation { groups }
    }
}

/// A visible section together with the items classified into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationGroup {
    pub id: String,
    /// Label resolved for the audience.
    pub label: String,
    pub order: u32,
    pub items: Vec<NavigationItem>,
}

/// Classification result, ordered by section order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassifiedNavigation {
    groups: Vec<NavigationGroup>,
}

impl ClassifiedNavigation {
    pub fn groups(&self) -> &[NavigationGroup] {
        &self.groups
    }

    pub fn get(&self, section_id: &str) -> Option<&NavigationGroup> {
        self.groups.iter().find(|g| g.id == section_id)
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.id.as_str())
    }

    /// Groups that received at least one item.
    pub fn non_empty(&self) -> impl Iterator<Item = &NavigationGroup> {
        self.groups.iter().filter(|g| !g.items.is_empty())
    }

    /// Section the named item landed in, if it was kept.
    pub fn section_of(&self, item_name: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.items.iter().any(|i| i.name == item_name))
            .map(|g| g.id.as_str())
    }

    pub fn total_items(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn into_groups(self) -> Vec<NavigationGroup> {
        self.groups
    }
}

/// Free-function form of [`NavigationTable::classify`].
pub fn classify(
    table: &NavigationTable,
    items: &[NavigationItem],
    audience: Audience,
) -> ClassifiedNavigation {
    table.classify(items, audience)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{AudienceFilter, Condition};
    use crate::matcher::NameMatcher;
    use memberhub_auth::Role;
    use proptest::prelude::*;

    const ADMIN: Audience = Audience::Role(Role::Administrator);
    const MEMBER: Audience = Audience::Role(Role::Member);

    fn items(names: &[&str]) -> Vec<NavigationItem> {
        names.iter().map(|n| NavigationItem::new(*n)).collect()
    }

    fn table() -> NavigationTable {
        NavigationTable::new(
            vec![
                NavigationSection::new("general", "General", 100),
                NavigationSection::new("main", "Main", 0),
                NavigationSection::new("admin", "Admin", 50)
                    .visible_to(AudienceFilter::Only(vec![ADMIN])),
            ],
            vec![
                NavigationRule::new(NameMatcher::exact("Dashboard"), "main").with_order(1),
                NavigationRule::new(NameMatcher::pattern("(?i)user").unwrap(), "admin"),
                NavigationRule::new(NameMatcher::exact("Reports"), "main")
                    .with_order(5)
                    .when(AudienceFilter::AtLeast(Role::Board)),
                NavigationRule::fallback("general"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn sections_are_ordered_and_filtered() {
        let nav = table().classify(&[], MEMBER);
        assert_eq!(nav.section_ids().collect::<Vec<_>>(), vec!["main", "general"]);

        let nav = table().classify(&[], ADMIN);
        assert_eq!(
            nav.section_ids().collect::<Vec<_>>(),
            vec!["main", "admin", "general"]
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let nav = table().classify(&items(&["Dashboard", "Manage Users"]), ADMIN);
        assert_eq!(nav.section_of("Dashboard"), Some("main"));
        assert_eq!(nav.section_of("Manage Users"), Some("admin"));
    }

    #[test]
    fn hidden_target_section_drops_the_item() {
        let nav = table().classify(&items(&["Manage Users", "Dashboard"]), MEMBER);
        assert_eq!(nav.section_of("Manage Users"), None);
        assert_eq!(nav.total_items(), 1);
    }

    #[test]
    fn failed_condition_falls_through_to_later_rules() {
        let nav = table().classify(&items(&["Reports"]), MEMBER);
        assert_eq!(nav.section_of("Reports"), Some("general"));

        let nav = table().classify(&items(&["Reports"]), Audience::Role(Role::Board));
        assert_eq!(nav.section_of("Reports"), Some("main"));
    }

    #[test]
    fn order_is_assigned_from_rule_with_default() {
        let mut input = items(&["Misc", "Dashboard"]);
        input[0].order = Some(1); // input order is ignored
        let nav = table().classify(&input, MEMBER);

        assert_eq!(nav.get("main").unwrap().items[0].order, Some(1));
        assert_eq!(
            nav.get("general").unwrap().items[0].order,
            Some(DEFAULT_ITEM_ORDER)
        );
    }

    #[test]
    fn equal_orders_keep_input_order() {
        let nav = table().classify(&items(&["Zeta", "Alpha", "Mid", "Beta"]), MEMBER);
        let names: Vec<&str> = nav
            .get("general")
            .unwrap()
            .items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid", "Beta"]);
    }

    #[test]
    fn items_sort_by_assigned_order() {
        let t = NavigationTable::new(
            vec![NavigationSection::new("s", "S", 0)],
            vec![
                NavigationRule::new(NameMatcher::exact("late"), "s").with_order(9),
                NavigationRule::new(NameMatcher::exact("early"), "s").with_order(2),
                NavigationRule::fallback("s"),
            ],
        )
        .unwrap();
        let nav = t.classify(&items(&["other", "late", "early"]), MEMBER);
        let names: Vec<&str> = nav.groups()[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["early", "late", "other"]);
    }

    #[test]
    fn table_requires_catch_all_last() {
        let err = NavigationTable::new(
            vec![NavigationSection::new("s", "S", 0)],
            vec![
                NavigationRule::fallback("s"),
                NavigationRule::new(NameMatcher::exact("x"), "s"),
            ],
        )
        .unwrap_err();
        assert_eq!(err, NavigationError::MissingCatchAll);

        let conditional = NavigationRule::fallback("s").when(AudienceFilter::Verified);
        let err = NavigationTable::new(vec![NavigationSection::new("s", "S", 0)], vec![conditional])
            .unwrap_err();
        assert_eq!(err, NavigationError::MissingCatchAll);

        let err = NavigationTable::new(vec![NavigationSection::new("s", "S", 0)], vec![]).unwrap_err();
        assert_eq!(err, NavigationError::NoRules);
    }

    #[test]
    fn table_rejects_unknown_targets_and_duplicate_sections() {
        let err = NavigationTable::new(
            vec![NavigationSection::new("s", "S", 0)],
            vec![
                NavigationRule::new(NameMatcher::exact("x"), "missing"),
                NavigationRule::fallback("s"),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            NavigationError::UnknownSection {
                rule_index: 0,
                section: "missing".to_string()
            }
        );

        let err = NavigationTable::new(
            vec![NavigationSection::new("s", "S", 0), NavigationSection::new("s", "T", 1)],
            vec![NavigationRule::fallback("s")],
        )
        .unwrap_err();
        assert_eq!(err, NavigationError::DuplicateSection("s".to_string()));
    }

    #[test]
    fn custom_conditions_can_inspect_items() {
        let t = NavigationTable::new(
            vec![
                NavigationSection::new("iconic", "Iconic", 0),
                NavigationSection::new("rest", "Rest", 1),
            ],
            vec![
                NavigationRule::new(NameMatcher::Any, "iconic")
                    .when(Condition::custom(|item, _| item.icon_key.is_some())),
                NavigationRule::fallback("rest"),
            ],
        )
        .unwrap();

        let input = vec![NavigationItem::new("A").with_icon("star"), NavigationItem::new("B")];
        let nav = t.classify(&input, MEMBER);
        assert_eq!(nav.section_of("A"), Some("iconic"));
        assert_eq!(nav.section_of("B"), Some("rest"));
    }

    fn any_audience() -> impl Strategy<Value = Audience> {
        prop::sample::select(vec![
            Audience::Pending,
            Audience::Role(Role::Administrator),
            Audience::Role(Role::President),
            Audience::Role(Role::Board),
            Audience::Role(Role::Member),
        ])
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: classification is a pure function of its inputs.
        #[test]
        fn classification_is_deterministic(
            names in prop::collection::vec("[A-Za-z ]{0,12}", 0..20),
            audience in any_audience(),
        ) {
            let input: Vec<NavigationItem> = names.iter().map(|n| NavigationItem::new(n.as_str())).collect();
            let t = table();
            prop_assert_eq!(t.classify(&input, audience), t.classify(&input, audience));
        }

        /// Property: every kept item appears exactly once, and only items whose
        /// matched section is visible are kept.
        #[test]
        fn items_are_kept_at_most_once(
            names in prop::collection::vec("(Dashboard|Users|Reports|[a-z]{1,6})", 0..20),
            audience in any_audience(),
        ) {
            let input: Vec<NavigationItem> = names.iter().map(|n| NavigationItem::new(n.as_str())).collect();
            let t = table();
            let nav = t.classify(&input, audience);

            let expected_kept = input
                .iter()
                .filter(|item| {
                    let rule = t.match_rule(item, audience).unwrap();
                    nav.get(&rule.target_section).is_some()
                })
                .count();
            prop_assert_eq!(nav.total_items(), expected_kept);
        }
    }
}
