//! Navigation tables used by the MemberHub dashboard shell.

use memberhub_auth::{Audience, Role};

use crate::classify::NavigationTable;
use crate::condition::AudienceFilter;
use crate::error::NavigationError;
use crate::matcher::NameMatcher;
use crate::rule::NavigationRule;
use crate::section::NavigationSection;

pub const OVERVIEW: &str = "overview";
pub const MEMBERSHIP: &str = "membership";
pub const APPLICATIONS: &str = "applications";
pub const FINANCE: &str = "finance";
pub const ENGAGEMENT: &str = "engagement";
pub const ADMINISTRATION: &str = "administration";
pub const ACCOUNT: &str = "account";
pub const GENERAL: &str = "general";

pub fn dashboard_sections() -> Vec<NavigationSection> {
    vec![
        NavigationSection::new(OVERVIEW, "Overview", 0),
        NavigationSection::new(MEMBERSHIP, "Membership", 10)
            .label_for_audience(Audience::Role(Role::Member), "My Membership")
            .label_for_audience(Audience::Pending, "My Application"),
        NavigationSection::new(APPLICATIONS, "Applications", 20)
            .visible_to(AudienceFilter::AtLeast(Role::Board)),
        NavigationSection::new(FINANCE, "Finance", 30)
            .visible_to(AudienceFilter::Verified)
            .label_for_audience(Audience::Role(Role::Member), "My Payments"),
        NavigationSection::new(ENGAGEMENT, "Events & Communities", 40)
            .visible_to(AudienceFilter::Verified),
        NavigationSection::new(ADMINISTRATION, "Administration", 80)
            .visible_to(AudienceFilter::Only(vec![Audience::Role(Role::Administrator)])),
        NavigationSection::new(ACCOUNT, "Account", 90),
        NavigationSection::new(GENERAL, "More", 100),
    ]
}

pub fn dashboard_rules() -> Result<Vec<NavigationRule>, NavigationError> {
    Ok(vec![
        NavigationRule::new(NameMatcher::exact("Dashboard"), OVERVIEW).with_order(1),
        NavigationRule::new(NameMatcher::pattern(r"(?i)^my application")?, MEMBERSHIP)
            .with_order(1)
            .when(AudienceFilter::Pending),
        NavigationRule::new(NameMatcher::pattern(r"(?i)application")?, APPLICATIONS)
            .with_order(10),
        NavigationRule::new(NameMatcher::pattern(r"(?i)^(members|member directory)$")?, MEMBERSHIP)
            .with_order(20)
            .when(AudienceFilter::AtLeast(Role::Board)),
        NavigationRule::new(NameMatcher::pattern(r"(?i)certificate")?, MEMBERSHIP).with_order(30),
        NavigationRule::new(NameMatcher::pattern(r"(?i)payment|invoice|dues")?, FINANCE)
            .with_order(10),
        NavigationRule::new(NameMatcher::pattern(r"(?i)report")?, FINANCE)
            .with_order(50)
            .when(AudienceFilter::AtLeast(Role::Board)),
        NavigationRule::new(NameMatcher::pattern(r"(?i)event")?, ENGAGEMENT).with_order(10),
        NavigationRule::new(NameMatcher::pattern(r"(?i)communit")?, ENGAGEMENT).with_order(20),
        NavigationRule::new(NameMatcher::pattern(r"(?i)user|role|setting|audit")?, ADMINISTRATION),
        NavigationRule::new(NameMatcher::exact("Profile"), ACCOUNT).with_order(10),
        NavigationRule::new(NameMatcher::pattern(r"(?i)^(log ?out|sign out)$")?, ACCOUNT)
            .with_order(99),
        NavigationRule::fallback(GENERAL),
    ])
}

/// Section and rule tables for the dashboard shell.
pub fn dashboard_navigation() -> Result<NavigationTable, NavigationError> {
    NavigationTable::new(dashboard_sections(), dashboard_rules()?)
}
