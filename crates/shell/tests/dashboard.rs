use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use memberhub_auth::{
    ACCESS_RESTRICTED_MESSAGE, AccessRequirement, GuardView, IdentityState, Role, RouteGuard,
    permissions,
};
use memberhub_core::{ManualClock, MemberId};
use memberhub_navigation::{NavigationItem, defaults};
use memberhub_session::{SessionConfig, SessionPhase};
use memberhub_shell::{DashboardShell, LogoutNotice, ShellConfig};

fn persisted(role: &str, verified: bool) -> String {
    serde_json::json!({
        "token": "t-123",
        "user": {
            "id": MemberId::new().to_string(),
            "name": "Dana Example",
            "email": "dana@example.org",
            "role": role,
            "verified": verified,
        }
    })
    .to_string()
}

fn shell() -> (DashboardShell, ManualClock) {
    memberhub_observability::init_for_tests();
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 5, 4, 8, 30, 0).unwrap());
    let config = ShellConfig {
        session: SessionConfig::from_millis(10_000, 3_000).unwrap(),
        ..ShellConfig::default()
    };
    let shell = DashboardShell::with_clock(config, Arc::new(clock.clone())).unwrap();
    (shell, clock)
}

fn items() -> Vec<NavigationItem> {
    ["Dashboard", "Applications", "Payments", "Users", "Profile", "Logout", "Help"]
        .into_iter()
        .map(NavigationItem::new)
        .collect()
}

#[test]
fn nothing_is_shown_before_sign_in() {
    let (shell, _) = shell();
    let mut guard = RouteGuard::new(AccessRequirement::new(), "home");

    assert_eq!(shell.identity_state(), IdentityState::Loading);
    assert_eq!(shell.guard(&mut guard), GuardView::Loading);
    assert!(shell.navigation(&items()).is_none());
    assert!(!shell.is_monitoring());
}

#[test]
fn signed_in_board_member_gets_guarded_views_and_navigation() {
    let (mut shell, _) = shell();
    let state = shell.sign_in(Some(&persisted("board", true))).unwrap();
    assert!(state.is_authenticated());
    assert!(shell.is_monitoring());

    let mut reports = RouteGuard::new(AccessRequirement::new().role(Role::Board), "reports");
    assert_eq!(shell.guard(&mut reports), GuardView::Content(&"reports"));

    let mut users =
        RouteGuard::new(AccessRequirement::new().permission(permissions::MANAGE_USERS), "users");
    assert_eq!(
        shell.guard(&mut users),
        GuardView::Restricted(ACCESS_RESTRICTED_MESSAGE)
    );

    let nav = shell.navigation(&items()).unwrap();
    assert_eq!(nav.section_of("Applications"), Some(defaults::APPLICATIONS));
    assert_eq!(nav.section_of("Users"), None);
    assert_eq!(nav.section_of("Help"), Some(defaults::GENERAL));
}

#[test]
fn unverified_member_is_classified_as_pending() {
    let (mut shell, _) = shell();
    shell.sign_in(Some(&persisted("member", false))).unwrap();

    let nav = shell.navigation(&items()).unwrap();
    assert_eq!(nav.get(defaults::FINANCE), None);
    assert_eq!(nav.section_of("Payments"), None);
    assert_eq!(nav.get(defaults::MEMBERSHIP).unwrap().label, "My Application");
}

#[test]
fn malformed_session_resolves_to_anonymous() {
    let (mut shell, _) = shell();
    let err = shell.sign_in(Some("{not json")).unwrap_err();
    assert!(err.to_string().contains("persisted session"));

    assert_eq!(shell.identity_state(), IdentityState::Anonymous);
    assert!(!shell.is_monitoring());

    let mut guard = RouteGuard::new(AccessRequirement::new(), "home").with_fallback("sign in");
    assert_eq!(shell.guard(&mut guard), GuardView::Fallback(&"sign in"));
}

#[test]
fn idle_member_is_warned_then_signed_out_once() {
    let (mut shell, clock) = shell();
    shell.sign_in(Some(&persisted("member", true))).unwrap();

    clock.advance(Duration::seconds(7));
    let snapshot = shell.session_snapshot().unwrap().unwrap();
    assert_eq!(snapshot.phase, SessionPhase::Warning);
    assert_eq!(snapshot.warning_seconds_remaining, Some(3));

    clock.advance(Duration::seconds(3));
    let snapshot = shell.session_snapshot().unwrap().unwrap();
    assert_eq!(snapshot.phase, SessionPhase::Idle);
    assert_eq!(shell.identity_state(), IdentityState::Anonymous);

    assert_eq!(shell.take_logout_notice(), Some(LogoutNotice { show_message: true }));
    assert_eq!(shell.take_logout_notice(), None);
    assert!(!shell.is_monitoring());
}

#[test]
fn activity_keeps_the_session_alive() {
    let (mut shell, clock) = shell();
    shell.sign_in(Some(&persisted("president", true))).unwrap();

    for _ in 0..5 {
        clock.advance(Duration::seconds(6));
        assert!(shell.record_event("keydown").unwrap());
    }
    assert!(!shell.record_event("focus").unwrap());

    let snapshot = shell.session_snapshot().unwrap().unwrap();
    assert_eq!(snapshot.phase, SessionPhase::Active);
    assert!(shell.identity_state().is_authenticated());

    clock.advance(Duration::seconds(8));
    assert_eq!(
        shell.session_snapshot().unwrap().unwrap().phase,
        SessionPhase::Warning
    );
    shell.extend_session().unwrap();
    assert_eq!(
        shell.session_snapshot().unwrap().unwrap().phase,
        SessionPhase::Active
    );
}

#[test]
fn sign_out_clears_identity_without_a_timeout_message() {
    let (mut shell, _) = shell();
    shell.sign_in(Some(&persisted("administrator", true))).unwrap();

    shell.sign_out().unwrap();
    assert_eq!(shell.identity_state(), IdentityState::Anonymous);
    assert!(!shell.is_monitoring());
    assert_eq!(shell.take_logout_notice(), Some(LogoutNotice { show_message: false }));
}

#[test]
fn teardown_during_warning_never_signs_out() {
    let (mut shell, clock) = shell();
    shell.sign_in(Some(&persisted("member", true))).unwrap();

    clock.advance(Duration::seconds(8));
    assert_eq!(
        shell.session_snapshot().unwrap().unwrap().phase,
        SessionPhase::Warning
    );

    shell.teardown();
    clock.advance(Duration::minutes(10));

    assert!(shell.identity_state().is_authenticated());
    assert_eq!(shell.take_logout_notice(), None);
    assert!(shell.session_snapshot().unwrap().is_none());
}

#[test]
fn notice_from_a_previous_session_does_not_end_the_next_one() {
    let (mut shell, clock) = shell();
    shell.sign_in(Some(&persisted("member", true))).unwrap();
    shell.sign_out().unwrap();

    shell.sign_in(Some(&persisted("board", true))).unwrap();
    assert_eq!(shell.take_logout_notice(), None);
    assert!(shell.is_monitoring());
    assert!(shell.identity_state().is_authenticated());

    clock.advance(Duration::minutes(10));
    assert_eq!(
        shell.session_snapshot().unwrap().unwrap().phase,
        SessionPhase::Idle
    );
    assert_eq!(shell.identity_state(), IdentityState::Anonymous);
    assert_eq!(shell.take_logout_notice(), Some(LogoutNotice { show_message: true }));
}

#[test]
fn automatic_logout_stops_monitoring_before_the_notice_is_read() {
    let (mut shell, clock) = shell();
    shell.sign_in(Some(&persisted("member", true))).unwrap();

    clock.advance(Duration::seconds(10));
    assert_eq!(
        shell.session_snapshot().unwrap().unwrap().phase,
        SessionPhase::Idle
    );
    assert!(!shell.is_monitoring());
    assert!(shell.session_snapshot().unwrap().is_none());
    assert!(!shell.record_event("keydown").unwrap());

    assert_eq!(shell.take_logout_notice(), Some(LogoutNotice { show_message: true }));
}
