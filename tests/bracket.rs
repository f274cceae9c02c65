use std::fs;
use std::path::PathBuf;

use sevens_data::bracket::{resolve_bracket, resolve_placeholder};
use sevens_data::feed::{StandingsFeed, parse_match_feed_json, parse_standings_feed_json};
use sevens_data::matches::{Match, SideRef};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Tournament state with the whole group stage played and the bracket open.
fn groups_done() -> Vec<Match> {
    let rows = parse_match_feed_json(&read_fixture("match_feed.json")).expect("fixture should parse");
    rows.iter().map(Match::from_feed).collect()
}

/// Same state with the given number of bracket rounds also decided, taken
/// from the decided-bracket fixture (semis first, then third place + final).
fn bracket_decided(decided_ids: &[&str]) -> Vec<Match> {
    let decided = parse_match_feed_json(&read_fixture("match_feed_decided.json"))
        .expect("fixture should parse");
    let mut all = groups_done();
    for row in decided.iter().filter(|r| decided_ids.contains(&r.id.as_str())) {
        let m = Match::from_feed(row);
        let slot = all
            .iter_mut()
            .find(|existing| existing.id == m.id)
            .expect("decided row replaces a scheduled one");
        *slot = m;
    }
    all
}

fn standings() -> StandingsFeed {
    parse_standings_feed_json(&read_fixture("standings_feed.json")).expect("fixture should parse")
}

#[test]
fn group_placeholders_resolve_once_groups_complete() {
    let all = groups_done();
    let feed = standings();

    // Group 1 comes from the published standings table, group 2 is derived.
    assert_eq!(
        resolve_placeholder("Group 1 Winner", &all, Some(&feed)).as_deref(),
        Some("11")
    );
    assert_eq!(
        resolve_placeholder("Group 1 Runner-up", &all, Some(&feed)).as_deref(),
        Some("12")
    );
    assert_eq!(
        resolve_placeholder("Group 2 Winner", &all, Some(&feed)).as_deref(),
        Some("21")
    );
    assert_eq!(
        resolve_placeholder("Group 2 Runner-up", &all, Some(&feed)).as_deref(),
        Some("23")
    );
}

#[test]
fn derived_group_placeholder_waits_for_the_last_result() {
    // Drop one group 2 result: the derived table is no longer final and
    // must not hand out a slot that the missing match could still change.
    let mut all = groups_done();
    all.retain(|m| m.id != "206");
    assert_eq!(resolve_placeholder("Group 2 Winner", &all, None), None);

    // A published standings table overrides the completeness check.
    assert_eq!(
        resolve_placeholder("Group 1 Winner", &all, Some(&standings())).as_deref(),
        Some("11")
    );
}

#[test]
fn bracket_placeholders_stay_unresolved_until_decided() {
    let all = groups_done();
    assert_eq!(resolve_placeholder("Semi-Final 1 Winner", &all, None), None);
    assert_eq!(resolve_placeholder("Semi-Final 2 Loser", &all, None), None);
    assert_eq!(resolve_placeholder("Final Winner", &all, None), None);
    assert_eq!(resolve_placeholder("3rd Place Winner", &all, None), None);
}

#[test]
fn decided_semis_resolve_winner_and_loser() {
    let all = bracket_decided(&["301", "302"]);

    assert_eq!(
        resolve_placeholder("Semi-Final 1 Winner", &all, None).as_deref(),
        Some("11")
    );
    assert_eq!(
        resolve_placeholder("Semi-Final 1 Loser", &all, None).as_deref(),
        Some("23")
    );
    // The second semi went to penalties; the declared winner still stands.
    assert_eq!(
        resolve_placeholder("Semi-Final 2 Winner", &all, None).as_deref(),
        Some("12")
    );
    assert_eq!(
        resolve_placeholder("Semi-Final 2 Loser", &all, None).as_deref(),
        Some("21")
    );
    let semi_two = all.iter().find(|m| m.id == "302").expect("semi present");
    assert!(semi_two.penalty_shootout);

    // Final still open.
    assert_eq!(resolve_placeholder("Final Winner", &all, None), None);
}

#[test]
fn resolution_is_stable_across_completion_supersets() {
    let feed = standings();
    let after_semis = bracket_decided(&["301", "302"]);
    let after_final = bracket_decided(&["301", "302", "401", "402"]);

    for name in [
        "Group 1 Winner",
        "Group 2 Runner-up",
        "Semi-Final 1 Winner",
        "Semi-Final 2 Loser",
    ] {
        let early = resolve_placeholder(name, &after_semis, Some(&feed));
        let late = resolve_placeholder(name, &after_final, Some(&feed));
        assert!(early.is_some(), "{name} should resolve after the semis");
        assert_eq!(early, late, "{name} must not change once decided");
    }

    assert_eq!(
        resolve_placeholder("Final Winner", &after_final, None).as_deref(),
        Some("11")
    );
    assert_eq!(
        resolve_placeholder("Final Loser", &after_final, None).as_deref(),
        Some("12")
    );
    assert_eq!(
        resolve_placeholder("3rd Place Winner", &after_final, None).as_deref(),
        Some("23")
    );
}

#[test]
fn resolve_bracket_binds_resolvable_slots_in_place() {
    let all = bracket_decided(&["301", "302"]);
    let resolved = resolve_bracket(&all, Some(&standings()));

    let final_match = resolved.iter().find(|m| m.id == "402").expect("final present");
    assert_eq!(final_match.home.slot, Some(SideRef::Team("11".to_string())));
    assert_eq!(final_match.away.slot, Some(SideRef::Team("12".to_string())));

    let third = resolved.iter().find(|m| m.id == "401").expect("third-place present");
    assert_eq!(third.home.slot, Some(SideRef::Team("23".to_string())));
    assert_eq!(third.away.slot, Some(SideRef::Team("21".to_string())));
}

#[test]
fn unknown_placeholder_shapes_resolve_to_none() {
    let all = bracket_decided(&["301", "302", "401", "402"]);
    assert_eq!(resolve_placeholder("Quarter-Final 1 Winner", &all, None), None);
    assert_eq!(resolve_placeholder("Semi-Final 3 Winner", &all, None), None);
    assert_eq!(resolve_placeholder("", &all, None), None);
    assert_eq!(resolve_placeholder("Harbour City", &all, None), None);
}
