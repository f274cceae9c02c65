use std::fs;
use std::path::PathBuf;

use sevens_data::cms::parse_documents_json;
use sevens_data::feed::{
    parse_match_feed_json, parse_season_stats_json, parse_standings_feed_json,
};
use sevens_data::matches::{self, Match, SideRef, Stage};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_match_feed_fixture() {
    let rows = parse_match_feed_json(&read_fixture("match_feed.json")).expect("fixture should parse");
    assert_eq!(rows.len(), 17);

    let opener = rows.iter().find(|r| r.id == "101").expect("opener present");
    assert_eq!(opener.group.as_deref(), Some("1"));
    assert_eq!(opener.round_type, "Round");
    assert_eq!(opener.round_number, Some(1));
    assert_eq!(opener.home.team_ref.as_deref(), Some("11"));
    assert_eq!(opener.home.short_name.as_deref(), Some("HCY"));
    // `abbr` is the alternate spelling of the short-name field.
    assert_eq!(opener.away.short_name.as_deref(), Some("NQU"));
    assert_eq!(opener.winner.as_deref(), Some("11"));
    assert_eq!(opener.local_time.as_deref(), Some("2026-06-12 11:00"));

    // Composite-id and utc-time fallback keys.
    let alt = rows.iter().find(|r| r.id == "201").expect("alt-keyed row present");
    assert_eq!(alt.utc_time, "2026-06-12T14:00:00Z");
    assert_eq!(alt.group.as_deref(), Some("2"));

    // Bracket rows carry placeholder names, no team refs.
    let semi = rows.iter().find(|r| r.id == "301").expect("semi present");
    assert!(semi.home.team_ref.is_none());
    assert_eq!(semi.home.name.as_deref(), Some("Group 1 Winner"));
}

#[test]
fn match_feed_rows_classify_into_stages() {
    let rows = parse_match_feed_json(&read_fixture("match_feed.json")).expect("fixture should parse");
    let all: Vec<Match> = rows.iter().map(Match::from_feed).collect();

    let groups = matches::group_stage_matches(&all);
    let semis = matches::semifinal_matches(&all);
    let third = matches::third_place_matches(&all);
    let finals = matches::final_matches(&all);

    assert_eq!(groups.len(), 12);
    assert_eq!(semis.len(), 2);
    assert_eq!(third.len(), 1);
    assert_eq!(finals.len(), 1);

    // The shield fixture has an unrecognized round type: it belongs to no
    // stage partition but is still present in the flat list.
    let partitioned = groups.len() + semis.len() + third.len() + finals.len();
    assert_eq!(partitioned, all.len() - 1);
    assert!(all.iter().any(|m| m.id == "501" && m.stage.is_none()));

    // Semifinals come back in schedule order.
    assert_eq!(semis[0].id, "301");
    assert_eq!(semis[1].id, "302");
}

#[test]
fn parses_standings_feed_fixture() {
    let feed =
        parse_standings_feed_json(&read_fixture("standings_feed.json")).expect("fixture should parse");
    // "Group 1" in the payload, addressable by bare tag.
    let group = feed.group("1").expect("group 1 present");
    assert_eq!(group.teams.len(), 4);
    assert_eq!(group.teams[0].team_ref, "11");
    assert_eq!(group.teams[0].position, 1);
    assert_eq!(group.teams[0].points, Some(9));
    assert!(feed.group("2").is_none());
}

#[test]
fn parses_season_stats_fixture() {
    let teams =
        parse_season_stats_json(&read_fixture("season_stats.json")).expect("fixture should parse");
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].team_ref, "11");
    assert_eq!(teams[0].team_name, "Harbour City");
    assert_eq!(teams[0].players.len(), 4);

    let ava = &teams[0].players[0];
    assert_eq!(ava.name, "Ava Price");
    assert_eq!(ava.player_ref, "1101");
    // Numeric and string stat values both come through as strings.
    assert!(ava.stats.iter().any(|s| s.name == "Goals" && s.value == "5"));
}

#[test]
fn parses_cms_documents_fixture() {
    let docs =
        parse_documents_json(&read_fixture("cms_documents.json")).expect("fixture should parse");
    assert_eq!(docs.teams.len(), 8);
    assert_eq!(docs.matches.len(), 2);

    let hcy = docs.teams.iter().find(|t| t.team_ref == "11").expect("team present");
    assert_eq!(hcy.name, "Harbour City WFC");
    assert_eq!(hcy.display_name(), "Harbour City");
    assert_eq!(hcy.group.as_deref(), Some("1"));

    let semi = docs.matches.iter().find(|m| m.match_ref == "301").expect("doc present");
    assert_eq!(semi.home, "Group 1 Winner");
    assert_eq!(semi.match_number, Some(13));
}

#[test]
fn reconcile_overlays_cms_fields_on_feed_rows() {
    let rows = parse_match_feed_json(&read_fixture("match_feed.json")).expect("fixture should parse");
    let docs =
        parse_documents_json(&read_fixture("cms_documents.json")).expect("fixture should parse");
    let all = matches::reconcile(&rows, &docs.matches);
    assert_eq!(all.len(), rows.len());

    // The semi keeps the feed's stage and its placeholder slots survive
    // the CMS overlay.
    let semi = all.iter().find(|m| m.id == "301").expect("semi present");
    assert_eq!(semi.stage, Some(Stage::Semifinal));
    assert_eq!(
        semi.home.slot,
        Some(SideRef::Placeholder("Group 1 Winner".to_string()))
    );
}

#[test]
fn reconcile_keeps_cms_only_matches() {
    let docs = parse_documents_json(&read_fixture("cms_documents.json")).expect("fixture should parse");
    let all = matches::reconcile(&[], &docs.matches);
    assert_eq!(all.len(), 2);
    let opener = all.iter().find(|m| m.id == "101").expect("opener present");
    assert_eq!(opener.stage, Some(Stage::Group { round: 1 }));
    assert_eq!(opener.home.slot, Some(SideRef::Team("11".to_string())));
    assert_eq!(opener.match_number, Some(1));
}

#[test]
fn empty_and_null_bodies_parse_to_empty() {
    assert!(parse_match_feed_json("null").expect("null should parse").is_empty());
    assert!(parse_match_feed_json("").expect("empty should parse").is_empty());
    assert!(
        parse_standings_feed_json("null")
            .expect("null should parse")
            .standings
            .is_empty()
    );
    assert!(parse_season_stats_json("null").expect("null should parse").is_empty());
    assert!(parse_documents_json("null").expect("null should parse").teams.is_empty());
}
