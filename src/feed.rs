//! Typed views over the sports-data provider's JSON feeds.
//!
//! Three feeds matter to the site: the competition match list (fixtures and
//! results), the per-group standings tables, and the per-team season stats.
//! The provider's payloads are irregular (ids arrive prefixed or bare,
//! team blocks spell the short name two different ways, numbers show up
//! as strings), so parsing goes through explicit fallback chains instead
//! of a rigid schema. Every parse entry point treats an empty or `"null"`
//! body as a valid empty payload.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::ids::normalize_ref;

/// One fixture or result from the competition match feed.
#[derive(Debug, Clone)]
pub struct FeedMatchRow {
    pub id: String,
    pub round_type: String,
    pub round_number: Option<u8>,
    pub group: Option<String>,
    pub status: String,
    /// Authoritative kickoff instant, RFC 3339 UTC.
    pub utc_time: String,
    /// The provider's pre-rendered local kickoff, display only.
    pub local_time: Option<String>,
    pub match_number: Option<u32>,
    pub home: FeedMatchSide,
    pub away: FeedMatchSide,
    pub winner: Option<String>,
    pub penalty_shootout: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FeedMatchSide {
    /// Normalized team reference; absent for unresolved bracket slots.
    pub team_ref: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub score: Option<u8>,
}

pub fn parse_match_feed_json(raw: &str) -> Result<Vec<FeedMatchRow>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid match feed json")?;
    let Some(list) = root.get("matches").and_then(|v| v.as_array()) else {
        return Ok(Vec::new());
    };
    Ok(list.iter().filter_map(parse_match_entry).collect())
}

fn parse_match_entry(v: &Value) -> Option<FeedMatchRow> {
    let id = pick_string(v, &["uID", "id", "matchId"])?;
    let home = v.get("home").map(parse_match_side).unwrap_or_default();
    let away = v.get("away").map(parse_match_side).unwrap_or_default();

    let winner = pick_string(v, &["winner", "winnerRef"])
        .map(|w| normalize_ref(&w))
        .filter(|w| !w.is_empty());
    let result_type = pick_string(v, &["resultType", "decision"]).unwrap_or_default();

    Some(FeedMatchRow {
        id: normalize_ref(&id),
        round_type: pick_string(v, &["roundType", "round"]).unwrap_or_default(),
        round_number: pick_u32(v, &["roundNumber"]).map(|n| n.min(u8::MAX as u32) as u8),
        group: pick_string(v, &["groupName", "group"]).map(|g| normalize_group_tag(&g)),
        status: pick_string(v, &["status", "matchStatus"]).unwrap_or_default(),
        utc_time: pick_string(v, &["utcTime", "dateUtc"]).unwrap_or_default(),
        local_time: pick_string(v, &["localTime", "dateLocal"]),
        match_number: pick_u32(v, &["matchNumber", "matchDay"]),
        home,
        away,
        winner,
        penalty_shootout: result_type == "PenaltyShootout",
    })
}

fn parse_match_side(v: &Value) -> FeedMatchSide {
    let team_ref = pick_string(v, &["teamRef", "teamId", "uID"])
        .map(|r| normalize_ref(&r))
        .filter(|r| !r.is_empty());
    FeedMatchSide {
        team_ref,
        name: pick_string(v, &["name", "teamName"]),
        // Two spellings observed for the same field.
        short_name: pick_string(v, &["shortName", "abbr"]),
        score: pick_u32(v, &["score", "goals"]).map(|s| s.min(u8::MAX as u32) as u8),
    }
}

/// Group tags arrive as `"1"`, `"Group 1"` or `"Group A"`; standings and
/// match entries must agree, so the `Group ` prefix is dropped here.
pub fn normalize_group_tag(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("Group ")
        .unwrap_or(trimmed)
        .to_string()
}

// ---------------------------------------------------------------------------
// Standings feed

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsFeed {
    #[serde(default)]
    pub standings: Vec<GroupStandingsFeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupStandingsFeed {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub teams: Vec<FeedStandingRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedStandingRow {
    pub position: u32,
    #[serde(rename = "teamRef")]
    pub team_ref: String,
    #[serde(default)]
    pub played: Option<u8>,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default, rename = "goalDifference")]
    pub goal_difference: Option<i32>,
}

impl StandingsFeed {
    pub fn group(&self, group: &str) -> Option<&GroupStandingsFeed> {
        let wanted = normalize_group_tag(group);
        self.standings
            .iter()
            .find(|g| normalize_group_tag(&g.group) == wanted)
    }
}

pub fn parse_standings_feed_json(raw: &str) -> Result<StandingsFeed> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(StandingsFeed::default());
    }
    let mut feed: StandingsFeed =
        serde_json::from_str(trimmed).context("invalid standings feed json")?;
    for group in &mut feed.standings {
        group.group = normalize_group_tag(&group.group);
        for row in &mut group.teams {
            row.team_ref = normalize_ref(&row.team_ref);
        }
    }
    Ok(feed)
}

// ---------------------------------------------------------------------------
// Season stats feed

/// One team's cumulative season statistics, one entry per squad player.
#[derive(Debug, Clone)]
pub struct TeamSeasonStats {
    pub team_ref: String,
    pub team_name: String,
    pub players: Vec<PlayerSeasonStats>,
}

#[derive(Debug, Clone)]
pub struct PlayerSeasonStats {
    pub player_ref: String,
    pub name: String,
    pub position: Option<String>,
    /// Sparse human-readable stat name → value, as supplied.
    pub stats: Vec<StatValue>,
}

#[derive(Debug, Clone)]
pub struct StatValue {
    pub name: String,
    pub value: String,
}

pub fn parse_season_stats_json(raw: &str) -> Result<Vec<TeamSeasonStats>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid season stats json")?;

    // Either a whole-competition document ({"teams": [...]}) or a single
    // team document; both shapes occur depending on the query.
    let teams: Vec<&Value> = match root.get("teams").and_then(|v| v.as_array()) {
        Some(list) => list.iter().collect(),
        None => vec![&root],
    };

    Ok(teams.into_iter().filter_map(parse_team_stats).collect())
}

fn parse_team_stats(v: &Value) -> Option<TeamSeasonStats> {
    let team_ref = pick_string(v, &["teamRef", "teamId", "uID"])?;
    let players = v
        .get("players")
        .or_else(|| v.get("player"))
        .and_then(|p| p.as_array())
        .map(|list| list.iter().filter_map(parse_player_stats).collect())
        .unwrap_or_default();
    Some(TeamSeasonStats {
        team_ref: normalize_ref(&team_ref),
        team_name: pick_string(v, &["name", "teamName"]).unwrap_or_default(),
        players,
    })
}

fn parse_player_stats(v: &Value) -> Option<PlayerSeasonStats> {
    let name = pick_string(v, &["name", "playerName", "knownName"])?;
    let player_ref = pick_string(v, &["playerRef", "playerId", "uID"])
        .map(|r| normalize_ref(&r))
        .unwrap_or_default();
    let stats = v
        .get("stats")
        .or_else(|| v.get("stat"))
        .and_then(|s| s.as_array())
        .map(|list| {
            list.iter()
                .filter_map(|stat| {
                    let stat_name = pick_string(stat, &["name", "type", "title"])?;
                    let value = stat
                        .get("value")
                        .map(value_to_string)
                        .filter(|s| !s.is_empty() && s != "-")?;
                    Some(StatValue {
                        name: stat_name,
                        value,
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    Some(PlayerSeasonStats {
        player_ref,
        name,
        position: pick_string(v, &["position", "pos"]),
        stats,
    })
}

// ---------------------------------------------------------------------------
// Value helpers

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => {
            if *b {
                "1".to_string()
            } else {
                "0".to_string()
            }
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(s) = as_string(v) {
                return Some(s);
            }
        }
    }
    None
}

fn pick_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_u64() {
                return Some(num as u32);
            }
            if let Some(s) = v.as_str() {
                if let Ok(num) = s.trim().parse::<u32>() {
                    return Some(num);
                }
            }
        }
    }
    None
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
