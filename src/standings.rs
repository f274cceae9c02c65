//! Group tables: the per-team record fold and the ranking that the site
//! shows (and that placeholder resolution depends on).

use std::collections::HashMap;

use crate::feed::StandingsFeed;
use crate::matches::Match;

/// Cumulative win/draw/loss record for one team. Derived, never stored:
/// recomputed from the match list on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TeamRecord {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// Fold decided matches into per-team records.
///
/// Only matches with two concrete team sides contribute; a declared winner
/// is worth 3 points and a win (the other side takes the loss), a finished
/// match without one is a draw worth a point each. Goals accumulate either
/// way. With `group_filter`, only group-round matches carrying that tag
/// fold; otherwise every decided match in the input does, so callers wanting
/// a single stage pre-filter with the stage classifiers.
pub fn aggregate(matches: &[Match], group_filter: Option<&str>) -> HashMap<String, TeamRecord> {
    let mut records: HashMap<String, TeamRecord> = HashMap::new();

    for m in matches {
        if let Some(group) = group_filter {
            let in_group = m.stage.is_some_and(|stage| stage.is_group())
                && m.group.as_deref() == Some(group);
            if !in_group {
                continue;
            }
        }
        if !m.is_decided() {
            continue;
        }
        let (Some(home), Some(away)) = (m.home.team_ref(), m.away.team_ref()) else {
            continue;
        };
        let home_goals = u32::from(m.home.score.unwrap_or(0));
        let away_goals = u32::from(m.away.score.unwrap_or(0));

        {
            let rec = records.entry(home.to_string()).or_default();
            rec.played += 1;
            rec.goals_for += home_goals;
            rec.goals_against += away_goals;
        }
        {
            let rec = records.entry(away.to_string()).or_default();
            rec.played += 1;
            rec.goals_for += away_goals;
            rec.goals_against += home_goals;
        }

        match m.winner.as_deref() {
            Some(winner) => {
                let loser = if winner == home { away } else { home };
                let win = records.entry(winner.to_string()).or_default();
                win.wins += 1;
                win.points += 3;
                records.entry(loser.to_string()).or_default().losses += 1;
            }
            None => {
                for team in [home, away] {
                    let rec = records.entry(team.to_string()).or_default();
                    rec.draws += 1;
                    rec.points += 1;
                }
            }
        }
    }

    records
}

/// One row of a ranked group table.
#[derive(Debug, Clone)]
pub struct StandingEntry {
    /// Dense 1..N position within the group.
    pub position: u32,
    pub team_ref: String,
    pub record: Option<TeamRecord>,
}

/// Rank a group's teams.
///
/// When the feed publishes a standings table for the group its declared
/// positions are used verbatim (the feed is the source of truth once it
/// speaks); computed records are still attached for display. Otherwise the
/// order is derived from [`aggregate`]: points descending, goal difference
/// descending, then first-appearance order in the match list. An unknown
/// group yields an empty table.
pub fn group_table(
    group: &str,
    matches: &[Match],
    feed: Option<&StandingsFeed>,
) -> Vec<StandingEntry> {
    let records = aggregate(matches, Some(group));

    if let Some(feed_group) = feed.and_then(|f| f.group(group)) {
        if !feed_group.teams.is_empty() {
            let mut rows: Vec<StandingEntry> = feed_group
                .teams
                .iter()
                .map(|row| StandingEntry {
                    position: row.position,
                    team_ref: row.team_ref.clone(),
                    record: records.get(&row.team_ref).copied(),
                })
                .collect();
            rows.sort_by_key(|entry| entry.position);
            return rows;
        }
    }

    // First-appearance order is the stable base the tie-break sorts over.
    let mut order: Vec<String> = Vec::new();
    for m in matches {
        let in_group =
            m.stage.is_some_and(|stage| stage.is_group()) && m.group.as_deref() == Some(group);
        if !in_group {
            continue;
        }
        for team in [m.home.team_ref(), m.away.team_ref()].into_iter().flatten() {
            if !order.iter().any(|seen| seen == team) {
                order.push(team.to_string());
            }
        }
    }

    order.sort_by_key(|team| {
        let rec = records.get(team).copied().unwrap_or_default();
        (std::cmp::Reverse(rec.points), std::cmp::Reverse(rec.goal_difference()))
    });

    order
        .into_iter()
        .enumerate()
        .map(|(idx, team_ref)| StandingEntry {
            position: idx as u32 + 1,
            record: records.get(&team_ref).copied(),
            team_ref,
        })
        .collect()
}
