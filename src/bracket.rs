//! Knockout-stage placeholder resolution.
//!
//! Bracket matches are published with symbolic team slots ("Group 1
//! Winner", "Semi-Final 2 Loser") long before the participants are known.
//! Resolution is a pure query over current match state: it returns the
//! concrete team ref once the dependency is decided and `None` before,
//! so callers can re-ask as results arrive without tracking anything.

use crate::feed::StandingsFeed;
use crate::matches::{self, Match, SideRef, Stage};
use crate::standings;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Dependency {
    GroupPosition { group: String, position: u32 },
    BracketMatch { stage: Stage, ordinal: usize, want_winner: bool },
}

/// Resolve a placeholder display name against current match state.
///
/// Never panics; anything unparseable or not yet decided yields `None`.
/// Once a call returns a team for a given state, any completion-superset of
/// that state returns the same team.
pub fn resolve_placeholder(
    name: &str,
    matches: &[Match],
    standings_feed: Option<&StandingsFeed>,
) -> Option<String> {
    match parse_placeholder(name)? {
        Dependency::GroupPosition { group, position } => {
            resolve_group_position(&group, position, matches, standings_feed)
        }
        Dependency::BracketMatch {
            stage,
            ordinal,
            want_winner,
        } => resolve_bracket_match(stage, ordinal, want_winner, matches),
    }
}

/// Return the match list with every resolvable placeholder slot replaced by
/// its concrete team. Unresolvable slots are left symbolic.
pub fn resolve_bracket(
    matches: &[Match],
    standings_feed: Option<&StandingsFeed>,
) -> Vec<Match> {
    let mut out = matches.to_vec();
    for m in &mut out {
        for side in [&mut m.home, &mut m.away] {
            if let Some(SideRef::Placeholder(label)) = &side.slot {
                if let Some(team_ref) = resolve_placeholder(label, matches, standings_feed) {
                    side.slot = Some(SideRef::Team(team_ref));
                }
            }
        }
    }
    out
}

fn parse_placeholder(name: &str) -> Option<Dependency> {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

    match lowered.as_slice() {
        [group, _tag, outcome] if group.as_str() == "group" => {
            let position = match outcome.as_str() {
                "winner" => 1,
                "runner-up" | "runners-up" => 2,
                _ => return None,
            };
            Some(Dependency::GroupPosition {
                group: crate::feed::normalize_group_tag(tokens[1]),
                position,
            })
        }
        [semi, n, outcome] if matches!(semi.as_str(), "semi-final" | "semifinal") => {
            Some(Dependency::BracketMatch {
                stage: Stage::Semifinal,
                ordinal: n.parse().ok()?,
                want_winner: parse_outcome(outcome)?,
            })
        }
        [third, place, outcome]
            if matches!(third.as_str(), "3rd" | "third") && place.as_str() == "place" =>
        {
            Some(Dependency::BracketMatch {
                stage: Stage::ThirdPlace,
                ordinal: 1,
                want_winner: parse_outcome(outcome)?,
            })
        }
        [word, outcome] if word.as_str() == "final" => Some(Dependency::BracketMatch {
            stage: Stage::Final,
            ordinal: 1,
            want_winner: parse_outcome(outcome)?,
        }),
        _ => None,
    }
}

fn parse_outcome(raw: &str) -> Option<bool> {
    match raw {
        "winner" => Some(true),
        "loser" => Some(false),
        _ => None,
    }
}

fn resolve_group_position(
    group: &str,
    position: u32,
    matches: &[Match],
    standings_feed: Option<&StandingsFeed>,
) -> Option<String> {
    // A derived table only counts once the whole group has played out;
    // resolving against a half-finished group could hand a slot to a team
    // that later drops, and resolution must never change its answer.
    let has_feed_table = standings_feed
        .and_then(|feed| feed.group(group))
        .is_some_and(|g| !g.teams.is_empty());
    if !has_feed_table {
        let group_matches: Vec<&Match> = matches
            .iter()
            .filter(|m| {
                m.stage.is_some_and(|stage| stage.is_group())
                    && m.group.as_deref() == Some(group)
            })
            .collect();
        if group_matches.is_empty() || !group_matches.iter().all(|m| m.is_decided()) {
            return None;
        }
    }

    standings::group_table(group, matches, standings_feed)
        .into_iter()
        .find(|entry| entry.position == position)
        .map(|entry| entry.team_ref)
}

fn resolve_bracket_match(
    stage: Stage,
    ordinal: usize,
    want_winner: bool,
    all: &[Match],
) -> Option<String> {
    let staged = match stage {
        Stage::Semifinal => matches::semifinal_matches(all),
        Stage::ThirdPlace => matches::third_place_matches(all),
        Stage::Final => matches::final_matches(all),
        Stage::Group { .. } => return None,
    };
    let m = staged.get(ordinal.checked_sub(1)?)?;
    if !m.is_decided() {
        return None;
    }
    if want_winner {
        m.winner.clone()
    } else {
        m.loser()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_supported_shapes() {
        assert_eq!(
            parse_placeholder("Group 1 Winner"),
            Some(Dependency::GroupPosition {
                group: "1".to_string(),
                position: 1
            })
        );
        assert_eq!(
            parse_placeholder("Group A Runner-up"),
            Some(Dependency::GroupPosition {
                group: "A".to_string(),
                position: 2
            })
        );
        assert_eq!(
            parse_placeholder("Semi-Final 2 Loser"),
            Some(Dependency::BracketMatch {
                stage: Stage::Semifinal,
                ordinal: 2,
                want_winner: false
            })
        );
        assert_eq!(
            parse_placeholder("Final Winner"),
            Some(Dependency::BracketMatch {
                stage: Stage::Final,
                ordinal: 1,
                want_winner: true
            })
        );
        assert_eq!(parse_placeholder("Quarter-Final 1 Winner"), None);
        assert_eq!(parse_placeholder(""), None);
    }
}
