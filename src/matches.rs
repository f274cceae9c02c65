//! The unified match model the rest of the crate works on, built by
//! reconciling the feed's match list with CMS match documents.
//!
//! The feed is authoritative for anything live (score, status, winner);
//! the CMS fills in editorial fields the feed omits (stage tags on early
//! schedules, match numbers, placeholder slots for the bracket).

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::cms::CmsMatch;
use crate::feed::{FeedMatchRow, FeedMatchSide};
use crate::ids::normalize_ref;

/// Tournament stage discriminant. Parsed exactly from the closed set of
/// source tags; anything else maps to no stage and the match drops out of
/// stage-specific views without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Group { round: u8 },
    Semifinal,
    ThirdPlace,
    Final,
}

impl Stage {
    pub fn parse(tag: &str, round_number: Option<u8>) -> Option<Stage> {
        match tag {
            "Round" | "Group Round" => Some(Stage::Group {
                round: round_number.unwrap_or(1),
            }),
            "Semi-Final" | "Semi-Finals" => Some(Stage::Semifinal),
            "3rd and 4th Place" | "Third Place" => Some(Stage::ThirdPlace),
            "Final" => Some(Stage::Final),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Stage::Group { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Scheduled,
    Live,
    Played,
}

impl MatchStatus {
    fn parse(raw: &str) -> MatchStatus {
        match raw {
            "Played" | "FullTime" | "Result" => MatchStatus::Played,
            "Playing" | "Live" => MatchStatus::Live,
            _ => MatchStatus::Scheduled,
        }
    }
}

/// A side's slot: a concrete team, or a symbolic bracket placeholder that
/// resolves once its dependency is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideRef {
    Team(String),
    Placeholder(String),
}

#[derive(Debug, Clone, Default)]
pub struct MatchSide {
    pub slot: Option<SideRef>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub score: Option<u8>,
}

impl MatchSide {
    pub fn team_ref(&self) -> Option<&str> {
        match &self.slot {
            Some(SideRef::Team(team_ref)) => Some(team_ref),
            _ => None,
        }
    }

    fn from_feed(side: &FeedMatchSide) -> MatchSide {
        let slot = side
            .team_ref
            .clone()
            .map(SideRef::Team)
            .or_else(|| side.name.as_deref().and_then(side_from_text));
        MatchSide {
            slot,
            name: side.name.clone(),
            short_name: side.short_name.clone(),
            score: side.score,
        }
    }
}

/// Classify free text from a CMS side field (or a feed side without a team
/// ref): a value that normalizes to digits is a team reference, any other
/// non-empty text is a placeholder label.
fn side_from_text(text: &str) -> Option<SideRef> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = normalize_ref(trimmed);
    if normalized.bytes().all(|b| b.is_ascii_digit()) && !normalized.is_empty() {
        Some(SideRef::Team(normalized))
    } else {
        Some(SideRef::Placeholder(trimmed.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct Match {
    pub id: String,
    pub stage: Option<Stage>,
    pub group: Option<String>,
    pub kickoff_utc: Option<DateTime<Utc>>,
    /// The provider's pre-rendered local kickoff string, display only.
    pub local_time: Option<String>,
    pub match_number: Option<u32>,
    pub home: MatchSide,
    pub away: MatchSide,
    pub status: MatchStatus,
    /// Normalized ref of the winning team, set on completion.
    pub winner: Option<String>,
    pub penalty_shootout: bool,
}

impl Match {
    pub fn from_feed(row: &FeedMatchRow) -> Match {
        Match {
            id: row.id.clone(),
            stage: Stage::parse(&row.round_type, row.round_number),
            group: row.group.clone(),
            kickoff_utc: parse_utc(&row.utc_time),
            local_time: row.local_time.clone(),
            match_number: row.match_number,
            home: MatchSide::from_feed(&row.home),
            away: MatchSide::from_feed(&row.away),
            status: MatchStatus::parse(&row.status),
            winner: row.winner.clone(),
            penalty_shootout: row.penalty_shootout,
        }
    }

    fn from_cms(doc: &CmsMatch) -> Match {
        Match {
            id: doc.match_ref.clone(),
            stage: doc.stage.as_deref().and_then(|tag| Stage::parse(tag, None)),
            group: doc.group.clone(),
            kickoff_utc: doc.kickoff.as_deref().and_then(parse_utc),
            local_time: None,
            match_number: doc.match_number,
            home: MatchSide {
                slot: side_from_text(&doc.home),
                ..MatchSide::default()
            },
            away: MatchSide {
                slot: side_from_text(&doc.away),
                ..MatchSide::default()
            },
            status: MatchStatus::Scheduled,
            winner: None,
            penalty_shootout: false,
        }
    }

    /// Both sides bound to concrete teams.
    pub fn has_two_teams(&self) -> bool {
        self.home.team_ref().is_some() && self.away.team_ref().is_some()
    }

    /// Finished, or carrying a declared winner ahead of the status flip.
    pub fn is_decided(&self) -> bool {
        self.status == MatchStatus::Played || self.winner.is_some()
    }

    /// The side that is not the declared winner; `None` until decided or
    /// for drawn matches.
    pub fn loser(&self) -> Option<String> {
        let winner = self.winner.as_deref()?;
        let home = self.home.team_ref()?;
        let away = self.away.team_ref()?;
        if winner == home {
            Some(away.to_string())
        } else if winner == away {
            Some(home.to_string())
        } else {
            None
        }
    }
}

/// Merge feed rows with CMS match documents into the unified list, sorted
/// by kickoff, then match number, then id.
pub fn reconcile(feed_rows: &[FeedMatchRow], cms_matches: &[CmsMatch]) -> Vec<Match> {
    let mut out: Vec<Match> = Vec::with_capacity(feed_rows.len());
    let mut seen: Vec<&str> = Vec::with_capacity(feed_rows.len());

    for row in feed_rows {
        let mut m = Match::from_feed(row);
        if let Some(doc) = cms_matches.iter().find(|d| d.match_ref == m.id) {
            overlay_cms(&mut m, doc);
        }
        seen.push(&row.id);
        out.push(m);
    }

    for doc in cms_matches {
        if !seen.iter().any(|id| *id == doc.match_ref) {
            out.push(Match::from_cms(doc));
        }
    }

    out.sort_by(|a, b| {
        (a.kickoff_utc, a.match_number, &a.id).cmp(&(b.kickoff_utc, b.match_number, &b.id))
    });
    out
}

fn overlay_cms(m: &mut Match, doc: &CmsMatch) {
    if m.stage.is_none() {
        m.stage = doc.stage.as_deref().and_then(|tag| Stage::parse(tag, None));
    }
    if m.group.is_none() {
        m.group = doc.group.clone();
    }
    if m.match_number.is_none() {
        m.match_number = doc.match_number;
    }
    // Bracket slots the feed hasn't bound yet come from the CMS document.
    if m.home.slot.is_none() {
        m.home.slot = side_from_text(&doc.home);
    }
    if m.away.slot.is_none() {
        m.away.slot = side_from_text(&doc.away);
    }
}

/// Tolerant UTC timestamp parse for the handful of shapes the sources emit.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    let bare = trimmed.trim_end_matches('Z').replace(' ', "T");
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&bare, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Stage classifier

/// Group-round matches, in schedule order.
pub fn group_stage_matches(matches: &[Match]) -> Vec<Match> {
    stage_subset(matches, |stage| stage.is_group())
}

pub fn semifinal_matches(matches: &[Match]) -> Vec<Match> {
    stage_subset(matches, |stage| stage == Stage::Semifinal)
}

pub fn third_place_matches(matches: &[Match]) -> Vec<Match> {
    stage_subset(matches, |stage| stage == Stage::ThirdPlace)
}

pub fn final_matches(matches: &[Match]) -> Vec<Match> {
    stage_subset(matches, |stage| stage == Stage::Final)
}

fn stage_subset(matches: &[Match], keep: impl Fn(Stage) -> bool) -> Vec<Match> {
    let mut subset: Vec<Match> = matches
        .iter()
        .filter(|m| m.stage.is_some_and(&keep))
        .cloned()
        .collect();
    subset.sort_by(|a, b| {
        (a.kickoff_utc, a.match_number, &a.id).cmp(&(b.kickoff_utc, b.match_number, &b.id))
    });
    subset
}
