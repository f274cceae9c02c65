//! Stat-sheet leaderboards: per-category player tables built from the
//! season stats feed.
//!
//! The feed addresses every statistic by its human-readable name, and the
//! names drift ("Total Shots", "Shots On Target ( inc goals )"), so the
//! stat dictionary matches by lowercase needle with explicit excludes
//! rather than exact keys.

use crate::feed::{PlayerSeasonStats, TeamSeasonStats};
use crate::ids::normalize_ref;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Scorers,
    Playmakers,
    Defenders,
    Goalkeepers,
}

impl StatCategory {
    pub const ALL: [StatCategory; 4] = [
        StatCategory::Scorers,
        StatCategory::Playmakers,
        StatCategory::Defenders,
        StatCategory::Goalkeepers,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatCategory::Scorers => "Scorers",
            StatCategory::Playmakers => "Playmakers",
            StatCategory::Defenders => "Defenders",
            StatCategory::Goalkeepers => "Goalkeepers",
        }
    }

    /// The stat a category ranks by.
    pub fn primary(&self) -> StatKey {
        match self {
            StatCategory::Scorers => StatKey::Goals,
            StatCategory::Playmakers => StatKey::Assists,
            StatCategory::Defenders => StatKey::Tackles,
            StatCategory::Goalkeepers => StatKey::Saves,
        }
    }

    /// Column set projected into the table, primary first.
    pub fn columns(&self) -> &'static [StatKey] {
        match self {
            StatCategory::Scorers => &[
                StatKey::Goals,
                StatKey::Shots,
                StatKey::ShotsOnTarget,
                StatKey::MinutesPlayed,
            ],
            StatCategory::Playmakers => &[
                StatKey::Assists,
                StatKey::ChancesCreated,
                StatKey::Passes,
                StatKey::MinutesPlayed,
            ],
            StatCategory::Defenders => &[
                StatKey::Tackles,
                StatKey::Interceptions,
                StatKey::Blocks,
                StatKey::Clearances,
            ],
            StatCategory::Goalkeepers => &[
                StatKey::Saves,
                StatKey::GoalsConceded,
                StatKey::CleanSheets,
                StatKey::MinutesPlayed,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    Goals,
    Assists,
    Shots,
    ShotsOnTarget,
    ChancesCreated,
    Passes,
    Tackles,
    Interceptions,
    Blocks,
    Clearances,
    Saves,
    GoalsConceded,
    CleanSheets,
    MinutesPlayed,
}

impl StatKey {
    pub fn label(&self) -> &'static str {
        match self {
            StatKey::Goals => "Goals",
            StatKey::Assists => "Assists",
            StatKey::Shots => "Shots",
            StatKey::ShotsOnTarget => "On Target",
            StatKey::ChancesCreated => "Chances Created",
            StatKey::Passes => "Passes",
            StatKey::Tackles => "Tackles",
            StatKey::Interceptions => "Interceptions",
            StatKey::Blocks => "Blocks",
            StatKey::Clearances => "Clearances",
            StatKey::Saves => "Saves",
            StatKey::GoalsConceded => "Conceded",
            StatKey::CleanSheets => "Clean Sheets",
            StatKey::MinutesPlayed => "Minutes",
        }
    }

    fn needles(&self) -> &'static [&'static str] {
        match self {
            StatKey::Goals => &["goals"],
            StatKey::Assists => &["goal assists", "assists"],
            StatKey::Shots => &["total shots", "shots"],
            StatKey::ShotsOnTarget => &["shots on target"],
            StatKey::ChancesCreated => &["chances created"],
            StatKey::Passes => &["total passes", "passes"],
            StatKey::Tackles => &["total tackles", "tackles"],
            StatKey::Interceptions => &["interceptions"],
            StatKey::Blocks => &["blocks"],
            StatKey::Clearances => &["total clearances", "clearances"],
            StatKey::Saves => &["saves made", "saves"],
            StatKey::GoalsConceded => &["goals conceded"],
            StatKey::CleanSheets => &["clean sheets"],
            StatKey::MinutesPlayed => &["time played", "minutes played"],
        }
    }

    fn excludes(&self) -> &'static [&'static str] {
        match self {
            StatKey::Goals => &["conceded", "against", "assists"],
            StatKey::Shots => &["on target"],
            _ => &[],
        }
    }
}

/// Look up one stat for a player through the dictionary.
pub fn stat_value(player: &PlayerSeasonStats, key: StatKey) -> Option<f64> {
    let needles = key.needles();
    let excludes = key.excludes();
    for stat in &player.stats {
        let name = stat.name.to_lowercase();
        if !needles.iter().any(|needle| name.contains(needle)) {
            continue;
        }
        if excludes.iter().any(|exclude| name.contains(exclude)) {
            continue;
        }
        if let Some(value) = parse_number(&stat.value) {
            return Some(value);
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    /// Display rank: `"3"`, or `"T1"` when the primary stat is shared.
    pub rank_label: String,
    pub player_name: String,
    pub team_ref: String,
    pub team_name: String,
    pub primary: f64,
    /// Aligned with the category's [`StatCategory::columns`].
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardPage {
    pub category: StatCategory,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub rows: Vec<LeaderboardRow>,
}

/// Build one page of the leaderboard for a category.
///
/// Pure in all inputs: the same `(teams, category, team_filter, page)`
/// always yields the identical page. Players with a zero or absent primary
/// stat are dropped; order is primary descending with player name as the
/// display tie-order. Tied primary values share a rank with a `T` marker
/// and the next distinct value resumes at its positional index, so a
/// three-way tie at 2 is followed by 5. A page index past the end yields
/// an empty row set with the totals intact.
pub fn build_leaderboard(
    teams: &[TeamSeasonStats],
    category: StatCategory,
    team_filter: Option<&str>,
    page: usize,
) -> LeaderboardPage {
    let wanted_team = team_filter.map(normalize_ref);
    let columns = category.columns();

    let mut ranked: Vec<(f64, LeaderboardRow)> = Vec::new();
    for team in teams {
        if let Some(wanted) = &wanted_team {
            if &team.team_ref != wanted {
                continue;
            }
        }
        for player in &team.players {
            let Some(primary) = stat_value(player, category.primary()) else {
                continue;
            };
            if primary == 0.0 {
                continue;
            }
            let values = columns.iter().map(|key| stat_value(player, *key)).collect();
            ranked.push((
                primary,
                LeaderboardRow {
                    rank_label: String::new(),
                    player_name: player.name.clone(),
                    team_ref: team.team_ref.clone(),
                    team_name: team.team_name.clone(),
                    primary,
                    values,
                },
            ));
        }
    }

    ranked.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.player_name.cmp(&b.1.player_name))
    });

    // First pass: shared rank per distinct primary value.
    let mut rank_of: Vec<usize> = Vec::with_capacity(ranked.len());
    for idx in 0..ranked.len() {
        if idx > 0 && ranked[idx].0 == ranked[idx - 1].0 {
            rank_of.push(rank_of[idx - 1]);
        } else {
            rank_of.push(idx + 1);
        }
    }
    // Second pass: a rank held by more than one row gets the tie marker.
    for (idx, (_, row)) in ranked.iter_mut().enumerate() {
        let rank = rank_of[idx];
        let tied = rank_of.iter().filter(|r| **r == rank).count() > 1;
        row.rank_label = if tied {
            format!("T{rank}")
        } else {
            rank.to_string()
        };
    }

    let total_rows = ranked.len();
    let total_pages = total_rows.div_ceil(PAGE_SIZE);
    let rows = ranked
        .into_iter()
        .map(|(_, row)| row)
        .skip(page * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    LeaderboardPage {
        category,
        page,
        total_pages,
        total_rows,
        rows,
    }
}

/// Cursor over the leaderboard: remembers the selected category, team
/// filter and page, and resets the page whenever either selection changes.
/// Holds no derived data; every read recomputes from the stats passed in.
#[derive(Debug, Clone)]
pub struct LeaderboardView {
    pub category: StatCategory,
    pub team_filter: Option<String>,
    pub page: usize,
}

impl LeaderboardView {
    pub fn new() -> Self {
        LeaderboardView {
            category: StatCategory::Scorers,
            team_filter: None,
            page: 0,
        }
    }

    pub fn select_category(&mut self, category: StatCategory) {
        if self.category != category {
            self.category = category;
            self.page = 0;
        }
    }

    pub fn set_team_filter(&mut self, team_filter: Option<String>) {
        let team_filter = team_filter.map(|t| normalize_ref(&t));
        if self.team_filter != team_filter {
            self.team_filter = team_filter;
            self.page = 0;
        }
    }

    pub fn next_page(&mut self, teams: &[TeamSeasonStats]) {
        let total = self.current(teams).total_pages;
        if self.page + 1 < total {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn current(&self, teams: &[TeamSeasonStats]) -> LeaderboardPage {
        build_leaderboard(teams, self.category, self.team_filter.as_deref(), self.page)
    }
}

impl Default for LeaderboardView {
    fn default() -> Self {
        LeaderboardView::new()
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
