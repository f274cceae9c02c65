//! HTTP wrappers for the provider's feeds. Parsing lives in [`crate::feed`];
//! everything here is URL assembly, the shared cache, and the per-team
//! season-stat fan-out.

use anyhow::{Context, Result};
use log::{debug, warn};
use rayon::prelude::*;

use crate::config::AppConfig;
use crate::feed::{
    FeedMatchRow, StandingsFeed, TeamSeasonStats, parse_match_feed_json,
    parse_season_stats_json, parse_standings_feed_json,
};
use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;

/// Competition match list (fixtures and results).
pub fn fetch_match_feed(cfg: &AppConfig) -> Result<Vec<FeedMatchRow>> {
    let body = fetch_feed(cfg, "F1", &[])?;
    parse_match_feed_json(&body)
}

/// Per-group standings tables.
pub fn fetch_standings_feed(cfg: &AppConfig) -> Result<StandingsFeed> {
    let body = fetch_feed(cfg, "F3", &[])?;
    parse_standings_feed_json(&body)
}

/// One team's season stats document.
pub fn fetch_team_season_stats(cfg: &AppConfig, team_ref: &str) -> Result<Option<TeamSeasonStats>> {
    let body = fetch_feed(cfg, "F30", &[("team", team_ref)])?;
    let mut teams = parse_season_stats_json(&body)?;
    if teams.len() > 1 {
        teams.retain(|team| team.team_ref == team_ref);
    }
    Ok(teams.into_iter().next())
}

#[derive(Debug, Default)]
pub struct SeasonStatsResult {
    pub teams: Vec<TeamSeasonStats>,
    pub errors: Vec<String>,
}

/// Fetch season stats for every team, fanned out on a bounded pool.
/// Individual failures are collected, not fatal: a team whose stats
/// document is late should not blank the whole stat sheet.
pub fn fetch_all_season_stats(cfg: &AppConfig, team_refs: &[String]) -> SeasonStatsResult {
    let pool = build_fetch_pool(cfg.fetch_parallelism);

    let fetched: Vec<std::result::Result<Option<TeamSeasonStats>, String>> =
        with_fetch_pool(&pool, || {
            team_refs
                .par_iter()
                .map(|team_ref| {
                    fetch_team_season_stats(cfg, team_ref)
                        .map_err(|err| format!("season stats {team_ref}: {err}"))
                })
                .collect()
        });

    let mut result = SeasonStatsResult::default();
    for item in fetched {
        match item {
            Ok(Some(team)) => result.teams.push(team),
            Ok(None) => {}
            Err(err) => {
                warn!("{err}");
                result.errors.push(err);
            }
        }
    }
    // Fan-out completion order is nondeterministic; the callers expect a
    // stable team order.
    result.teams.sort_by(|a, b| a.team_ref.cmp(&b.team_ref));
    result
}

fn fetch_feed(cfg: &AppConfig, feed_type: &str, extra: &[(&str, &str)]) -> Result<String> {
    let client = http_client()?;
    let mut url = format!(
        "{}/competition.php?competition={}&season_id={}&feed_type={}",
        cfg.feed_base.trim_end_matches('/'),
        cfg.competition_id,
        cfg.season_id,
        feed_type
    );
    for (key, value) in extra {
        url.push_str(&format!("&{key}={value}"));
    }
    if let (Some(user), Some(key)) = (cfg.feed_user.as_deref(), cfg.feed_key.as_deref()) {
        url.push_str(&format!("&user={user}&psw={key}"));
    }
    debug!("fetching {feed_type} feed");
    fetch_json_cached(client, &url, &[])
        .with_context(|| format!("{feed_type} feed request failed"))
}

fn build_fetch_pool(threads: usize) -> Option<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .ok()
}

fn with_fetch_pool<T>(pool: &Option<rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if let Some(pool) = pool.as_ref() {
        pool.install(action)
    } else {
        action()
    }
}
