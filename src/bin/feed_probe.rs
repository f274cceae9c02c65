//! Operator smoke check: pull the configured feeds and CMS documents, run
//! the full reconciliation, and print what the site would render.

use anyhow::{Context, Result};
use env_logger::Env;
use log::warn;

use sevens_data::bracket::resolve_bracket;
use sevens_data::cms::team_index;
use sevens_data::config::AppConfig;
use sevens_data::leaderboard::{StatCategory, build_leaderboard};
use sevens_data::matches::{self, MatchSide, SideRef};
use sevens_data::schedule::group_by_date;
use sevens_data::standings::group_table;
use sevens_data::{cms_fetch, feed_fetch};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cfg = AppConfig::from_env();

    let feed_rows = feed_fetch::fetch_match_feed(&cfg).context("match feed")?;
    let standings_feed = match feed_fetch::fetch_standings_feed(&cfg) {
        Ok(feed) => Some(feed),
        Err(err) => {
            warn!("standings feed unavailable: {err}");
            None
        }
    };
    let docs = cms_fetch::fetch_documents(&cfg).context("cms documents")?;

    let all = matches::reconcile(&feed_rows, &docs.matches);
    let teams = team_index(&docs.teams);
    let name_of = |team_ref: &str| -> String {
        teams
            .get(team_ref)
            .map(|team| team.display_name().to_string())
            .unwrap_or_else(|| team_ref.to_string())
    };

    println!("== Schedule ==");
    for day in group_by_date(&all, cfg.target_tz()) {
        println!("{}", day.date);
        for m in &day.matches {
            let side = |s: &MatchSide| match &s.slot {
                Some(SideRef::Team(team_ref)) => name_of(team_ref),
                Some(SideRef::Placeholder(label)) => label.clone(),
                None => "TBC".to_string(),
            };
            let score = match (m.home.score, m.away.score) {
                (Some(h), Some(a)) => format!("{h}-{a}"),
                _ => "v".to_string(),
            };
            println!("  {} {} {}", side(&m.home), score, side(&m.away));
        }
    }

    let mut groups: Vec<String> = all.iter().filter_map(|m| m.group.clone()).collect();
    groups.sort();
    groups.dedup();
    for group in &groups {
        println!("\n== Group {group} ==");
        for entry in group_table(group, &all, standings_feed.as_ref()) {
            let rec = entry.record.unwrap_or_default();
            println!(
                "{:>2}. {:<24} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3}",
                entry.position,
                name_of(&entry.team_ref),
                rec.played,
                rec.wins,
                rec.draws,
                rec.losses,
                rec.goal_difference(),
                rec.points,
            );
        }
    }

    println!("\n== Bracket ==");
    let resolved = resolve_bracket(&all, standings_feed.as_ref());
    for m in resolved.iter().filter(|m| {
        m.stage
            .is_some_and(|stage| !stage.is_group())
    }) {
        let side = |s: &MatchSide| match &s.slot {
            Some(SideRef::Team(team_ref)) => name_of(team_ref),
            Some(SideRef::Placeholder(label)) => format!("[{label}]"),
            None => "TBC".to_string(),
        };
        println!("  {} v {}", side(&m.home), side(&m.away));
    }

    let team_refs: Vec<String> = docs.teams.iter().map(|t| t.team_ref.clone()).collect();
    let stats = feed_fetch::fetch_all_season_stats(&cfg, &team_refs);
    if !stats.errors.is_empty() {
        warn!("{} season stat fetches failed", stats.errors.len());
    }

    for category in StatCategory::ALL {
        let page = build_leaderboard(&stats.teams, category, None, 0);
        println!("\n== {} ==", category.label());
        for row in &page.rows {
            println!(
                "{:>3} {:<24} {:<20} {:>4}",
                row.rank_label,
                row.player_name,
                row.team_name,
                row.primary,
            );
        }
    }

    Ok(())
}
