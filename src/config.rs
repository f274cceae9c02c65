//! Environment-driven configuration for the fetch layer and the schedule's
//! target timezone. Values come from the process environment (a `.env` file
//! is loaded by the binary); empty values count as unset.

use std::env;

use chrono::FixedOffset;

const DEFAULT_FEED_BASE: &str = "https://omo.akamai.opta.net";
const DEFAULT_TZ_OFFSET_MINUTES: i32 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed_base: String,
    pub feed_user: Option<String>,
    pub feed_key: Option<String>,
    pub competition_id: String,
    pub season_id: String,
    pub cms_api: Option<String>,
    /// Offset of the tournament's local timezone from UTC, in minutes.
    pub tz_offset_minutes: i32,
    pub fetch_parallelism: usize,
    pub poll_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            feed_base: opt_env("APP_FEED_BASE").unwrap_or_else(|| DEFAULT_FEED_BASE.to_string()),
            feed_user: opt_env("APP_FEED_USER"),
            feed_key: opt_env("APP_FEED_KEY"),
            competition_id: opt_env("APP_COMPETITION_ID").unwrap_or_else(|| "0".to_string()),
            season_id: opt_env("APP_SEASON_ID").unwrap_or_else(|| "0".to_string()),
            cms_api: opt_env("APP_CMS_API"),
            tz_offset_minutes: env::var("APP_TZ_OFFSET_MINUTES")
                .ok()
                .and_then(|val| val.parse::<i32>().ok())
                .unwrap_or(DEFAULT_TZ_OFFSET_MINUTES)
                .clamp(-14 * 60, 14 * 60),
            fetch_parallelism: env::var("APP_FETCH_PARALLELISM")
                .ok()
                .and_then(|val| val.parse::<usize>().ok())
                .unwrap_or(6)
                .clamp(2, 32),
            poll_secs: env::var("APP_POLL_SECS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(60)
                .max(10),
        }
    }

    /// The fixed offset used when bucketing kickoffs into calendar days.
    pub fn target_tz(&self) -> FixedOffset {
        FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
    }
}

pub fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        if val.trim().is_empty() {
            None
        } else {
            Some(val.trim().to_string())
        }
    })
}
