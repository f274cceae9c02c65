pub mod bracket;
pub mod cms;
pub mod cms_fetch;
pub mod config;
pub mod feed;
pub mod feed_fetch;
pub mod http_cache;
pub mod http_client;
pub mod ids;
pub mod leaderboard;
pub mod matches;
pub mod schedule;
pub mod standings;
