//! Calendar-day grouping for the schedule views.

use std::collections::BTreeMap;

use chrono::FixedOffset;

use crate::matches::Match;

/// One calendar day of the schedule, keyed by the tournament-local date.
#[derive(Debug, Clone)]
pub struct MatchDay {
    /// Zero-padded `YYYY-MM-DD` in the target timezone.
    pub date: String,
    pub matches: Vec<Match>,
}

/// Bucket matches into calendar days of the target timezone, days ascending
/// and each day's matches ascending by kickoff instant.
///
/// Bucketing uses the UTC kickoff converted to `tz`, never the feed's local
/// string: a late-evening UTC kickoff can belong to the next (or previous)
/// calendar day locally. Matches without a parseable kickoff are left out of
/// the schedule; empty input yields an empty vector.
pub fn group_by_date(matches: &[Match], tz: FixedOffset) -> Vec<MatchDay> {
    let mut days: BTreeMap<String, Vec<Match>> = BTreeMap::new();

    for m in matches {
        let Some(kickoff) = m.kickoff_utc else {
            continue;
        };
        let key = kickoff.with_timezone(&tz).format("%Y-%m-%d").to_string();
        days.entry(key).or_default().push(m.clone());
    }

    days.into_iter()
        .map(|(date, mut bucket)| {
            bucket.sort_by(|a, b| {
                (a.kickoff_utc, a.match_number, &a.id).cmp(&(b.kickoff_utc, b.match_number, &b.id))
            });
            MatchDay {
                date,
                matches: bucket,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::{MatchSide, MatchStatus, parse_utc};

    fn scheduled(id: &str, utc: &str) -> Match {
        Match {
            id: id.to_string(),
            stage: None,
            group: None,
            kickoff_utc: parse_utc(utc),
            local_time: None,
            match_number: None,
            home: MatchSide::default(),
            away: MatchSide::default(),
            status: MatchStatus::Scheduled,
            winner: None,
            penalty_shootout: false,
        }
    }

    #[test]
    fn late_utc_kickoff_crosses_into_next_local_day() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let matches = vec![
            scheduled("a", "2026-06-12T23:30:00Z"),
            scheduled("b", "2026-06-12T18:00:00Z"),
        ];
        let days = group_by_date(&matches, tz);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2026-06-12");
        assert_eq!(days[0].matches[0].id, "b");
        assert_eq!(days[1].date, "2026-06-13");
        assert_eq!(days[1].matches[0].id, "a");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let tz = FixedOffset::east_opt(0).unwrap();
        assert!(group_by_date(&[], tz).is_empty());
    }

    #[test]
    fn unparseable_kickoffs_are_left_out() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let mut m = scheduled("a", "2026-06-12T18:00:00Z");
        m.kickoff_utc = None;
        assert!(group_by_date(&[m], tz).is_empty());
    }
}
