//! Typed views over the CMS's document API.
//!
//! Editors author team and match documents in the CMS; each document carries
//! the feed reference it mirrors, which is the join key back into the feed
//! (always through [`crate::ids::normalize_ref`]). Knockout match documents
//! hold symbolic team slots ("Semi-Final 1 Winner") until the bracket
//! resolves, so a side field here is free text, not necessarily a ref.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::ids::normalize_ref;

#[derive(Debug, Clone)]
pub struct CmsTeam {
    pub doc_id: String,
    /// Normalized feed team reference.
    pub team_ref: String,
    pub name: String,
    pub short_name: Option<String>,
    pub group: Option<String>,
}

impl CmsTeam {
    /// Display name with the editorial short form preferred when present.
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct CmsMatch {
    pub doc_id: String,
    /// Normalized feed match reference.
    pub match_ref: String,
    /// A feed team ref, or a symbolic placeholder for bracket matches.
    pub home: String,
    pub away: String,
    pub stage: Option<String>,
    pub group: Option<String>,
    pub kickoff: Option<String>,
    pub match_number: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct CmsDocuments {
    pub teams: Vec<CmsTeam>,
    pub matches: Vec<CmsMatch>,
}

/// Parse one page of the CMS documents-search response.
pub fn parse_documents_json(raw: &str) -> Result<CmsDocuments> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(CmsDocuments::default());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid cms documents json")?;
    let mut docs = CmsDocuments::default();
    let Some(results) = root.get("results").and_then(|v| v.as_array()) else {
        return Ok(docs);
    };

    for result in results {
        let doc_type = result.get("type").and_then(|v| v.as_str()).unwrap_or("");
        let doc_id = result
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let Some(data) = result.get("data") else {
            continue;
        };
        match doc_type {
            "team" => {
                if let Some(team) = parse_team_doc(doc_id, data) {
                    docs.teams.push(team);
                }
            }
            "match" => {
                if let Some(m) = parse_match_doc(doc_id, data) {
                    docs.matches.push(m);
                }
            }
            _ => {}
        }
    }

    Ok(docs)
}

fn parse_team_doc(doc_id: String, data: &Value) -> Option<CmsTeam> {
    let team_ref = field_text(data, &["opta_id", "feed_id"])?;
    let name = field_text(data, &["name", "title"])?;
    Some(CmsTeam {
        doc_id,
        team_ref: normalize_ref(&team_ref),
        name,
        short_name: field_text(data, &["short_name", "abbreviation"]),
        group: field_text(data, &["group"]).map(|g| crate::feed::normalize_group_tag(&g)),
    })
}

fn parse_match_doc(doc_id: String, data: &Value) -> Option<CmsMatch> {
    let match_ref = field_text(data, &["opta_id", "feed_id", "match_id"])?;
    Some(CmsMatch {
        doc_id,
        match_ref: normalize_ref(&match_ref),
        home: field_text(data, &["home_team", "home"]).unwrap_or_default(),
        away: field_text(data, &["away_team", "away"]).unwrap_or_default(),
        stage: field_text(data, &["stage", "round"]),
        group: field_text(data, &["group"]).map(|g| crate::feed::normalize_group_tag(&g)),
        kickoff: field_text(data, &["kickoff", "date"]),
        match_number: field_text(data, &["match_number"]).and_then(|n| n.trim().parse().ok()),
    })
}

/// Index teams by normalized feed ref for cross-source name lookups.
pub fn team_index(teams: &[CmsTeam]) -> HashMap<String, &CmsTeam> {
    teams
        .iter()
        .map(|team| (team.team_ref.clone(), team))
        .collect()
}

/// Read a CMS field as plain text. Editors sometimes store plain strings,
/// sometimes numbers, and rich-text fields arrive as span arrays with a
/// `text` member on each block; the first non-empty form wins.
fn field_text(data: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        let Some(v) = data.get(*key) else {
            continue;
        };
        match v {
            Value::String(s) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Value::Number(n) => return Some(n.to_string()),
            Value::Array(blocks) => {
                let joined: Vec<&str> = blocks
                    .iter()
                    .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect();
                if !joined.is_empty() {
                    return Some(joined.join(" "));
                }
            }
            _ => {}
        }
    }
    None
}
