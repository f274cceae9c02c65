//! CMS document fetch: the repository API hands out a content ref first,
//! then documents are queried against that ref page by page.

use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;

use crate::cms::{CmsDocuments, parse_documents_json};
use crate::config::AppConfig;
use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;

const PAGE_SIZE: u32 = 100;
const MAX_PAGES: u32 = 10;

/// Fetch every team and match document from the configured CMS repository.
pub fn fetch_documents(cfg: &AppConfig) -> Result<CmsDocuments> {
    let Some(api) = cfg.cms_api.as_deref() else {
        debug!("no cms endpoint configured, skipping document fetch");
        return Ok(CmsDocuments::default());
    };
    let api = api.trim_end_matches('/');
    let content_ref = fetch_master_ref(api)?;

    let mut docs = CmsDocuments::default();
    for page in 1..=MAX_PAGES {
        let url = format!(
            "{api}/documents/search?ref={content_ref}&pageSize={PAGE_SIZE}&page={page}"
        );
        let client = http_client()?;
        let body = fetch_json_cached(client, &url, &[])
            .with_context(|| format!("cms documents page {page} request failed"))?;
        let page_docs = parse_documents_json(&body)?;
        let fetched = page_docs.teams.len() + page_docs.matches.len();
        docs.teams.extend(page_docs.teams);
        docs.matches.extend(page_docs.matches);
        if fetched < PAGE_SIZE as usize {
            break;
        }
    }

    debug!(
        "cms documents: {} teams, {} matches",
        docs.teams.len(),
        docs.matches.len()
    );
    Ok(docs)
}

/// The ref of the currently published content. The API lists every release;
/// the one flagged `isMasterRef` is the live one.
fn fetch_master_ref(api: &str) -> Result<String> {
    let client = http_client()?;
    let body =
        fetch_json_cached(client, api, &[]).context("cms repository request failed")?;
    let root: Value = serde_json::from_str(body.trim()).context("invalid cms repository json")?;
    root.get("refs")
        .and_then(|refs| refs.as_array())
        .and_then(|refs| {
            refs.iter().find(|entry| {
                entry
                    .get("isMasterRef")
                    .and_then(|flag| flag.as_bool())
                    .unwrap_or(false)
            })
        })
        .and_then(|entry| entry.get("ref"))
        .and_then(|r| r.as_str())
        .map(|r| r.to_string())
        .ok_or_else(|| anyhow::anyhow!("cms repository response has no master ref"))
}
