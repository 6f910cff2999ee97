//! Scrapers that lift records out of HTML-only pages
//!
//! Some resources never got API coverage and only exist as web pages. Each
//! such endpoint needs a hand-written extractor; anything without one is an
//! explicit error rather than a silent empty result.

use regex::Regex;
use std::sync::OnceLock;

use super::ResultRecord;
use crate::error::ApiError;

/// Extract records from an HTML-only page body.
pub fn extract(slug: &str, html: &str) -> Result<Vec<ResultRecord>, ApiError> {
    match slug {
        "templates" => Ok(extract_templates(html)),
        other => Err(ApiError::UnimplementedEndpoint(other.to_string())),
    }
}

/// Project templates are listed as anchors to `/templates/list/<id>`.
fn extract_templates(html: &str) -> Vec<ResultRecord> {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    let anchor = ANCHOR.get_or_init(|| {
        Regex::new(r#"(?is)<a[^>]*href="/templates/list/(\d+)"[^>]*>(.*?)</a>"#).unwrap()
    });

    anchor
        .captures_iter(html)
        .filter_map(|caps| {
            let id: i64 = caps[1].parse().ok()?;
            let name = strip_tags(&caps[2]).trim().to_string();
            Some(ResultRecord {
                record_type: "template".to_string(),
                id,
                fields: vec![
                    ("id".to_string(), id.to_string()),
                    ("name".to_string(), name),
                ],
            })
        })
        .collect()
}

fn strip_tags(fragment: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    tag.replace_all(fragment, "").into_owned()
}
