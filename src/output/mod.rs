//! Terminal presentation of result records

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::records::ResultRecord;

/// Display column width for record names
const NAME_WIDTH: usize = 60;

/// Counter elements that ride along in collection bodies but are not records
const SKIPPED_TYPES: &[&str] = &["completed-count", "uncompleted-count"];

/// Types that have no useful deep link; shown with an empty link column
const LINKLESS_TYPES: &[&str] = &[
    "company",
    "person",
    "comment",
    "post",
    "milestone",
    "todo-list",
    "time-entry",
    "category",
    "attachment",
];

/// Which record fields to print under each result line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    /// Summary lines only, no field echo (selector omitted)
    None,
    /// A literal `false`: print nothing at all, not even summary lines
    Suppress,
    All,
    Fields(Vec<String>),
}

impl FieldSelector {
    /// Omitted/empty shows summary lines without fields, "false" silences
    /// the presenter entirely, `*` shows all fields, anything else is a
    /// comma-separated field list.
    pub fn parse(arg: Option<&str>) -> Self {
        match arg.map(str::trim) {
            None | Some("") => FieldSelector::None,
            Some(f) if f.eq_ignore_ascii_case("false") => FieldSelector::Suppress,
            Some("*") => FieldSelector::All,
            Some(list) => FieldSelector::Fields(
                list.split(',')
                    .map(|f| f.trim().to_string())
                    .filter(|f| !f.is_empty())
                    .collect(),
            ),
        }
    }
}

/// Resolve the deep link for a record type, or an empty string for types
/// that deliberately have none. Unknown types are fatal so new record types
/// surface loudly instead of printing broken links.
pub fn link_for(record_type: &str, id: i64, api_url: &str) -> Result<String> {
    let template = match record_type {
        "todo-item" => "/todo_items/{}/comments",
        "template" => "/templates/list/{}",
        "project" => "/projects/{}",
        other if LINKLESS_TYPES.contains(&other) => return Ok(String::new()),
        other => return Err(Error::MissingLinkTemplate(other.to_string())),
    };
    Ok(format!(
        "{api_url}{}",
        template.replacen("{}", &id.to_string(), 1)
    ))
}

/// Print records in the standard list layout and a trailing count of what
/// was actually shown. A `Suppress` selector prints nothing at all.
pub fn present(records: &[ResultRecord], selector: &FieldSelector, api_url: &str) -> Result<()> {
    if *selector == FieldSelector::Suppress {
        return Ok(());
    }

    let mut shown = 0;
    for record in records {
        if SKIPPED_TYPES.contains(&record.record_type.as_str()) {
            continue;
        }
        let link = link_for(&record.record_type, record.id, api_url)?;
        let name = display_name(record);
        println!("({}) {:<width$} [{}]", record.id, name, link, width = NAME_WIDTH);

        match selector {
            FieldSelector::None | FieldSelector::Suppress => {}
            FieldSelector::All => {
                for (field, value) in &record.fields {
                    println!(" -- {field}: {value}");
                }
            }
            // Requested fields echo in request order, empty when absent
            FieldSelector::Fields(fields) => {
                for field in fields {
                    println!(" -- {field}: {}", record.field(field).unwrap_or(""));
                }
            }
        }
        shown += 1;
    }
    println!("{}", "-".repeat(NAME_WIDTH));
    println!("Total Results: {shown}");
    Ok(())
}

/// The record's display name: the type-specific name field, markup stripped,
/// clipped to the display column.
fn display_name(record: &ResultRecord) -> String {
    let field = match record.record_type.as_str() {
        "todo-item" => "content",
        _ => "name",
    };
    let raw = record.field(field).unwrap_or("");
    clip(&strip_tags(raw))
}

fn strip_tags(value: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    tag.replace_all(value, "").into_owned()
}

fn clip(value: &str) -> String {
    if value.chars().count() > NAME_WIDTH {
        let head: String = value.chars().take(NAME_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        value.to_string()
    }
}
