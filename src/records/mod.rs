//! Generic record model over the API's XML payloads
//!
//! Every collection response has the same shape: a container element whose
//! immediate element children are the records. No per-type schema exists;
//! records keep their tag name as the type and their child elements as
//! ordered string fields.

pub mod scrape;

use sxd_document::dom::{ChildOfElement, Element};
use sxd_document::parser;
use sxd_xpath::{Context, Factory, Value};

use crate::error::ApiError;

/// One record lifted out of an XML response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// The record's element tag, e.g. `project` or `todo-item`
    pub record_type: String,
    /// Value of the `<id>` child, 0 when absent or non-numeric
    pub id: i64,
    /// Child elements in document order, as (name, text) pairs
    pub fields: Vec<(String, String)>,
}

impl ResultRecord {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a collection body: every element child of the document element
/// becomes one record.
pub fn parse_records(body: &str) -> Result<Vec<ResultRecord>, ApiError> {
    let package = parser::parse(body).map_err(|e| ApiError::InvalidXml(format!("{e:?}")))?;
    let document = package.as_document();

    let Some(root) = document.root().children().iter().find_map(|c| c.element()) else {
        return Ok(Vec::new());
    };

    Ok(root
        .children()
        .iter()
        .filter_map(|c| c.element())
        .map(element_to_record)
        .collect())
}

/// Evaluate an XPath 1.0 expression and lift each matched element into a
/// record. Non-nodeset results (strings, numbers) yield no records.
pub fn select(body: &str, expr: &str) -> Result<Vec<ResultRecord>, ApiError> {
    let package = parser::parse(body).map_err(|e| ApiError::InvalidXml(format!("{e:?}")))?;
    let document = package.as_document();

    let xpath = Factory::new()
        .build(expr)
        .map_err(|e| ApiError::Xpath(format!("{e:?}")))?
        .ok_or_else(|| ApiError::Xpath(format!("Empty expression: {expr}")))?;

    let context = Context::new();
    let value = xpath
        .evaluate(&context, document.root())
        .map_err(|e| ApiError::Xpath(format!("{e:?}")))?;

    let records = match value {
        Value::Nodeset(nodes) => nodes
            .document_order()
            .into_iter()
            .filter_map(|node| node.element())
            .map(element_to_record)
            .collect(),
        _ => Vec::new(),
    };
    Ok(records)
}

/// Synthesize a collection body from records, matching the shape
/// [`parse_records`] reads back.
pub fn to_xml(container: &str, records: &[ResultRecord]) -> String {
    let mut xml = String::new();
    xml.push_str(&format!("<{container}>\n"));
    for record in records {
        xml.push_str(&format!("  <{}>\n", record.record_type));
        for (name, value) in &record.fields {
            xml.push_str(&format!("    <{name}>{}</{name}>\n", escape_text(value)));
        }
        xml.push_str(&format!("  </{}>\n", record.record_type));
    }
    xml.push_str(&format!("</{container}>\n"));
    xml
}

pub(crate) fn element_to_record(element: Element) -> ResultRecord {
    let record_type = element.name().local_part().to_string();
    let mut id = 0;
    let mut fields = Vec::new();

    for child in element.children() {
        if let Some(child_el) = child.element() {
            let name = child_el.name().local_part().to_string();
            let text = element_text(child_el);
            if name == "id" {
                id = text.trim().parse().unwrap_or(0);
            }
            fields.push((name, text));
        }
    }

    ResultRecord {
        record_type,
        id,
        fields,
    }
}

/// Concatenated direct text content; nested markup is ignored so a field
/// value never contains child element text.
fn element_text(element: Element) -> String {
    element
        .children()
        .iter()
        .filter_map(|c| match c {
            ChildOfElement::Text(t) => Some(t.text()),
            _ => None,
        })
        .collect()
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
