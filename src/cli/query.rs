//! Search and xpath command implementations

use crate::cli::CommandContext;
use crate::client::Endpoint;
use crate::error::{Error, Result};
use crate::output::{self, FieldSelector};
use crate::records;

/// Full-text search: any record with a field containing the query matches.
/// Sugar over the xpath command.
pub async fn search(
    ctx: &mut CommandContext,
    endpoint: &str,
    query: &str,
    fields: Option<&str>,
) -> Result<()> {
    // The query is spliced into a single-quoted XPath literal; XPath 1.0 has
    // no escape for quotes inside one.
    if query.contains('\'') {
        return Err(Error::Other(
            "Search query must not contain single quotes".to_string(),
        ));
    }
    let expr = format!("/*/*/*[contains(., '{query}')]/..");
    xpath(ctx, endpoint, &expr, fields).await
}

/// Run an XPath expression against an endpoint body and present the matched
/// records.
pub async fn xpath(
    ctx: &mut CommandContext,
    endpoint: &str,
    expr: &str,
    fields: Option<&str>,
) -> Result<()> {
    let endpoint = Endpoint::normalize(endpoint);
    let body = ctx.api.get(&endpoint).await?;
    let records = records::select(&body, expr)?;
    let selector = FieldSelector::parse(fields);
    output::present(&records, &selector, ctx.api.base_url())
}
