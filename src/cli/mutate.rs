//! Post and delete command implementations

use crate::cli::CommandContext;
use crate::client::Endpoint;
use crate::error::Result;

pub async fn post(
    ctx: &mut CommandContext,
    endpoint: &str,
    body: String,
    fields: Option<&str>,
) -> Result<()> {
    let endpoint = Endpoint::normalize(endpoint);
    let response = ctx.api.post(&endpoint, body).await?;
    report(&response, fields);
    Ok(())
}

pub async fn delete(ctx: &mut CommandContext, endpoint: &str, fields: Option<&str>) -> Result<()> {
    let endpoint = Endpoint::normalize(endpoint);
    let response = ctx.api.delete(&endpoint).await?;
    report(&response, fields);
    Ok(())
}

/// Mutations often return an empty body on success; say so rather than
/// printing nothing.
fn report(response: &str, fields: Option<&str>) {
    if super::fetch::suppressed(fields) {
        return;
    }
    if response.trim().is_empty() {
        println!("Success!");
    } else {
        println!("{response}");
    }
}
