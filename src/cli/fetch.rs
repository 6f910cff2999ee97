//! Get command implementation

use crate::cli::CommandContext;
use crate::client::Endpoint;
use crate::error::Result;

/// Fetch an endpoint and echo the raw XML body. A literal 'false' fields
/// argument suppresses the echo, for warming the cache quietly.
pub async fn run(ctx: &mut CommandContext, endpoint: &str, fields: Option<&str>) -> Result<()> {
    let endpoint = Endpoint::normalize(endpoint);
    let body = ctx.api.get(&endpoint).await?;

    if suppressed(fields) {
        return Ok(());
    }
    if body.trim().is_empty() {
        println!("Empty response.");
    } else {
        println!("{body}");
    }
    Ok(())
}

/// A literal 'false' fields argument means no echo at all
pub(crate) fn suppressed(fields: Option<&str>) -> bool {
    matches!(fields, Some(f) if f.trim().eq_ignore_ascii_case("false"))
}
