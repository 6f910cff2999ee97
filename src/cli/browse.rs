//! Browse command implementation

use crate::cli::CommandContext;
use crate::error::{Error, Result};
use crate::output;
use crate::prompt::{SystemOpener, UrlOpener};

/// Open a record's web page in the default browser.
pub fn run(ctx: &CommandContext, id: i64, record_type: &str) -> Result<()> {
    let link = output::link_for(record_type, id, ctx.api.base_url())?;
    if link.is_empty() {
        return Err(Error::Other(format!(
            "No browsable page for record type '{record_type}'"
        )));
    }

    println!("Opening {link}");
    SystemOpener.open(&link)?;
    Ok(())
}
