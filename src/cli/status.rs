//! Status command implementation

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, ConnectionArgs};
use crate::client::ScanApi;
use crate::error::Result;
use crate::models::ScanDisplay;
use crate::output::Formattable;

/// Fetch one status snapshot and print it
pub async fn run(opts: &GlobalOptions, scan_id: &str, connection: &ConnectionArgs) -> Result<()> {
    let ctx = CommandContext::new(opts.format, connection).await?;
    let status = ctx.client.scan_status(scan_id).await?;

    vec![ScanDisplay::new(scan_id, &status)].print(ctx.format)
}
