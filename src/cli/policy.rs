//! Policy command implementation

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::PolicyConfig;
use crate::error::Result;
use crate::models::PolicyDisplay;
use crate::output::{Formattable, json};

/// Parse `FAILED_ARGS` and print the normalized policy
pub fn run(opts: &GlobalOptions, failed_args: &str) -> Result<()> {
    let policy = PolicyConfig::from_yaml(failed_args)?;
    debug!("Normalized policy: {:?}", policy);

    match opts.format {
        OutputFormat::Json => {
            println!("{}", json::format_json(&policy)?);
            Ok(())
        }
        format => PolicyDisplay::rows(&policy).print(format),
    }
}
