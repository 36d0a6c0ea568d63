//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global flags, captured once in `main` and passed to every handler
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions {
    pub format: OutputFormat,
    pub debug: bool,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            debug: cli.debug,
        }
    }
}
