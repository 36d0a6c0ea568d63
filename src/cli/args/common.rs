//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rounded table for humans
    #[default]
    Table,
    /// JSON with a metadata envelope, for scripts
    Json,
}
