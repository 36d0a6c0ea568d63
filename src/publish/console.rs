//! Console publisher for runs without GitHub access

use async_trait::async_trait;
use colored::Colorize;

use super::{Publication, PublishAction, ReportPublisher};
use crate::cli::OutputFormat;
use crate::error::Result;

/// Prints the report to the terminal.
///
/// With JSON output the report goes to stderr so stdout stays parseable.
#[derive(Debug, Clone, Copy)]
pub struct ConsolePublisher {
    to_stderr: bool,
}

impl ConsolePublisher {
    pub fn for_format(format: OutputFormat) -> Self {
        Self {
            to_stderr: format == OutputFormat::Json,
        }
    }

    fn render(publication: &Publication<'_>, action: PublishAction) -> String {
        let mut out = String::new();
        if action == PublishAction::Merge {
            out.push_str(&format!(
                "{} Scan is clean; automerge requested but no pull request is available\n",
                "○".dimmed()
            ));
        }
        out.push_str(&publication.render_body());
        out
    }
}

#[async_trait]
impl ReportPublisher for ConsolePublisher {
    async fn publish(&self, publication: &Publication<'_>, action: PublishAction) -> Result<()> {
        let text = Self::render(publication, action);
        if self.to_stderr {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
        Ok(())
    }
}
