//! Scan command implementation
//!
//! Wires the environment into the pipeline: connection settings, policy,
//! GitHub context, publisher choice, and the progress display.

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use serde::Serialize;

use crate::cli::args::{GlobalOptions, ScanArgs};
use crate::cli::OutputFormat;
use crate::client::CodeThreatClient;
use crate::client::models::{ScanStatus, Severities};
use crate::config::{GitHubContext, PolicyConfig};
use crate::error::{Error, Result};
use crate::models::SeverityRow;
use crate::models::display::state_marker;
use crate::output::{Formattable, json};
use crate::pipeline::gate::Verdict;
use crate::pipeline::orchestrator::ScanOutcome;
use crate::pipeline::{PipelineInputs, run_pipeline};
use crate::publish::{ConsolePublisher, GitHubPublisher, PublishAction, ReportPublisher};

/// Machine-readable result of a scan run
#[derive(Debug, Serialize)]
struct ScanSummary<'a> {
    scan_id: &'a str,
    outcome: &'static str,
    state: String,
    progress: u64,
    severities: Severities,
    weaknesses: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<&'a Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sarif_path: Option<String>,
}

impl<'a> ScanSummary<'a> {
    fn new(outcome: &'a ScanOutcome, sarif_path: &Path) -> Self {
        let status = outcome.status();
        let (label, verdict, action, sarif) = match outcome {
            ScanOutcome::Detached { .. } => ("detached", None, None, None),
            ScanOutcome::NoReport { .. } => ("no_report", None, None, None),
            ScanOutcome::Completed {
                verdict, action, ..
            } => (
                "completed",
                Some(verdict),
                Some(action.to_string()),
                Some(sarif_path.display().to_string()),
            ),
        };
        Self {
            scan_id: outcome.scan_id(),
            outcome: label,
            state: status.state.to_string(),
            progress: status.progress(),
            severities: status.severities,
            weaknesses: status.weaknesses.len(),
            verdict,
            action,
            sarif_path: sarif,
        }
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{spinner} Scanning [{bar:30}] {pos}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style.progress_chars("=> "));
    bar.enable_steady_tick(Duration::from_millis(250));
    bar
}

fn severity_message(status: &ScanStatus) -> String {
    let sev = &status.severities;
    format!(
        "critical {} | high {} | medium {} | low {}",
        sev.critical, sev.high, sev.medium, sev.low
    )
}

/// Run the full scan pipeline for the current repository
pub async fn run(opts: &GlobalOptions, args: &ScanArgs) -> Result<()> {
    // Everything that can be wrong with the configuration fails here,
    // before the first request
    let server = args.connection.to_settings()?;
    server.credentials.validate()?;
    let policy = PolicyConfig::from_yaml(&args.failed_args)?;
    let github = GitHubContext::from_env()?;
    let scan = args.scan_settings();
    debug!("Policy: {:?}", policy);
    debug!("GitHub context: {:?}", github);

    let client = CodeThreatClient::new(&server.server)?;
    let publisher: Box<dyn ReportPublisher> = match scan.github_token.as_deref() {
        Some(token) => Box::new(GitHubPublisher::new(token, &github)?),
        None => {
            warn!("GITHUB_TOKEN not set; the report will be printed instead of published");
            Box::new(ConsolePublisher::for_format(opts.format))
        }
    };

    eprintln!(
        "{} Scanning {}/{} ({}) on {}",
        "→".cyan(),
        github.owner,
        github.repo,
        github.branch,
        server.server
    );

    // Debug log lines and a redrawing bar don't mix
    let bar = if opts.debug {
        ProgressBar::hidden()
    } else {
        progress_bar()
    };
    let result = run_pipeline(
        &client,
        publisher.as_ref(),
        &PipelineInputs {
            server: &server,
            github: &github,
            scan: &scan,
            policy: &policy,
        },
        |status| {
            bar.set_position(status.progress());
            bar.set_message(severity_message(status));
            debug!("{}", severity_message(status));
        },
    )
    .await;
    bar.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(Error::PolicyViolation { reasons }) => {
            for reason in &reasons {
                eprintln!("{} {}", "✗".red(), reason);
            }
            return Err(Error::PolicyViolation { reasons });
        }
        Err(e) => return Err(e),
    };

    if opts.format == OutputFormat::Json {
        println!("{}", json::format_json(&ScanSummary::new(&outcome, &scan.sarif_path))?);
        return Ok(());
    }

    let status = outcome.status();
    match &outcome {
        ScanOutcome::Detached { scan_id, .. } => {
            println!(
                "{} Scan {} started; sync_scan is off, not waiting for results",
                "○".dimmed(),
                scan_id
            );
        }
        ScanOutcome::NoReport { scan_id, .. } => {
            println!(
                "{} Scan {} finished without a report; nothing to publish",
                "⚠".yellow(),
                scan_id
            );
        }
        ScanOutcome::Completed {
            scan_id, action, ..
        } => {
            println!("{} Scan {} completed", state_marker(status.state), scan_id);
            let published = match action {
                PublishAction::Merge => "merged",
                PublishAction::Comment => "posted as a comment",
            };
            println!("{} Report {}", "✓".green(), published);
            println!(
                "{} SARIF saved to {}",
                "✓".green(),
                scan.sarif_path.display().to_string().cyan()
            );
        }
    }
    SeverityRow::rows(status).print(opts.format)
}
