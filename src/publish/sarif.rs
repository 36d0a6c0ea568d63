//! SARIF artifact persistence

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Result;

/// Write the SARIF document pretty-printed, creating parent directories
pub fn write_sarif(path: &Path, document: &serde_json::Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(document)?;
    fs::write(path, contents)?;
    debug!("SARIF written to {}", path.display());
    Ok(())
}
