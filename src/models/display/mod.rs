//! Display model implementations for table and JSON output
//!
//! Display models turn API and config types into rows with CLI-friendly
//! column names.

mod policy;
mod scan;

pub use policy::PolicyDisplay;
pub use scan::{ScanDisplay, SeverityRow, state_marker};
