//! Shared CLI argument types
//!
//! Reusable argument structs flattened into commands with
//! `#[command(flatten)]`.

mod common;
mod connection;
mod global;
mod scan;

pub use common::OutputFormat;
pub use connection::ConnectionArgs;
pub use global::GlobalOptions;
pub use scan::ScanArgs;
