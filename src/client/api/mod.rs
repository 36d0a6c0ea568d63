//! API trait definitions split by responsibility
//!
//! This module organizes the CodeThreat API surface into focused sub-traits:
//! - [`AuthApi`] - Sign-in and organization membership
//! - [`ProjectApi`] - Project lookup and registration
//! - [`ScanApi`] - Scan start, status polling, and result retrieval
//!
//! The [`CodeThreatApi`](super::CodeThreatApi) super-trait combines all three.

mod auth;
mod project;
mod scan;

pub use auth::AuthApi;
pub use project::ProjectApi;
pub use scan::ScanApi;
