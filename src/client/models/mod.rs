//! CodeThreat API data models
//!
//! This module contains the wire types exchanged with the CodeThreat API.
//! Models are organized by resource type for easy discovery.

mod auth;
mod org;
mod project;
mod report;
mod scan;

// Re-export all models for convenient access
pub use auth::{AccessToken, SignInRequest, SignInResponse};
pub use org::OrgMembership;
pub use project::{CreateProjectRequest, GITHUB_PROJECT_KIND, Project, ProjectKey};
pub use report::{Report, ReportResponse, ScaSeverities};
pub use scan::{
    ProgressData, ScanState, ScanStatus, Severities, StartScanRequest, StartScanResponse,
    Weakness,
};
