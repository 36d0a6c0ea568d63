//! CodeThreat API client
//!
//! The API surface is split into focused sub-traits (see [`api`]) so the
//! pipeline stages only depend on the operations they use. [`CodeThreatApi`]
//! combines them for callers that need the whole surface.

pub mod api;
pub mod codethreat;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{AuthApi, ProjectApi, ScanApi};
pub use codethreat::CodeThreatClient;
#[cfg(test)]
pub use mock::MockCodeThreatClient;

/// Full CodeThreat API surface
pub trait CodeThreatApi: AuthApi + ProjectApi + ScanApi {}

impl<T: AuthApi + ProjectApi + ScanApi> CodeThreatApi for T {}
