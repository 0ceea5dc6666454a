//! Collaborator seam towards the cloud platform that reconciles a topology.
//!
//! The resolver never talks to the platform itself; a [`Platform`] receives the finished
//! topology exactly once. Retries, rollback and partial-failure handling belong to the
//! implementation behind this trait.
mod error;
pub use error::PlatformError;

mod manifest;
pub use manifest::ManifestPlatform;

use apprun_model::ResourceTopology;
use async_trait::async_trait;

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Public HTTPS address of the managed service.
    pub service_url: String,
}

/// Platform that reconciles resource topologies.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Platform name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Submit the whole topology. All-or-nothing from the caller's point of view.
    async fn submit(&self, topology: &ResourceTopology) -> Result<Submission, PlatformError>;
}
