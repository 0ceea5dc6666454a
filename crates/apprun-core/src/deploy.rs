//! End-to-end pipeline: validate settings, classify, build, submit once.
use std::sync::Arc;

use apprun_model::{DeploymentSettings, RawEnv, ResourceTopology};
use tracing::{info, instrument};

use crate::{
    classify::classify,
    error::CoreResult,
    platform::{Platform, Submission},
    topology::TopologyBuilder,
};

/// Resolve a bundle and settings into a topology without submitting it.
///
/// Settings are validated before classification, so a fatal configuration error
/// stops the resolution before any bucket or directive is produced.
#[instrument(level = "debug", skip_all, fields(namespace = %settings.namespace))]
pub fn resolve(raw: &RawEnv, settings: &DeploymentSettings) -> CoreResult<ResourceTopology> {
    settings.validate()?;
    let classified = classify(raw);
    TopologyBuilder::new(settings).build(&classified)
}

/// Resolves topologies and hands them to a [`Platform`].
#[derive(Clone)]
pub struct Deployer {
    platform: Arc<dyn Platform>,
}

impl Deployer {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &Arc<dyn Platform> {
        &self.platform
    }

    /// See [`resolve`].
    pub fn plan(&self, raw: &RawEnv, settings: &DeploymentSettings) -> CoreResult<ResourceTopology> {
        resolve(raw, settings)
    }

    /// Plan, then submit the topology exactly once. Platform errors are returned as they are.
    #[instrument(level = "info", skip_all, fields(platform = self.platform.name(), namespace = %settings.namespace))]
    pub async fn deploy(
        &self,
        raw: &RawEnv,
        settings: &DeploymentSettings,
    ) -> CoreResult<Submission> {
        let topology = self.plan(raw, settings)?;
        let submission = self.platform.submit(&topology).await?;
        info!(url = %submission.service_url, "deployment submitted");
        Ok(submission)
    }
}

impl std::fmt::Debug for Deployer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployer")
            .field("platform", &self.platform.name())
            .finish()
    }
}
