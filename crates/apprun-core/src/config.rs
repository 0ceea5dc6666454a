//! Process-level configuration.
//!
//! The surrounding CLI collects these keys once (from the process environment or any
//! other source) and hands them over as a [`DeployConfig`]; nothing below this layer
//! reads global process state.
use std::path::PathBuf;

use apprun_model::{
    DeploymentSettings, Flag, FlagPrecedence, ImageReference, LegacyFlags, ModelError,
    ModelResult, NetworkSelector, RawEnv, RegistryImage, SubnetVisibility,
};
use tracing::warn;

pub const ENV_NAMESPACE: &str = "APPRUN_NAMESPACE";
pub const ENV_VPC_ID: &str = "APPRUN_VPC_ID";
pub const ENV_BUNDLE: &str = "APPRUN_ENV";
pub const ENV_PROJECT_ROOT: &str = "APPRUN_PROJECT_ROOT";
pub const ENV_SUBNET_TYPE: &str = "APPRUN_SUBNET_TYPE";
pub const ENV_IMAGE_REPOSITORY: &str = "APPRUN_IMAGE_REPOSITORY";
pub const ENV_IMAGE_TAG: &str = "APPRUN_IMAGE_TAG";
pub const ENV_LEGACY_INTERFACE_ENDPOINTS: &str = "APPRUN_ENABLE_INTERFACE_ENDPOINTS";
pub const ENV_LEGACY_DYNAMODB_ENDPOINT: &str = "APPRUN_ENABLE_DYNAMODB_ENDPOINT";
pub const ENV_ENDPOINT_PRECEDENCE: &str = "APPRUN_ENDPOINT_PRECEDENCE";

pub const DEFAULT_NAMESPACE: &str = "apprun";

/// Raw process-level inputs, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployConfig {
    pub namespace: Option<String>,
    pub vpc_id: Option<String>,
    /// JSON text of the environment bundle.
    pub bundle: Option<String>,
    pub project_root: Option<String>,
    pub subnet_type: Option<String>,
    pub image_repository: Option<String>,
    pub image_tag: Option<String>,
    pub legacy_interface_endpoints: Option<String>,
    pub legacy_dynamodb_endpoint: Option<String>,
    pub endpoint_precedence: Option<String>,
}

impl DeployConfig {
    /// Collect every key through `lookup`. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            namespace: get(ENV_NAMESPACE),
            vpc_id: get(ENV_VPC_ID),
            bundle: get(ENV_BUNDLE),
            project_root: get(ENV_PROJECT_ROOT),
            subnet_type: get(ENV_SUBNET_TYPE),
            image_repository: get(ENV_IMAGE_REPOSITORY),
            image_tag: get(ENV_IMAGE_TAG),
            legacy_interface_endpoints: get(ENV_LEGACY_INTERFACE_ENDPOINTS),
            legacy_dynamodb_endpoint: get(ENV_LEGACY_DYNAMODB_ENDPOINT),
            endpoint_precedence: get(ENV_ENDPOINT_PRECEDENCE),
        }
    }

    /// Read the current process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Validate and split into the environment bundle and the deployment settings.
    pub fn into_inputs(self) -> ModelResult<(RawEnv, DeploymentSettings)> {
        let project_root = self
            .project_root
            .map(PathBuf::from)
            .ok_or(ModelError::MissingSetting(ENV_PROJECT_ROOT))?;

        let raw = match self.bundle.as_deref() {
            Some(json) => RawEnv::from_json_str(json)?,
            None => RawEnv::new(),
        };

        let subnets = match self.subnet_type.as_deref() {
            Some(s) => s.parse()?,
            None => SubnetVisibility::default(),
        };

        let precedence = match self.endpoint_precedence.as_deref() {
            Some(s) => s.parse()?,
            None => FlagPrecedence::default(),
        };

        let mut settings = DeploymentSettings::new(
            self.namespace
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
        )
        .with_project_root(project_root)
        .with_subnets(subnets)
        .with_precedence(precedence)
        .with_legacy(LegacyFlags {
            interface_endpoints: Flag::from_setting(self.legacy_interface_endpoints.as_deref()),
            dynamodb_endpoint: Flag::from_setting(self.legacy_dynamodb_endpoint.as_deref()),
        });
        settings.network = NetworkSelector::from_id(self.vpc_id.as_deref());

        match (self.image_repository, self.image_tag) {
            (Some(repository), Some(tag)) => {
                settings = settings
                    .with_registry_image(RegistryImage::new(repository, ImageReference::parse(&tag)));
            }
            (Some(_), None) => return Err(ModelError::MissingSetting(ENV_IMAGE_TAG)),
            (None, Some(_)) => {
                warn!(
                    key = ENV_IMAGE_TAG,
                    "image tag given without a repository, building the image locally"
                );
            }
            (None, None) => {}
        }

        settings.validate()?;
        Ok((raw, settings))
    }
}
