mod image;
pub use image::{ImageReference, ImageSource, RegistryImage};

mod network;
pub use network::NetworkSelector;

mod precedence;
pub use precedence::FlagPrecedence;

mod subnet;
pub use subnet::SubnetVisibility;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::{
    Flag,
    error::{ModelError, ModelResult},
};

/// Deprecated process-level switches kept for backward compatibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LegacyFlags {
    /// Bulk-enable every interface endpoint.
    pub interface_endpoints: Flag,
    /// Alias of the `useAwsVpcEndpointDynamoDB` feature flag.
    pub dynamodb_endpoint: Flag,
}

/// Deployment-wide settings supplied once per invocation.
///
/// `DeploymentSettings` describes *where* and *from what* the service is deployed;
/// the environment bundle describes *what the service sees*.
/// Fields cover:
/// - naming (`namespace`)
/// - networking (`network`, `subnets`)
/// - image sourcing (`image`, `project_root`)
/// - endpoint gating compatibility (`legacy`, `precedence`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSettings {
    /// Prefix of every secret object name (`<namespace>/<key>`).
    pub namespace: String,
    /// Network to attach the service to.
    #[serde(default)]
    pub network: NetworkSelector,
    /// Subnet class the network connector is placed in.
    #[serde(default)]
    pub subnets: SubnetVisibility,
    /// Container image source.
    #[serde(default)]
    pub image: ImageSource,
    /// Project directory; the build context of local images. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,
    #[serde(default)]
    pub legacy: LegacyFlags,
    /// How the legacy bulk flag combines with explicit endpoint flags.
    #[serde(default)]
    pub precedence: FlagPrecedence,
}

impl DeploymentSettings {
    /// Settings with every optional field at its default and no project root.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            network: NetworkSelector::default(),
            subnets: SubnetVisibility::default(),
            image: ImageSource::default(),
            project_root: None,
            legacy: LegacyFlags::default(),
            precedence: FlagPrecedence::default(),
        }
    }

    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    pub fn with_network_id(mut self, id: impl Into<String>) -> Self {
        self.network = NetworkSelector::Id(id.into());
        self
    }

    pub fn with_subnets(mut self, subnets: SubnetVisibility) -> Self {
        self.subnets = subnets;
        self
    }

    pub fn with_registry_image(mut self, image: RegistryImage) -> Self {
        self.image = ImageSource::Registry(image);
        self
    }

    pub fn with_legacy(mut self, legacy: LegacyFlags) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn with_precedence(mut self, precedence: FlagPrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Return the project root, failing when it is absent or empty.
    pub fn require_project_root(&self) -> ModelResult<&Path> {
        match self.project_root.as_deref() {
            Some(p) if !p.as_os_str().is_empty() => Ok(p),
            _ => Err(ModelError::MissingSetting("project root")),
        }
    }

    /// Check every required field. Nothing is built from settings that fail here.
    pub fn validate(&self) -> ModelResult<()> {
        if self.namespace.trim().is_empty() {
            return Err(ModelError::MissingSetting("namespace"));
        }
        self.require_project_root()?;
        if let NetworkSelector::Id(id) = &self.network {
            if id.trim().is_empty() {
                return Err(ModelError::InvalidSetting {
                    key: "network",
                    reason: "network identifier is empty".into(),
                });
            }
        }
        if let ImageSource::Registry(image) = &self.image {
            image.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let s = DeploymentSettings::new("demo");
        assert_eq!(s.network, NetworkSelector::Default);
        assert_eq!(s.subnets, SubnetVisibility::Public);
        assert_eq!(s.image, ImageSource::Local);
        assert_eq!(s.precedence, FlagPrecedence::Union);
        assert!(s.legacy.interface_endpoints.is_disabled());
        assert!(s.legacy.dynamodb_endpoint.is_disabled());
    }

    #[test]
    fn missing_project_root_is_fatal() {
        let err = DeploymentSettings::new("demo").validate().unwrap_err();
        assert!(matches!(err, ModelError::MissingSetting("project root")));

        let err = DeploymentSettings::new("demo")
            .with_project_root("")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingSetting("project root")));
    }

    #[test]
    fn registry_mode_requires_reference() {
        let s = DeploymentSettings::new("demo")
            .with_project_root("/srv/app")
            .with_registry_image(RegistryImage::new("acme/api", ImageReference::Tag(String::new())));
        assert!(matches!(
            s.validate().unwrap_err(),
            ModelError::MissingSetting(_)
        ));
    }

    #[test]
    fn complete_settings_validate() {
        let s = DeploymentSettings::new("demo")
            .with_project_root("/srv/app")
            .with_network_id("vpc-123")
            .with_registry_image(RegistryImage::new("acme/api", ImageReference::parse("v1")));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let s: DeploymentSettings =
            serde_json::from_str(r#"{"namespace":"demo","projectRoot":"/srv"}"#).unwrap();
        assert_eq!(s.project_root.as_deref(), Some(Path::new("/srv")));
        assert_eq!(s.image, ImageSource::Local);
    }
}
