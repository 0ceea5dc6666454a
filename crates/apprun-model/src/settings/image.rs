use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// Container image source of the service. The two modes are mutually exclusive.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ImageSource {
    /// Build an image from the project root.
    #[default]
    Local,
    /// Use an image that already exists in a registry.
    Registry(RegistryImage),
}

/// Tag or content digest of a registry image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ImageReference {
    Tag(String),
    Digest(String),
}

impl ImageReference {
    /// Values starting with `sha256:` are digests, everything else is a tag.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("sha256:") {
            ImageReference::Digest(s.to_string())
        } else {
            ImageReference::Tag(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageReference::Tag(s) | ImageReference::Digest(s) => s,
        }
    }
}

/// A pre-existing registry image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegistryImage {
    pub repository: String,
    pub reference: ImageReference,
}

impl RegistryImage {
    pub fn new(repository: impl Into<String>, reference: ImageReference) -> Self {
        Self {
            repository: repository.into(),
            reference,
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.repository.trim().is_empty() {
            return Err(ModelError::MissingSetting("image repository"));
        }
        if self.reference.as_str().is_empty() {
            return Err(ModelError::MissingSetting("image tag or digest"));
        }
        if self.repository.contains('@') || self.repository.ends_with(':') {
            return Err(ModelError::InvalidSetting {
                key: "image repository",
                reason: format!("{} must not carry a tag or digest", self.repository),
            });
        }
        Ok(())
    }
}

/// Pullable image URI: `repo:tag` or `repo@sha256:…`.
impl fmt::Display for RegistryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reference {
            ImageReference::Tag(tag) => write!(f, "{}:{}", self.repository, tag),
            ImageReference::Digest(digest) => write!(f, "{}@{}", self.repository, digest),
        }
    }
}
