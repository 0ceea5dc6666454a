use serde::Serialize;

use crate::{Env, Flag, Handle};

/// A runtime variable backed by a managed secret rather than plaintext.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretBinding {
    /// Variable name inside the container.
    pub name: String,
    /// Secret object directive it resolves from.
    pub secret: Handle,
}

/// Definition of the managed service.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    /// Image directive (local build or registry reference).
    pub image: Handle,
    pub port: u16,
    /// Plain runtime variables, `PORT` included.
    pub environment: Env,
    pub secrets: Vec<SecretBinding>,
    /// Redeploy whenever the image is updated.
    pub auto_deployments: Flag,
    /// Network connector directive.
    pub connector: Handle,
}
