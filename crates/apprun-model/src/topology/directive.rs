use std::path::PathBuf;

use serde::Serialize;

use crate::{
    EndpointService, Handle, NetworkSelector, PolicyStatement, RegistryImage, SecretPayload,
    ServiceSpec, SubnetVisibility,
};

/// A single provisioning step handed to the platform.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Directive {
    /// Resolve the network everything else attaches to.
    #[serde(rename_all = "camelCase")]
    LookupNetwork {
        handle: Handle,
        selector: NetworkSelector,
    },
    /// Connector letting the service reach into the network.
    #[serde(rename_all = "camelCase")]
    CreateConnector {
        handle: Handle,
        network: Handle,
        subnets: SubnetVisibility,
    },
    /// VPC endpoint attached to the network (not the connector).
    #[serde(rename_all = "camelCase")]
    AttachEndpoint {
        handle: Handle,
        network: Handle,
        service: EndpointService,
    },
    /// Managed secret object holding one payload.
    #[serde(rename_all = "camelCase")]
    CreateSecret {
        handle: Handle,
        name: String,
        payload: SecretPayload,
    },
    /// Build an image from a local directory.
    #[serde(rename_all = "camelCase")]
    BuildImage {
        handle: Handle,
        directory: PathBuf,
        platform: String,
    },
    /// Use an existing registry image.
    #[serde(rename_all = "camelCase")]
    ReferenceImage { handle: Handle, image: RegistryImage },
    #[serde(rename_all = "camelCase")]
    CreateService { handle: Handle, spec: ServiceSpec },
    /// Statement added to the service's instance role.
    #[serde(rename_all = "camelCase")]
    AttachPolicy {
        handle: Handle,
        service: Handle,
        statement: PolicyStatement,
    },
    /// Externally visible result of the deployment.
    #[serde(rename_all = "camelCase")]
    EmitOutput {
        handle: Handle,
        name: String,
        value: String,
    },
}

impl Directive {
    pub fn handle(&self) -> &Handle {
        match self {
            Directive::LookupNetwork { handle, .. }
            | Directive::CreateConnector { handle, .. }
            | Directive::AttachEndpoint { handle, .. }
            | Directive::CreateSecret { handle, .. }
            | Directive::BuildImage { handle, .. }
            | Directive::ReferenceImage { handle, .. }
            | Directive::CreateService { handle, .. }
            | Directive::AttachPolicy { handle, .. }
            | Directive::EmitOutput { handle, .. } => handle,
        }
    }

    /// Handles of the directives this one depends on.
    pub fn references(&self) -> Vec<&Handle> {
        match self {
            Directive::CreateConnector { network, .. }
            | Directive::AttachEndpoint { network, .. } => vec![network],
            Directive::CreateService { spec, .. } => {
                let mut refs = vec![&spec.image, &spec.connector];
                refs.extend(spec.secrets.iter().map(|b| &b.secret));
                refs
            }
            Directive::AttachPolicy { service, .. } => vec![service],
            Directive::LookupNetwork { .. }
            | Directive::CreateSecret { .. }
            | Directive::BuildImage { .. }
            | Directive::ReferenceImage { .. }
            | Directive::EmitOutput { .. } => Vec::new(),
        }
    }

    /// Short directive name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Directive::LookupNetwork { .. } => "lookupNetwork",
            Directive::CreateConnector { .. } => "createConnector",
            Directive::AttachEndpoint { .. } => "attachEndpoint",
            Directive::CreateSecret { .. } => "createSecret",
            Directive::BuildImage { .. } => "buildImage",
            Directive::ReferenceImage { .. } => "referenceImage",
            Directive::CreateService { .. } => "createService",
            Directive::AttachPolicy { .. } => "attachPolicy",
            Directive::EmitOutput { .. } => "emitOutput",
        }
    }
}
