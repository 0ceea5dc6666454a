mod handle;
pub use handle::Handle;

mod endpoint;
pub use endpoint::{EndpointKind, EndpointService};

mod policy;
pub use policy::{PolicyEffect, PolicyStatement};

mod service;
pub use service::{SecretBinding, ServiceSpec};

mod directive;
pub use directive::Directive;

use serde::Serialize;

/// Ordered provisioning directives for one deployment.
///
/// Built once, submitted atomically. Directives only reference handles of
/// directives that precede them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTopology {
    pub namespace: String,
    pub directives: Vec<Directive>,
}

impl ResourceTopology {
    pub fn new(namespace: impl Into<String>, directives: Vec<Directive>) -> Self {
        Self {
            namespace: namespace.into(),
            directives,
        }
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    /// Endpoint services in the order they are attached.
    pub fn endpoints(&self) -> Vec<EndpointService> {
        self.iter()
            .filter_map(|d| match d {
                Directive::AttachEndpoint { service, .. } => Some(*service),
                _ => None,
            })
            .collect()
    }

    /// Names of the secret objects created.
    pub fn secret_names(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|d| match d {
                Directive::CreateSecret { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The managed service definition, if the topology has one.
    pub fn service(&self) -> Option<&ServiceSpec> {
        self.iter().find_map(|d| match d {
            Directive::CreateService { spec, .. } => Some(spec),
            _ => None,
        })
    }

    /// Policy statements attached to the service identity.
    pub fn policy_statements(&self) -> Vec<&PolicyStatement> {
        self.iter()
            .filter_map(|d| match d {
                Directive::AttachPolicy { statement, .. } => Some(statement),
                _ => None,
            })
            .collect()
    }

    /// Value of the first emitted output.
    pub fn output(&self) -> Option<&str> {
        self.iter().find_map(|d| match d {
            Directive::EmitOutput { value, .. } => Some(value.as_str()),
            _ => None,
        })
    }

    /// First directive whose references are not satisfied by an earlier directive,
    /// or whose handle repeats an earlier one.
    pub fn first_dangling(&self) -> Option<&Directive> {
        let mut seen = std::collections::BTreeSet::new();
        for d in self.iter() {
            if d.references().iter().any(|h| !seen.contains(*h)) {
                return Some(d);
            }
            if !seen.insert(d.handle()) {
                return Some(d);
            }
        }
        None
    }
}
