use apprun_model::{
    ClassifiedEnv, DeploymentSettings, Directive, Flag, Handle, ImageSource, ResourceTopology,
    SERVICE_PORT, SecretBinding, ServiceSpec,
};
use tracing::{debug, info, instrument, warn};

use super::{
    endpoint::{EndpointContext, select_endpoints},
    env::{fixed_env, runtime_env},
    policy::statements,
};
use crate::error::{CoreError, CoreResult};

pub const NETWORK_ID: &str = "Network";
pub const CONNECTOR_ID: &str = "VpcConnector";
pub const IMAGE_ID: &str = "Image";
pub const SERVICE_ID: &str = "Service";
pub const OUTPUT_NAME: &str = "ServiceUrl";

/// Target platform of locally built images.
pub const IMAGE_PLATFORM: &str = "linux/amd64";

/// Placeholder for the service's public URL, substituted by the platform on submission.
pub fn service_url_token() -> String {
    format!("https://${{{SERVICE_ID}.{OUTPUT_NAME}}}")
}

/// Builds a [`ResourceTopology`] from classified buckets.
///
/// The pipeline is strictly linear:
/// network -> connector -> endpoints -> secrets -> image -> service -> policies -> output.
/// Either every step succeeds and a complete topology is returned, or nothing is.
#[derive(Debug, Clone, Copy)]
pub struct TopologyBuilder<'a> {
    settings: &'a DeploymentSettings,
}

impl<'a> TopologyBuilder<'a> {
    pub fn new(settings: &'a DeploymentSettings) -> Self {
        Self { settings }
    }

    #[instrument(level = "debug", skip_all, fields(namespace = %self.settings.namespace))]
    pub fn build(&self, classified: &ClassifiedEnv) -> CoreResult<ResourceTopology> {
        self.settings.validate()?;
        let settings = self.settings;
        let mut out = Vec::new();

        let network = Handle::new(NETWORK_ID);
        out.push(Directive::LookupNetwork {
            handle: network.clone(),
            selector: settings.network.clone(),
        });

        let connector = Handle::new(CONNECTOR_ID);
        out.push(Directive::CreateConnector {
            handle: connector.clone(),
            network: network.clone(),
            subnets: settings.subnets,
        });

        let fixed = fixed_env();
        let secrets: Vec<_> = classified
            .secrets
            .iter()
            .filter(|(key, _)| {
                let shadowed = fixed.get(key).is_some();
                if shadowed {
                    warn!(key = key.as_str(), "secret shadows a deployer variable, not binding it");
                }
                !shadowed
            })
            .collect();

        let ctx = EndpointContext {
            flags: &classified.flags,
            legacy: settings.legacy,
            precedence: settings.precedence,
            has_secrets: !secrets.is_empty(),
        };
        for service in select_endpoints(&ctx) {
            out.push(Directive::AttachEndpoint {
                handle: Handle::new(service.logical_id()),
                network: network.clone(),
                service,
            });
        }

        let mut bindings = Vec::with_capacity(secrets.len());
        for (key, payload) in secrets {
            let handle = Handle::new(format!("Secret:{key}"));
            out.push(Directive::CreateSecret {
                handle: handle.clone(),
                name: secret_name(&settings.namespace, key),
                payload: payload.clone(),
            });
            bindings.push(SecretBinding {
                name: key.clone(),
                secret: handle,
            });
        }

        let image = Handle::new(IMAGE_ID);
        out.push(match &settings.image {
            ImageSource::Local => Directive::BuildImage {
                handle: image.clone(),
                directory: settings.require_project_root()?.to_path_buf(),
                platform: IMAGE_PLATFORM.to_string(),
            },
            ImageSource::Registry(registry) => Directive::ReferenceImage {
                handle: image.clone(),
                image: registry.clone(),
            },
        });

        let service = Handle::new(SERVICE_ID);
        out.push(Directive::CreateService {
            handle: service.clone(),
            spec: ServiceSpec {
                image,
                port: SERVICE_PORT,
                environment: runtime_env(&classified.plain),
                secrets: bindings,
                auto_deployments: Flag::enabled(),
                connector,
            },
        });

        for (key, fragment) in &classified.policies {
            for (n, statement) in statements(key, fragment).into_iter().enumerate() {
                out.push(Directive::AttachPolicy {
                    handle: Handle::new(format!("Policy:{key}:{n}")),
                    service: service.clone(),
                    statement,
                });
            }
        }

        out.push(Directive::EmitOutput {
            handle: Handle::new(OUTPUT_NAME),
            name: OUTPUT_NAME.to_string(),
            value: service_url_token(),
        });

        let topology = ResourceTopology::new(settings.namespace.clone(), out);
        if let Some(d) = topology.first_dangling() {
            return Err(CoreError::Internal(format!(
                "directive {} ({}) references a handle that is not built before it",
                d.handle(),
                d.kind()
            )));
        }

        for d in topology.iter() {
            debug!(kind = d.kind(), handle = %d.handle(), "directive");
        }
        info!(
            directives = topology.len(),
            endpoints = topology.endpoints().len(),
            secrets = topology.secret_names().len(),
            "topology built"
        );
        Ok(topology)
    }
}

/// Name of the secret object backing `key`.
pub fn secret_name(namespace: &str, key: &str) -> String {
    format!("{namespace}/{key}")
}

#[cfg(test)]
mod tests {
    use apprun_model::{
        EndpointService, ImageReference, ModelError, NetworkSelector, RawEnv, RegistryImage,
        SubnetVisibility,
    };
    use serde_json::json;

    use super::*;
    use crate::classify::classify;

    fn settings() -> DeploymentSettings {
        DeploymentSettings::new("demo").with_project_root("/srv/app")
    }

    fn build(env: serde_json::Value, settings: &DeploymentSettings) -> ResourceTopology {
        let raw = RawEnv::try_from(env).unwrap();
        TopologyBuilder::new(settings).build(&classify(&raw)).unwrap()
    }

    #[test]
    fn minimal_topology_order() {
        let t = build(json!({}), &settings());
        let kinds: Vec<_> = t.iter().map(Directive::kind).collect();
        assert_eq!(
            kinds,
            [
                "lookupNetwork",
                "createConnector",
                "buildImage",
                "createService",
                "emitOutput"
            ]
        );
        assert_eq!(t.output(), Some("https://${Service.ServiceUrl}"));
    }

    #[test]
    fn network_id_and_subnets_reach_lookup_and_connector() {
        let s = settings()
            .with_network_id("vpc-0a1b2c")
            .with_subnets(SubnetVisibility::PrivateIsolated);
        let t = build(json!({}), &s);
        let directives: Vec<_> = t.iter().collect();

        match directives[0] {
            Directive::LookupNetwork { handle, selector } => {
                assert_eq!(handle.as_str(), NETWORK_ID);
                assert_eq!(*selector, NetworkSelector::Id("vpc-0a1b2c".into()));
            }
            other => panic!("expected network lookup first, got {other:?}"),
        }
        match directives[1] {
            Directive::CreateConnector { network, subnets, .. } => {
                assert_eq!(network.as_str(), NETWORK_ID);
                assert_eq!(*subnets, SubnetVisibility::PrivateIsolated);
            }
            other => panic!("expected connector second, got {other:?}"),
        }
    }

    #[test]
    fn default_network_and_public_subnets_without_settings() {
        let t = build(json!({}), &settings());
        let directives: Vec<_> = t.iter().collect();

        assert!(matches!(
            directives[0],
            Directive::LookupNetwork { selector: NetworkSelector::Default, .. }
        ));
        assert!(matches!(
            directives[1],
            Directive::CreateConnector { subnets: SubnetVisibility::Public, .. }
        ));
    }

    #[test]
    fn full_topology_order() {
        let t = build(
            json!({
                "useAwsVpcEndpointS3": true,
                "useAwsVpcEndpointSecretsManager": "true",
                "DB_PASSWORD": "secret://pw",
                "IAM_POLICY_X": r#"{"Effect":"Allow","Action":"s3:GetObject","Resource":"*"}"#,
            }),
            &settings(),
        );
        let kinds: Vec<_> = t.iter().map(Directive::kind).collect();
        assert_eq!(
            kinds,
            [
                "lookupNetwork",
                "createConnector",
                "attachEndpoint",
                "attachEndpoint",
                "createSecret",
                "buildImage",
                "createService",
                "attachPolicy",
                "emitOutput"
            ]
        );
        assert!(t.first_dangling().is_none());
    }

    #[test]
    fn secrets_are_named_by_namespace_and_bound_to_service() {
        let t = build(json!({ "DB_PASSWORD": "secret://pw", "API_KEY": "secret://k" }), &settings());

        assert_eq!(t.secret_names(), ["demo/API_KEY", "demo/DB_PASSWORD"]);
        let service = t.service().unwrap();
        let bound: Vec<_> = service.secrets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(bound, ["API_KEY", "DB_PASSWORD"]);
        assert!(service.environment.get("DB_PASSWORD").is_none());
    }

    #[test]
    fn endpoints_attach_to_network() {
        let t = build(json!({ "useAwsVpcEndpointEcr": true }), &settings());
        assert_eq!(t.endpoints(), [EndpointService::EcrApi, EndpointService::EcrDocker]);
        for d in t.iter() {
            if let Directive::AttachEndpoint { network, .. } = d {
                assert_eq!(network.as_str(), NETWORK_ID);
            }
        }
    }

    #[test]
    fn service_defaults() {
        let t = build(json!({ "PORT": "3000" }), &settings());
        let service = t.service().unwrap();

        assert_eq!(service.port, 8080);
        assert_eq!(service.environment.get("PORT"), Some("8080"));
        assert!(service.auto_deployments.is_enabled());
        assert_eq!(service.connector.as_str(), CONNECTOR_ID);
    }

    #[test]
    fn registry_mode_replaces_local_build() {
        let s = settings().with_registry_image(RegistryImage::new(
            "acme/api",
            ImageReference::parse("sha256:abc"),
        ));
        let t = build(json!({}), &s);

        assert!(t.iter().any(|d| matches!(d, Directive::ReferenceImage { .. })));
        assert!(!t.iter().any(|d| matches!(d, Directive::BuildImage { .. })));
    }

    #[test]
    fn missing_project_root_fails_before_any_directive() {
        let raw = RawEnv::new();
        let s = DeploymentSettings::new("demo");
        let err = TopologyBuilder::new(&s).build(&classify(&raw)).unwrap_err();
        assert!(matches!(err, CoreError::Config(ModelError::MissingSetting(_))));
    }

    #[test]
    fn secret_named_port_is_not_bound() {
        let t = build(json!({ "PORT": "secret://p" }), &settings());
        assert!(t.secret_names().is_empty());
        let service = t.service().unwrap();
        assert!(service.secrets.is_empty());
        assert_eq!(service.environment.get("PORT"), Some("8080"));
    }

    #[test]
    fn policy_handles_are_unique_per_statement() {
        let t = build(
            json!({
                "IAM_POLICY_A": r#"[{"Effect":"Allow","Action":"a:b","Resource":"*"},{"Effect":"Allow","Action":"c:d","Resource":"*"}]"#,
            }),
            &settings(),
        );
        assert_eq!(t.policy_statements().len(), 2);
        assert!(t.first_dangling().is_none());
    }
}
