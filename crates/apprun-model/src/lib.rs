mod domain;
pub use domain::{
    ENDPOINT_FLAG_PREFIX, IAM_POLICY_PREFIXES, SECRET_MARKER, SERVICE_PORT,
    SERVICE_PORT_VAR,
};
pub use domain::{ClassifiedEnv, EndpointFlag, Env, FeatureFlags, Flag, KeyValue, RawEnv, SecretPayload};

mod error;
pub use error::{ModelError, ModelResult};

mod settings;
pub use settings::{
    DeploymentSettings, FlagPrecedence, ImageReference, ImageSource, LegacyFlags,
    NetworkSelector, RegistryImage, SubnetVisibility,
};

mod topology;
pub use topology::{
    Directive, EndpointKind, EndpointService, Handle, PolicyEffect, PolicyStatement,
    ResourceTopology, SecretBinding, ServiceSpec,
};
