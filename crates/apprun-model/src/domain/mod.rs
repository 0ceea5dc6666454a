mod kv;
pub use kv::KeyValue;

mod env;
pub use env::Env;

mod flag;
pub use flag::{EndpointFlag, FeatureFlags, Flag};

mod secret;
pub use secret::SecretPayload;

mod raw;
pub use raw::RawEnv;

mod classified;
pub use classified::ClassifiedEnv;

mod constants;
pub use constants::{
    ENDPOINT_FLAG_PREFIX, IAM_POLICY_PREFIXES, SECRET_MARKER, SERVICE_PORT, SERVICE_PORT_VAR,
};
