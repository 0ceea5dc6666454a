//! Topology builder turning classified buckets plus deployment settings into ordered directives.
mod builder;
pub use builder::{
    CONNECTOR_ID, IMAGE_ID, IMAGE_PLATFORM, NETWORK_ID, OUTPUT_NAME, SERVICE_ID, TopologyBuilder,
    secret_name, service_url_token,
};

pub mod endpoint;
pub use endpoint::{ENDPOINT_RULES, EndpointContext, EndpointRule, select_endpoints};

pub mod env;
pub use env::{fixed_env, runtime_env};

pub mod policy;
pub use policy::statements;
