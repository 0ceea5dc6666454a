//! Well-known keys, prefixes and markers recognized in the environment bundle.
//!
//! Keeping them here avoids scattering magic strings across the classifier and the builder.

/// Key prefixes marking an entry as an IAM policy fragment rather than runtime data.
pub const IAM_POLICY_PREFIXES: [&str; 2] = ["IAM_POLICY_", "iamPolicy"];

/// Key prefix of VPC endpoint feature flags (case-sensitive).
pub const ENDPOINT_FLAG_PREFIX: &str = "useAwsVpcEndpoint";

/// Value marker turning an entry into a managed secret.
///
/// Everything after the marker (up to the next occurrence of it) is the secret payload.
pub const SECRET_MARKER: &str = "secret://";

/// Runtime variable always injected into the service, overriding user input.
pub const SERVICE_PORT_VAR: &str = "PORT";

/// Container port the service listens on.
pub const SERVICE_PORT: u16 = 8080;
