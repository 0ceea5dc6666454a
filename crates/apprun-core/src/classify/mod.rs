//! Classifier that partitions the environment bundle into disjoint buckets.
//!
//! Rules are applied per key, first match wins:
//! 1. policy key prefix (`IAM_POLICY_`, `iamPolicy`) -> policy fragment (value must be JSON);
//! 2. flag key prefix (`useAwsVpcEndpoint`) -> feature flag;
//! 3. value starting with `secret://` -> secret payload;
//! 4. anything else -> plain runtime variable.
//!
//! Routing looks only at the key and the value of one entry, so the result never
//! depends on the order of the bundle.
use apprun_model::{
    ClassifiedEnv, ENDPOINT_FLAG_PREFIX, EndpointFlag, Flag, IAM_POLICY_PREFIXES, RawEnv,
    SECRET_MARKER, SecretPayload,
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Destination of a single bundle entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Policy(Value),
    Flag(Flag),
    Secret(SecretPayload),
    Plain(String),
    /// Policy key whose value failed to parse; dropped from every bucket.
    Rejected,
}

/// Partition a bundle. Never fails: malformed policy fragments are dropped with a warning.
#[instrument(level = "debug", skip_all, fields(keys = raw.len()))]
pub fn classify(raw: &RawEnv) -> ClassifiedEnv {
    let mut out = ClassifiedEnv::default();

    for (key, value) in raw.iter() {
        match route(key, value) {
            Route::Policy(fragment) => {
                out.policies.insert(key.to_string(), fragment);
            }
            Route::Flag(flag) => {
                if EndpointFlag::from_key(key).is_none() {
                    warn!(key, "unrecognized VPC endpoint flag, it has no effect");
                }
                out.flags.insert(key, flag);
            }
            Route::Secret(payload) => {
                out.secrets.insert(key.to_string(), payload);
            }
            Route::Plain(value) => {
                out.plain.insert(key.to_string(), value);
            }
            Route::Rejected => {
                out.rejected.insert(key.to_string());
            }
        }
    }

    debug!(
        plain = out.plain.len(),
        secrets = out.secrets.len(),
        policies = out.policies.len(),
        flags = out.flags.len(),
        rejected = out.rejected.len(),
        "environment classified"
    );
    out
}

/// Route one entry according to the precedence rules.
pub fn route(key: &str, value: &Value) -> Route {
    if is_policy_key(key) {
        return match parse_policy(value) {
            Ok(fragment) => Route::Policy(fragment),
            Err(e) => {
                warn!(key, error = %e, "dropping IAM policy fragment that is not valid JSON");
                Route::Rejected
            }
        };
    }

    if key.starts_with(ENDPOINT_FLAG_PREFIX) {
        return Route::Flag(Flag::from_json(value));
    }

    if let Value::String(s) = value {
        if let Some(payload) = secret_payload(s) {
            return Route::Secret(payload);
        }
    }

    Route::Plain(plain_value(value))
}

pub fn is_policy_key(key: &str) -> bool {
    IAM_POLICY_PREFIXES.iter().any(|p| key.starts_with(p))
}

/// Extract the payload of a `secret://` value.
///
/// The payload runs from the first marker to the next marker or the end of the value,
/// so `secret://one secret://two` keeps only `one `.
pub fn secret_payload(value: &str) -> Option<SecretPayload> {
    let rest = value.strip_prefix(SECRET_MARKER)?;
    let payload = rest.split(SECRET_MARKER).next().unwrap_or_default();
    Some(SecretPayload::new(payload))
}

/// Strings are parsed as JSON text; inline objects and arrays are taken as they are.
fn parse_policy(value: &Value) -> Result<Value, serde_json::Error> {
    match value {
        Value::String(s) => serde_json::from_str(s),
        other => Ok(other.clone()),
    }
}

/// Strings pass through verbatim; other JSON values keep their JSON text.
fn plain_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
