use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "schema")]
use schemars::JsonSchema;

/// Boolean switch with explicit enable/disable semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct Flag(bool);

impl Flag {
    pub const fn enabled() -> Self {
        Self(true)
    }

    pub const fn disabled() -> Self {
        Self(false)
    }

    pub const fn is_enabled(&self) -> bool {
        self.0
    }

    pub const fn is_disabled(&self) -> bool {
        !self.0
    }

    /// Coerce an environment bundle value.
    ///
    /// Only the native boolean `true` and the exact string `"true"` enable the flag.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self(*b),
            Value::String(s) => Self(s == "true"),
            _ => Self::disabled(),
        }
    }

    /// Coerce a process-level setting, where only the exact string `"true"` enables the flag.
    pub fn from_setting(value: Option<&str>) -> Self {
        Self(value == Some("true"))
    }
}

/// Switches are off unless something turns them on.
impl Default for Flag {
    fn default() -> Self {
        Self::disabled()
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl From<Flag> for bool {
    fn from(f: Flag) -> Self {
        f.0
    }
}

/// Recognized VPC endpoint feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EndpointFlag {
    S3,
    DynamoDb,
    SecretsManager,
    CloudWatchLogs,
    Ecr,
}

impl EndpointFlag {
    pub const ALL: [EndpointFlag; 5] = [
        EndpointFlag::S3,
        EndpointFlag::DynamoDb,
        EndpointFlag::SecretsManager,
        EndpointFlag::CloudWatchLogs,
        EndpointFlag::Ecr,
    ];

    /// Environment bundle key of the flag.
    pub const fn key(&self) -> &'static str {
        match self {
            EndpointFlag::S3 => "useAwsVpcEndpointS3",
            EndpointFlag::DynamoDb => "useAwsVpcEndpointDynamoDB",
            EndpointFlag::SecretsManager => "useAwsVpcEndpointSecretsManager",
            EndpointFlag::CloudWatchLogs => "useAwsVpcEndpointCloudWatchLogs",
            EndpointFlag::Ecr => "useAwsVpcEndpointEcr",
        }
    }

    /// Exact, case-sensitive lookup by key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Feature flags consumed from the environment bundle, keyed by their original key.
///
/// Unrecognized flag names are retained so that every consumed key stays visible,
/// but only [`EndpointFlag`] names are ever queried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeMap<String, Flag>);

impl FeatureFlags {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, flag: Flag) {
        self.0.insert(key.into(), flag);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The explicitly supplied value of a flag, `None` when the key was never given.
    pub fn explicit(&self, flag: EndpointFlag) -> Option<Flag> {
        self.0.get(flag.key()).copied()
    }

    /// `true` only when the flag was supplied and coerced to enabled.
    pub fn is_enabled(&self, flag: EndpointFlag) -> bool {
        self.explicit(flag).is_some_and(|f| f.is_enabled())
    }

    /// `true` only when the flag was supplied and coerced to disabled.
    pub fn is_explicitly_disabled(&self, flag: EndpointFlag) -> bool {
        self.explicit(flag).is_some_and(|f| f.is_disabled())
    }
}

impl FromIterator<(EndpointFlag, bool)> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = (EndpointFlag, bool)>>(iter: I) -> Self {
        let mut flags = FeatureFlags::new();
        for (f, b) in iter {
            flags.insert(f.key(), Flag::from(b));
        }
        flags
    }
}
