use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::{FeatureFlags, SecretPayload};

/// The environment bundle partitioned into disjoint buckets.
///
/// Every key of the originating [`crate::RawEnv`] lands in exactly one of
/// `plain`, `secrets`, `policies`, `flags` or `rejected`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEnv {
    /// Runtime variables passed through verbatim.
    pub plain: BTreeMap<String, String>,
    /// Secret payloads, each becoming one managed secret object.
    pub secrets: BTreeMap<String, SecretPayload>,
    /// Parsed IAM policy fragments.
    pub policies: BTreeMap<String, Value>,
    /// VPC endpoint feature flags.
    pub flags: FeatureFlags,
    /// Policy keys dropped because their value was not valid JSON.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub rejected: BTreeSet<String>,
}

impl ClassifiedEnv {
    /// Total number of keys accounted for across all buckets.
    pub fn len(&self) -> usize {
        self.plain.len()
            + self.secrets.len()
            + self.policies.len()
            + self.flags.len()
            + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_secrets(&self) -> bool {
        !self.secrets.is_empty()
    }

    /// Number of buckets (rejected included) that contain `key`.
    ///
    /// Always `1` for keys of the originating bundle and `0` for anything else.
    pub fn occurrences(&self, key: &str) -> usize {
        [
            self.plain.contains_key(key),
            self.secrets.contains_key(key),
            self.policies.contains_key(key),
            self.flags.contains_key(key),
            self.rejected.contains(key),
        ]
        .into_iter()
        .filter(|hit| *hit)
        .count()
    }
}
