//! Runtime variable merge.
//!
//! Precedence, lowest to highest: user-supplied plain variables, then the fixed
//! variables injected by the deployer. A fixed key always wins a collision.
use std::collections::BTreeMap;

use apprun_model::{Env, SERVICE_PORT, SERVICE_PORT_VAR};
use tracing::warn;

/// Variables every service receives.
pub fn fixed_env() -> Env {
    [(SERVICE_PORT_VAR, SERVICE_PORT.to_string())]
        .into_iter()
        .collect()
}

/// Merge plain user variables with [`fixed_env`].
pub fn runtime_env(plain: &BTreeMap<String, String>) -> Env {
    let user: Env = plain.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let fixed = fixed_env();

    for kv in fixed.iter() {
        if user.get(kv.key()).is_some_and(|v| v != kv.value()) {
            warn!(key = kv.key(), "user-supplied variable is overridden by the deployer");
        }
    }

    user.merged(&fixed)
}
