use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

/// Which network the platform should look up.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum NetworkSelector {
    /// The account's default network.
    #[default]
    Default,
    /// An explicit network identifier (e.g. `vpc-0abc…`).
    Id(String),
}

impl NetworkSelector {
    /// Build from an optional identifier; `None` and empty strings select the default network.
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some(id) if !id.trim().is_empty() => NetworkSelector::Id(id.to_string()),
            _ => NetworkSelector::Default,
        }
    }
}
