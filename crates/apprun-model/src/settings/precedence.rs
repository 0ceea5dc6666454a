use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// How the legacy bulk-enable switch combines with per-endpoint feature flags.
///
/// Strategies:
/// - `Union`: the bulk switch enables every interface endpoint, whatever its specific flag says.
///   A specific flag can add an endpoint but never removes one the bulk switch enabled.
/// - `Explicit`: a specific flag explicitly set to false suppresses the bulk enable for that endpoint.
///   Flags that were never supplied still follow the bulk switch.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum FlagPrecedence {
    #[default]
    Union,
    Explicit,
}

impl FromStr for FlagPrecedence {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "union" | "" => Ok(FlagPrecedence::Union),
            "explicit" | "explicit-wins" => Ok(FlagPrecedence::Explicit),
            other => Err(ModelError::UnknownPrecedence(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_values() {
        assert_eq!("".parse::<FlagPrecedence>().unwrap(), FlagPrecedence::Union);
        assert_eq!("Union".parse::<FlagPrecedence>().unwrap(), FlagPrecedence::Union);
        assert_eq!(
            "explicit".parse::<FlagPrecedence>().unwrap(),
            FlagPrecedence::Explicit
        );
        assert!("override".parse::<FlagPrecedence>().is_err());
    }
}
