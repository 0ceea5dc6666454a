use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// Subnet class the network connector is placed in.
///
/// - `Public`: subnets with a route to an internet gateway (default).
/// - `PrivateWithEgress`: private subnets that reach out through NAT.
/// - `PrivateIsolated`: private subnets without any egress route; platform
///   services are only reachable through VPC endpoints.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum SubnetVisibility {
    #[default]
    Public,
    PrivateWithEgress,
    PrivateIsolated,
}

impl SubnetVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubnetVisibility::Public => "public",
            SubnetVisibility::PrivateWithEgress => "private-with-egress",
            SubnetVisibility::PrivateIsolated => "private-isolated",
        }
    }
}

impl FromStr for SubnetVisibility {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "public" | "" => Ok(SubnetVisibility::Public),
            "private" | "private-with-egress" | "private-with-nat" => {
                Ok(SubnetVisibility::PrivateWithEgress)
            }
            "isolated" | "private-isolated" => Ok(SubnetVisibility::PrivateIsolated),
            _ => Err(ModelError::UnknownSubnetVisibility(s.to_string())),
        }
    }
}

impl fmt::Display for SubnetVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
