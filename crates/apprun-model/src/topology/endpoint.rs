use serde::{Deserialize, Serialize};

/// Cost/attachment class of a VPC endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndpointKind {
    /// Free, attached to route tables.
    Gateway,
    /// Billed, ENI-backed.
    Interface,
}

/// Platform service reachable through a VPC endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndpointService {
    S3,
    DynamoDb,
    SecretsManager,
    CloudWatchLogs,
    EcrApi,
    EcrDocker,
}

impl EndpointService {
    pub const fn kind(&self) -> EndpointKind {
        match self {
            EndpointService::S3 | EndpointService::DynamoDb => EndpointKind::Gateway,
            _ => EndpointKind::Interface,
        }
    }

    /// Handle of the endpoint directive.
    pub const fn logical_id(&self) -> &'static str {
        match self {
            EndpointService::S3 => "S3Endpoint",
            EndpointService::DynamoDb => "DynamoDbEndpoint",
            EndpointService::SecretsManager => "SecretsManagerEndpoint",
            EndpointService::CloudWatchLogs => "CloudWatchLogsEndpoint",
            EndpointService::EcrApi => "EcrApiEndpoint",
            EndpointService::EcrDocker => "EcrDkrEndpoint",
        }
    }

    /// Service name suffix as the platform spells it (`com.amazonaws.<region>.<name>`).
    pub const fn service_name(&self) -> &'static str {
        match self {
            EndpointService::S3 => "s3",
            EndpointService::DynamoDb => "dynamodb",
            EndpointService::SecretsManager => "secretsmanager",
            EndpointService::CloudWatchLogs => "logs",
            EndpointService::EcrApi => "ecr.api",
            EndpointService::EcrDocker => "ecr.dkr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_services_are_gateways() {
        assert_eq!(EndpointService::S3.kind(), EndpointKind::Gateway);
        assert_eq!(EndpointService::DynamoDb.kind(), EndpointKind::Gateway);
        for s in [
            EndpointService::SecretsManager,
            EndpointService::CloudWatchLogs,
            EndpointService::EcrApi,
            EndpointService::EcrDocker,
        ] {
            assert_eq!(s.kind(), EndpointKind::Interface, "{s:?}");
        }
    }

    #[test]
    fn service_names_follow_platform_spelling() {
        assert_eq!(EndpointService::CloudWatchLogs.service_name(), "logs");
        assert_eq!(EndpointService::EcrApi.service_name(), "ecr.api");
        assert_eq!(EndpointService::EcrDocker.service_name(), "ecr.dkr");
        assert_eq!(EndpointService::SecretsManager.service_name(), "secretsmanager");
    }
}
