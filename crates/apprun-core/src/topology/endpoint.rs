//! Rule table gating the optional VPC endpoints.
//!
//! Each rule is a predicate over [`EndpointContext`] plus the endpoint services it adds.
//! Rules are evaluated once, in table order, and each fires at most once, so the
//! union/override semantics of the flags can be read off the table directly.
use apprun_model::{
    EndpointFlag, EndpointService, FeatureFlags, FlagPrecedence, LegacyFlags,
};
use tracing::debug;

/// Inputs of the endpoint predicates.
#[derive(Debug, Clone, Copy)]
pub struct EndpointContext<'a> {
    pub flags: &'a FeatureFlags,
    pub legacy: LegacyFlags,
    pub precedence: FlagPrecedence,
    /// Whether any secret object is created.
    pub has_secrets: bool,
}

impl EndpointContext<'_> {
    /// The endpoint's own feature flag is set.
    pub fn requested(&self, flag: EndpointFlag) -> bool {
        self.flags.is_enabled(flag)
    }

    /// The legacy bulk switch enables the interface endpoint behind `flag`.
    pub fn bulk_enabled(&self, flag: EndpointFlag) -> bool {
        if self.legacy.interface_endpoints.is_disabled() {
            return false;
        }
        match self.precedence {
            FlagPrecedence::Union => true,
            FlagPrecedence::Explicit => !self.flags.is_explicitly_disabled(flag),
        }
    }
}

/// One gating rule.
pub struct EndpointRule {
    pub name: &'static str,
    /// Services added together when the gate opens.
    pub services: &'static [EndpointService],
    pub gate: fn(&EndpointContext<'_>) -> bool,
}

pub const ENDPOINT_RULES: &[EndpointRule] = &[
    EndpointRule {
        name: "s3-gateway",
        services: &[EndpointService::S3],
        gate: |ctx| ctx.requested(EndpointFlag::S3),
    },
    EndpointRule {
        name: "dynamodb-gateway",
        services: &[EndpointService::DynamoDb],
        gate: |ctx| ctx.requested(EndpointFlag::DynamoDb) || ctx.legacy.dynamodb_endpoint.is_enabled(),
    },
    EndpointRule {
        name: "secrets-manager-interface",
        services: &[EndpointService::SecretsManager],
        gate: |ctx| {
            ctx.has_secrets
                && (ctx.requested(EndpointFlag::SecretsManager)
                    || ctx.bulk_enabled(EndpointFlag::SecretsManager))
        },
    },
    EndpointRule {
        name: "cloudwatch-logs-interface",
        services: &[EndpointService::CloudWatchLogs],
        gate: |ctx| {
            ctx.requested(EndpointFlag::CloudWatchLogs)
                || ctx.bulk_enabled(EndpointFlag::CloudWatchLogs)
        },
    },
    EndpointRule {
        name: "ecr-interface-pair",
        services: &[EndpointService::EcrApi, EndpointService::EcrDocker],
        gate: |ctx| ctx.requested(EndpointFlag::Ecr) || ctx.bulk_enabled(EndpointFlag::Ecr),
    },
];

/// Endpoint services to attach, in rule order.
pub fn select_endpoints(ctx: &EndpointContext<'_>) -> Vec<EndpointService> {
    let mut out = Vec::new();
    for rule in ENDPOINT_RULES {
        if (rule.gate)(ctx) {
            for service in rule.services {
                debug!(
                    rule = rule.name,
                    service = service.service_name(),
                    kind = ?service.kind(),
                    "endpoint rule fired"
                );
            }
            out.extend_from_slice(rule.services);
        }
    }
    out
}
