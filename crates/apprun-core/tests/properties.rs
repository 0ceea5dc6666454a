//! Property tests for classification and topology building.
use std::collections::BTreeMap;

use apprun_core::{classify, resolve};
use apprun_model::{
    DeploymentSettings, Directive, ImageReference, RawEnv, RegistryImage,
};
use proptest::prelude::*;
use serde_json::{Value, json};

fn key() -> impl Strategy<Value = String> {
    (
        prop_oneof![
            Just(""),
            Just("IAM_POLICY_"),
            Just("iamPolicy"),
            Just("useAwsVpcEndpoint"),
            Just("PORT"),
        ],
        "[A-Za-z0-9_]{0,8}",
    )
        .prop_map(|(prefix, suffix)| format!("{prefix}{suffix}"))
        .prop_filter("keys are non-empty", |k| !k.is_empty())
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z0-9 :/]{0,12}".prop_map(Value::String),
        "[a-z0-9 :/]{0,12}".prop_map(|s| Value::String(format!("secret://{s}"))),
        Just(Value::String("true".into())),
        Just(Value::String("{broken".into())),
        Just(Value::String(
            r#"{"Effect":"Allow","Action":"s3:GetObject","Resource":"*"}"#.into()
        )),
        Just(json!({"Statement": [{"Effect": "Deny", "Action": "s3:*", "Resource": "*"}]})),
    ]
}

fn bundle() -> impl Strategy<Value = RawEnv> {
    proptest::collection::btree_map(key(), value(), 0..16)
        .prop_map(|m: BTreeMap<String, Value>| m.into_iter().collect())
}

fn settings(registry: bool) -> DeploymentSettings {
    let s = DeploymentSettings::new("prop").with_project_root("/srv/prop");
    if registry {
        s.with_registry_image(RegistryImage::new("acme/api", ImageReference::parse("v1")))
    } else {
        s
    }
}

/// Position of a directive kind in the pipeline.
fn stage(d: &Directive) -> u8 {
    match d {
        Directive::LookupNetwork { .. } => 0,
        Directive::CreateConnector { .. } => 1,
        Directive::AttachEndpoint { .. } => 2,
        Directive::CreateSecret { .. } => 3,
        Directive::BuildImage { .. } | Directive::ReferenceImage { .. } => 4,
        Directive::CreateService { .. } => 5,
        Directive::AttachPolicy { .. } => 6,
        Directive::EmitOutput { .. } => 7,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every key lands in exactly one bucket.
    #[test]
    fn property_classification_is_a_partition(raw in bundle()) {
        let c = classify(&raw);
        prop_assert_eq!(c.len(), raw.len());
        for key in raw.keys() {
            prop_assert_eq!(c.occurrences(key), 1, "key {} not in exactly one bucket", key);
        }
    }

    /// PROPERTY: classification is deterministic.
    #[test]
    fn property_classification_is_idempotent(raw in bundle()) {
        prop_assert_eq!(classify(&raw), classify(&raw));
    }

    /// PROPERTY: PORT=8080 whatever the user supplied.
    #[test]
    fn property_port_is_fixed(raw in bundle(), registry in any::<bool>()) {
        let t = resolve(&raw, &settings(registry)).unwrap();
        let service = t.service().unwrap();
        prop_assert_eq!(service.environment.get("PORT"), Some("8080"));
        prop_assert_eq!(
            service.environment.iter().filter(|kv| kv.key() == "PORT").count(),
            1
        );
    }

    /// PROPERTY: exactly one image directive, matching the configured mode.
    #[test]
    fn property_image_modes_are_exclusive(raw in bundle(), registry in any::<bool>()) {
        let t = resolve(&raw, &settings(registry)).unwrap();
        let builds = t.iter().filter(|d| matches!(d, Directive::BuildImage { .. })).count();
        let refs = t.iter().filter(|d| matches!(d, Directive::ReferenceImage { .. })).count();
        if registry {
            prop_assert_eq!((builds, refs), (0, 1));
        } else {
            prop_assert_eq!((builds, refs), (1, 0));
        }
    }

    /// PROPERTY: directives follow pipeline order and only reference earlier handles.
    #[test]
    fn property_topology_is_ordered_and_closed(raw in bundle()) {
        let t = resolve(&raw, &settings(false)).unwrap();
        let stages: Vec<u8> = t.iter().map(stage).collect();
        prop_assert!(stages.windows(2).all(|w| w[0] <= w[1]), "out of order: {:?}", stages);
        prop_assert!(t.first_dangling().is_none());
        prop_assert_eq!(t.iter().filter(|d| matches!(d, Directive::CreateService { .. })).count(), 1);
        prop_assert_eq!(t.iter().filter(|d| matches!(d, Directive::EmitOutput { .. })).count(), 1);
    }

    /// PROPERTY: one secret object per bindable secret, none leaking into plain variables.
    #[test]
    fn property_secrets_map_one_to_one(raw in bundle()) {
        let c = classify(&raw);
        let t = resolve(&raw, &settings(false)).unwrap();
        let bindable: Vec<_> = c.secrets.keys().filter(|k| k.as_str() != "PORT").collect();
        prop_assert_eq!(t.secret_names().len(), bindable.len());
        prop_assert_eq!(t.service().unwrap().secrets.len(), bindable.len());
        let service = t.service().unwrap();
        for key in bindable {
            prop_assert!(service.environment.get(key).is_none());
        }
    }
}
