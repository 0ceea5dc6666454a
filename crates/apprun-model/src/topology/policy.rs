use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ModelError, ModelResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyEffect {
    Allow,
    Deny,
}

/// One IAM policy statement attached to the service's instance role.
///
/// Field names follow the IAM JSON grammar. `Action`/`Resource` style fields accept
/// either a single string or a list of strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    pub effect: PolicyEffect,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub action: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub not_action: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub not_resource: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_principal: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
}

impl PolicyStatement {
    /// Statement allowing `actions` on `resources`.
    pub fn allow<A, R>(actions: A, resources: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            sid: None,
            effect: PolicyEffect::Allow,
            action: actions.into_iter().map(Into::into).collect(),
            not_action: Vec::new(),
            resource: resources.into_iter().map(Into::into).collect(),
            not_resource: Vec::new(),
            principal: None,
            not_principal: None,
            condition: None,
        }
    }

    /// Parse and validate a single statement object.
    pub fn from_json(value: &Value) -> ModelResult<Self> {
        let stmt: PolicyStatement = serde_json::from_value(value.clone())
            .map_err(|e| ModelError::InvalidStatement(e.to_string()))?;
        stmt.validate()?;
        Ok(stmt)
    }

    /// A statement needs exactly one of `Action`/`NotAction`, and at most one of `Resource`/`NotResource`.
    pub fn validate(&self) -> ModelResult<()> {
        match (self.action.is_empty(), self.not_action.is_empty()) {
            (true, true) => {
                return Err(ModelError::InvalidStatement(
                    "statement has neither Action nor NotAction".into(),
                ));
            }
            (false, false) => {
                return Err(ModelError::InvalidStatement(
                    "statement has both Action and NotAction".into(),
                ));
            }
            _ => {}
        }
        if !self.resource.is_empty() && !self.not_resource.is_empty() {
            return Err(ModelError::InvalidStatement(
                "statement has both Resource and NotResource".into(),
            ));
        }
        Ok(())
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
