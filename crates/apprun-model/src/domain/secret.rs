use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

/// Plaintext payload of a managed secret, extracted from a `secret://` value.
///
/// The payload never shows up in `Debug` output or serialized topologies;
/// only [`SecretPayload::expose`] hands out the plaintext.
#[derive(Clone)]
pub struct SecretPayload(SecretString);

impl SecretPayload {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Exposes the plaintext. Callers must not log or persist the result.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for SecretPayload {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SecretPayload {}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretPayload([REDACTED])")
    }
}

impl Serialize for SecretPayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}
