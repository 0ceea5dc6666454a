use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::{
    error::LoggerResult,
    object::{LoggerFormat, LoggerLevel},
};

/// Filter expression, e.g. `info` or `apprun_core=debug,info`.
pub const ENV_LOG_LEVEL: &str = "APPRUN_LOG";
/// `text`, `json` or `journald`.
pub const ENV_LOG_FORMAT: &str = "APPRUN_LOG_FORMAT";
/// Any non-empty value disables ANSI colors (<https://no-color.org>).
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Build from key lookups (normally the process environment); absent keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> LoggerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            cfg.level = level.parse()?;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT).filter(|v| !v.trim().is_empty()) {
            cfg.format = format.parse()?;
        }
        if lookup(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
            cfg.use_color = false;
        }
        Ok(cfg)
    }

    /// Colors are used only when enabled and stderr, where logs go, is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::LoggerError;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn default_values() {
        let config = LoggerConfig::default();

        assert_eq!(config.format, LoggerFormat::Text);
        assert_eq!(config.level.as_str(), "info");
        assert!(config.with_targets);
        assert!(config.use_color);
    }

    #[test]
    fn from_lookup_reads_every_key() {
        let config = LoggerConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, "apprun_core=debug,warn"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_NO_COLOR, "1"),
        ]))
        .unwrap();

        assert_eq!(config.level.as_str(), "apprun_core=debug,warn");
        assert_eq!(config.format, LoggerFormat::Json);
        assert!(!config.use_color);
    }

    #[test]
    fn from_lookup_ignores_empty_values() {
        let config = LoggerConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, ""),
            (ENV_LOG_FORMAT, " "),
            (ENV_NO_COLOR, ""),
        ]))
        .unwrap();

        assert_eq!(config.level.as_str(), "info");
        assert_eq!(config.format, LoggerFormat::Text);
        assert!(config.use_color);
    }

    #[test]
    fn from_lookup_rejects_invalid_values() {
        let err = LoggerConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidFormat(_)));

        let err = LoggerConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "x=loud")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(_)));
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let config: LoggerConfig = serde_json::from_str(r#"{"format": "json"}"#).unwrap();

        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.level.as_str(), "info");
        assert!(config.with_targets);
    }
}
