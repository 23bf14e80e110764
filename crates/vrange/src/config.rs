//! Factory configuration

use serde::{Deserialize, Serialize};
use std::env;

/// How the factory treats input it cannot fully interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Recover from syntax errors and fall back to named versions
    Lenient,
    /// Surface every parse failure as an error
    Strict,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Lenient
    }
}

impl Mode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lenient" => Some(Mode::Lenient),
            "strict" => Some(Mode::Strict),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Lenient => "lenient",
            Mode::Strict => "strict",
        }
    }
}

/// Settings for a [`VersionFactory`](crate::VersionFactory)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FactoryConfig {
    pub mode: Mode,
    /// Log syntax errors that lenient mode recovers from
    pub log_recovered_errors: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        FactoryConfig {
            mode: Mode::default(),
            log_recovered_errors: true,
        }
    }
}

impl FactoryConfig {
    pub fn strict() -> Self {
        FactoryConfig {
            mode: Mode::Strict,
            ..Default::default()
        }
    }

    pub fn lenient() -> Self {
        FactoryConfig {
            mode: Mode::Lenient,
            ..Default::default()
        }
    }

    /// Get a configuration value from environment variable
    /// Converts "foo-bar" to "VRANGE_FOO_BAR"
    pub fn get_env_config(key: &str) -> Option<String> {
        let var = format!("VRANGE_{}", key.replace('-', "_").to_uppercase());
        env::var(var).ok().filter(|s| !s.is_empty())
    }

    /// Get boolean value from environment variable
    pub fn get_env_bool(key: &str) -> Option<bool> {
        Self::get_env_config(key).map(|val| !matches!(val.to_lowercase().as_str(), "false" | "0"))
    }

    /// Defaults overridden by `VRANGE_MODE` and `VRANGE_LOG_RECOVERED_ERRORS`.
    pub fn from_env() -> Self {
        let mut config = FactoryConfig::default();
        if let Some(mode) = Self::get_env_config("mode") {
            match Mode::from_str(&mode) {
                Some(mode) => config.mode = mode,
                None => log::warn!("Ignoring unknown VRANGE_MODE value {:?}", mode),
            }
        }
        if let Some(enabled) = Self::get_env_bool("log-recovered-errors") {
            config.log_recovered_errors = enabled;
        }
        config
    }
}
