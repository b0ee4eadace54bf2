// ABOUTME: Engine configuration: output escaping and built-in helper registration
// ABOUTME: Every field has a default, so an empty YAML document is a valid configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::EscapePolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse engine configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Escaping applied to `{{...}}` output; `{{{...}}}` is never escaped
    #[serde(default)]
    pub escape: EscapePolicy,
    /// Register `if`, `unless`, `each`, `with`, `lookup` and `log`
    #[serde(default = "default_builtin_helpers")]
    pub builtin_helpers: bool,
}

fn default_builtin_helpers() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            escape: EscapePolicy::default(),
            builtin_helpers: default_builtin_helpers(),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}
