//! Adapter configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default nesting limit for a single call.
pub const DEFAULT_MAX_DEPTH: usize = 128;
/// Default compiled-size limit for `pattern-strip` patterns (10 MiB).
pub const DEFAULT_PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Runtime knobs for an [`Adapter`](crate::Adapter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Report mutations to the tracing sink
    #[serde(default = "default_true")]
    pub audit: bool,

    /// Maximum nesting depth before the call is aborted. Guards against
    /// pointer cycles.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Compiled-size limit in bytes for each pattern
    #[serde(default = "default_pattern_size_limit")]
    pub pattern_size_limit: usize,
}

impl AdapterConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.pattern_size_limit == 0 {
            return Err(ConfigError::Invalid(
                "pattern_size_limit must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            audit: default_true(),
            max_depth: default_max_depth(),
            pattern_size_limit: default_pattern_size_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_pattern_size_limit() -> usize {
    DEFAULT_PATTERN_SIZE_LIMIT
}
