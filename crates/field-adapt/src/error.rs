use thiserror::Error;

use crate::rules::RuleKind;
use crate::value::Kind;

/// Errors raised by a single rule evaluator at a leaf.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("invalid rule payload {payload:?}: {reason}")]
    InvalidRule { payload: String, reason: String },

    #[error("rule {rule} cannot be applied to {kind} values")]
    UnsupportedKind { rule: RuleKind, kind: Kind },

    #[error("cannot parse {literal:?} as {kind}: {reason}")]
    Parse {
        literal: String,
        kind: Kind,
        reason: String,
    },

    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl RuleError {
    pub fn unsupported(rule: RuleKind, kind: Kind) -> Self {
        RuleError::UnsupportedKind { rule, kind }
    }

    pub fn invalid_rule(payload: &str, reason: impl Into<String>) -> Self {
        RuleError::InvalidRule {
            payload: payload.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RuleError::InvalidRule { .. } | RuleError::UnsupportedKind { .. } => {
                ErrorKind::InvalidRule
            }
            RuleError::Parse { .. } => ErrorKind::Parse,
            RuleError::Pattern { .. } => ErrorKind::Pattern,
        }
    }
}

/// Errors returned by [`Adapter::adapt`](crate::Adapter::adapt).
///
/// Any of these aborts the whole call: no adapted value is returned and no
/// deferred write-back is committed.
#[derive(Error, Debug)]
pub enum AdaptError {
    #[error("argument is not a record (got {0})")]
    NotARecord(Kind),

    #[error("field {path}, rule {rule}: {source}")]
    Rule {
        path: String,
        rule: RuleKind,
        #[source]
        source: RuleError,
    },

    #[error("nesting deeper than {limit} levels at {path:?}")]
    DepthExceeded { path: String, limit: usize },
}

impl AdaptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdaptError::NotARecord(_) => ErrorKind::NotARecord,
            AdaptError::Rule { source, .. } => source.kind(),
            AdaptError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        }
    }

    /// Path of the field that failed, if the error is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            AdaptError::Rule { path, .. } | AdaptError::DepthExceeded { path, .. } => Some(path),
            AdaptError::NotARecord(_) => None,
        }
    }

    pub fn rule(&self) -> Option<RuleKind> {
        match self {
            AdaptError::Rule { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}

/// Coarse classification of [`AdaptError`] and [`RuleError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotARecord,
    /// Malformed payload, or a rule attached to a kind it does not support.
    InvalidRule,
    Parse,
    Pattern,
    DepthExceeded,
}

/// Errors loading an [`AdapterConfig`](crate::AdapterConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
