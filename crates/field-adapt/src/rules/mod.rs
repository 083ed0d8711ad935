//! Rule kinds, per-field rule sets, and the evaluator registry.
//!
//! Every evaluator has the same shape: a raw payload, a mutable slot, and
//! the per-call [`RuleEnv`]. Evaluators only see scalar slots or absent
//! pointers; present pointers are evaluated through by [`apply`].

mod scalar;

pub mod choice;
pub mod default;
pub mod forbidden;
pub mod maximum;
pub mod minimum;
pub mod pattern;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::tag::Tag;
use crate::value::Value;

/// Separator between options in `choice` and `forbidden` payloads.
pub const OPTION_DELIMITER: &str = "||";
/// Separator between the last forbidden value and its substitute.
pub const SUBSTITUTE_DELIMITER: &str = "**";

/// The six recognized rules, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    Default,
    Minimum,
    Maximum,
    Choice,
    Forbidden,
    PatternStrip,
}

impl RuleKind {
    /// Application order at every leaf. Default fills a zero before the
    /// bounds clamp it; choice and forbidden see the clamped value.
    pub const ORDER: [RuleKind; 6] = [
        RuleKind::Default,
        RuleKind::Minimum,
        RuleKind::Maximum,
        RuleKind::Choice,
        RuleKind::Forbidden,
        RuleKind::PatternStrip,
    ];

    /// Metadata key the rule is read from.
    pub fn key(self) -> &'static str {
        match self {
            RuleKind::Default => "default",
            RuleKind::Minimum => "minimum",
            RuleKind::Maximum => "maximum",
            RuleKind::Choice => "choice",
            RuleKind::Forbidden => "forbidden",
            RuleKind::PatternStrip => "pattern-strip",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Signature shared by all evaluators.
pub type Evaluator = fn(&str, &mut Value, &mut RuleEnv) -> Result<(), RuleError>;

/// Rule kind to evaluator table, in application order.
const EVALUATORS: [(RuleKind, Evaluator); 6] = [
    (RuleKind::Default, default::apply),
    (RuleKind::Minimum, minimum::apply),
    (RuleKind::Maximum, maximum::apply),
    (RuleKind::Choice, choice::apply),
    (RuleKind::Forbidden, forbidden::apply),
    (RuleKind::PatternStrip, pattern::apply),
];

pub fn evaluator(kind: RuleKind) -> Evaluator {
    EVALUATORS[kind as usize].1
}

/// Apply one rule to a slot.
///
/// An absent pointer only reacts to `default`, which allocates a target of
/// the pointer's element kind. A present pointer is evaluated through.
pub fn apply(
    kind: RuleKind,
    payload: &str,
    slot: &mut Value,
    env: &mut RuleEnv,
) -> Result<(), RuleError> {
    if let Value::Pointer(pointer) = slot {
        return match pointer.target().cloned() {
            Some(target) => apply(kind, payload, &mut target.write(), env),
            None if kind == RuleKind::Default => default::fill_absent(payload, pointer, env),
            None => Ok(()),
        };
    }
    evaluator(kind)(payload, slot, env)
}

/// The rules attached to one field: at most one payload per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    payloads: BTreeMap<RuleKind, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the recognized rules from a field's metadata. Unknown keys
    /// and empty payloads are dropped.
    pub fn parse(tag: &Tag) -> Self {
        let payloads = RuleKind::ORDER
            .into_iter()
            .filter_map(|kind| {
                tag.lookup(kind.key())
                    .filter(|payload| !payload.is_empty())
                    .map(|payload| (kind, payload))
            })
            .collect();
        Self { payloads }
    }

    pub fn with(mut self, kind: RuleKind, payload: impl Into<String>) -> Self {
        let payload = payload.into();
        if !payload.is_empty() {
            self.payloads.insert(kind, payload);
        }
        self
    }

    pub fn get(&self, kind: RuleKind) -> Option<&str> {
        self.payloads.get(&kind).map(String::as_str)
    }

    pub fn contains(&self, kind: RuleKind) -> bool {
        self.payloads.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleKind, &str)> {
        self.payloads.iter().map(|(kind, payload)| (*kind, payload.as_str()))
    }
}

/// Per-call evaluation state: the compiled pattern cache.
#[derive(Debug)]
pub struct RuleEnv {
    patterns: HashMap<String, Regex>,
    pattern_size_limit: usize,
}

impl RuleEnv {
    pub fn new(pattern_size_limit: usize) -> Self {
        Self {
            patterns: HashMap::new(),
            pattern_size_limit,
        }
    }

    /// Compile `source` once per call.
    pub fn pattern(&mut self, source: &str) -> Result<&Regex, RuleError> {
        if !self.patterns.contains_key(source) {
            let compiled = RegexBuilder::new(source)
                .size_limit(self.pattern_size_limit)
                .build()
                .map_err(|source_err| RuleError::Pattern {
                    pattern: source.to_string(),
                    source: source_err,
                })?;
            self.patterns.insert(source.to_string(), compiled);
        }
        self.patterns
            .get(source)
            .ok_or_else(|| RuleError::invalid_rule(source, "pattern cache miss"))
    }

    pub fn cached_patterns(&self) -> usize {
        self.patterns.len()
    }
}

impl Default for RuleEnv {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PATTERN_SIZE_LIMIT)
    }
}
