//! Mutation sinks.
//!
//! Every rule application that changes a field is reported as a
//! [`Mutation`]. Mutations are reported as they happen, so a call that later
//! fails may still have reported some.

use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::rules::RuleKind;

/// One observed change: the rule that fired and the field's new value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Mutation {
    /// Dotted display-name path, e.g. `order.lines.qty`.
    pub path: String,
    pub rule: RuleKind,
    /// Rendered value after the rule ran.
    pub value: String,
}

/// Receiver for mutation events.
pub trait MutationSink: Send + Sync {
    fn record(&self, mutation: &Mutation);
}

/// Emits each mutation as a structured `tracing` event under the
/// `field_adapt::audit` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl MutationSink for TracingSink {
    fn record(&self, mutation: &Mutation) {
        info!(
            target: "field_adapt::audit",
            field = %mutation.path,
            rule = %mutation.rule,
            new_value = %mutation.value,
            "field adapted"
        );
    }
}

/// In-memory sink for testing
pub struct MemorySink {
    entries: RwLock<Vec<Mutation>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Get all entries
    pub fn entries(&self) -> Vec<Mutation> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationSink for MemorySink {
    fn record(&self, mutation: &Mutation) {
        self.entries.write().push(mutation.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mutation(path: &str) -> Mutation {
        Mutation {
            path: path.into(),
            rule: RuleKind::Maximum,
            value: "5".into(),
        }
    }

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.record(&mutation("a"));
        sink.record(&mutation("b"));

        let paths: Vec<String> = sink.entries().into_iter().map(|m| m.path).collect();
        assert_eq!(paths, vec!["a", "b"]);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn mutation_serializes_rule_key() {
        let json = serde_json::to_value(mutation("order.qty")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"path": "order.qty", "rule": "maximum", "value": "5"})
        );
    }

    #[test]
    fn tracing_sink_accepts_events_without_subscriber() {
        TracingSink.record(&mutation("x"));
    }

    #[test]
    fn tracing_sink_emits_under_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("field_adapt=trace"))
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            TracingSink.record(&mutation("order.qty"));
        });
    }
}
