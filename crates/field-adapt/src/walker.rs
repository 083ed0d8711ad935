//! Tree walker: narrows each field down to its leaves and runs the field's
//! rules there.
//!
//! The walker always operates on the adapted copy. What the copy shares with
//! the caller's input follows [`crate::value`]: pointer targets are edited
//! as copies and redirected through the ledger; sequence elements are
//! written straight back into the shared backing storage; maps are rebuilt.

use std::collections::BTreeMap;

use tracing::trace;

use crate::audit::{Mutation, MutationSink};
use crate::config::AdapterConfig;
use crate::error::AdaptError;
use crate::ledger::{WriteBackLedger, WriteBackTarget};
use crate::rules::{self, RuleEnv, RuleSet};
use crate::value::{Map, Value};

pub(crate) struct Walker<'a> {
    max_depth: usize,
    sink: Option<&'a dyn MutationSink>,
    ledger: WriteBackLedger,
    env: RuleEnv,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(config: &AdapterConfig, sink: Option<&'a dyn MutationSink>) -> Self {
        Self {
            max_depth: config.max_depth,
            sink,
            ledger: WriteBackLedger::new(),
            env: RuleEnv::new(config.pattern_size_limit),
        }
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut WriteBackLedger {
        &mut self.ledger
    }

    pub(crate) fn into_ledger(self) -> WriteBackLedger {
        self.ledger
    }

    /// Adapt `value` in place under `rules`, the rule set of the field it
    /// was reached from.
    pub(crate) fn walk(
        &mut self,
        value: &mut Value,
        rules: &RuleSet,
        path: &str,
        depth: usize,
    ) -> Result<(), AdaptError> {
        if depth > self.max_depth {
            return Err(AdaptError::DepthExceeded {
                path: path.to_string(),
                limit: self.max_depth,
            });
        }

        match value {
            Value::Record(record) => {
                for field in record.fields_mut() {
                    let field_rules = RuleSet::parse(&field.tag);
                    let field_path = join_path(path, &field.display_name());
                    self.walk(&mut field.value, &field_rules, &field_path, depth + 1)?;
                }
                Ok(())
            }
            Value::Pointer(pointer) => match pointer.target().cloned() {
                None => self.apply_rules(value, rules, path),
                Some(target) => {
                    let mut copy = target.read().clone();
                    let entry = self.ledger.reserve(WriteBackTarget::Pointee(target));
                    self.walk(&mut copy, rules, path, depth + 1)?;
                    self.ledger.fill(entry, copy);
                    Ok(())
                }
            },
            Value::Any(None) => Ok(()),
            Value::Any(Some(inner)) => self.walk(inner, rules, path, depth + 1),
            Value::Sequence(sequence) => {
                let items = sequence.storage().clone();
                let len = items.read().len();
                for index in 0..len {
                    let Some(element) = items.read().get(index).cloned() else {
                        break;
                    };
                    match element {
                        Value::Any(Some(inner)) if !matches!(*inner, Value::Pointer(_)) => {
                            let mut copy = *inner;
                            let entry = self.ledger.reserve(WriteBackTarget::SequenceSlot {
                                items: items.clone(),
                                index,
                            });
                            self.walk(&mut copy, rules, path, depth + 1)?;
                            self.ledger.fill(entry, Value::boxed(copy));
                        }
                        mut element => {
                            let original = element.clone();
                            let outcome = self.walk(&mut element, rules, path, depth + 1);
                            // Written back even when the walk failed; see the
                            // crate docs on partial side effects. Box edits
                            // are held back for the ledger.
                            let mut eager = element.clone();
                            let staged = restore_boxes(&mut eager, &original);
                            if let Some(slot) = items.write().get_mut(index) {
                                *slot = eager;
                            }
                            outcome?;
                            if staged {
                                let entry = self.ledger.reserve(WriteBackTarget::SequenceSlot {
                                    items: items.clone(),
                                    index,
                                });
                                self.ledger.fill(entry, element);
                            }
                        }
                    }
                }
                Ok(())
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.walk(item, rules, path, depth + 1)?;
                }
                Ok(())
            }
            Value::Map(map) => {
                let mut rebuilt = BTreeMap::new();
                for (key, mut entry) in map.entries() {
                    self.walk(&mut entry, rules, path, depth + 1)?;
                    rebuilt.insert(key, entry);
                }
                *map = Map::new(rebuilt);
                Ok(())
            }
            _ => self.apply_rules(value, rules, path),
        }
    }

    /// Run a leaf's rules in application order, reporting every rule that
    /// changed the value.
    fn apply_rules(
        &mut self,
        value: &mut Value,
        rule_set: &RuleSet,
        path: &str,
    ) -> Result<(), AdaptError> {
        for (kind, payload) in rule_set.iter() {
            let before = self.sink.map(|_| value.clone());
            rules::apply(kind, payload, value, &mut self.env).map_err(|source| {
                AdaptError::Rule {
                    path: path.to_string(),
                    rule: kind,
                    source,
                }
            })?;
            trace!(field = path, rule = %kind, "rule applied");

            if let (Some(sink), Some(before)) = (self.sink, before) {
                if !same_leaf(&before, value) {
                    sink.record(&Mutation {
                        path: path.to_string(),
                        rule: kind,
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Put back every non-pointer box of `original` that sits in owned storage
/// of `adapted` (record fields, array items). Returns whether any box was
/// found.
fn restore_boxes(adapted: &mut Value, original: &Value) -> bool {
    if let Value::Any(Some(inner)) = original {
        if !matches!(**inner, Value::Pointer(_)) {
            *adapted = original.clone();
            return true;
        }
    }
    match (adapted, original) {
        (Value::Record(adapted), Value::Record(original)) => adapted
            .fields_mut()
            .iter_mut()
            .zip(original.fields())
            .fold(false, |found, (a, o)| restore_boxes(&mut a.value, &o.value) || found),
        (Value::Array(adapted), Value::Array(original)) => adapted
            .iter_mut()
            .zip(original)
            .fold(false, |found, (a, o)| restore_boxes(a, o) || found),
        _ => false,
    }
}

/// Leaf equality for change reporting. Floats compare by bits so a NaN
/// left alone is not reported as changed.
fn same_leaf(before: &Value, after: &Value) -> bool {
    match (before, after) {
        (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
        (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
        _ => before == after,
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}
