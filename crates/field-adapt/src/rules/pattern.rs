//! `pattern-strip`: delete every match of a pattern from a text value.

use std::borrow::Cow;

use super::{RuleEnv, RuleKind};
use crate::error::RuleError;
use crate::value::Value;

pub fn apply(payload: &str, slot: &mut Value, env: &mut RuleEnv) -> Result<(), RuleError> {
    let text = match slot {
        Value::Text(text) => text,
        other => {
            return Err(RuleError::unsupported(
                RuleKind::PatternStrip,
                other.kind(),
            ))
        }
    };
    let pattern = env.pattern(payload)?;
    let stripped = match pattern.replace_all(text, "") {
        Cow::Borrowed(_) => return Ok(()),
        Cow::Owned(stripped) => stripped,
    };
    *text = stripped;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn run(payload: &str, mut slot: Value) -> Result<Value, RuleError> {
        apply(payload, &mut slot, &mut RuleEnv::default())?;
        Ok(slot)
    }

    #[test]
    fn strips_all_matches() {
        assert_eq!(
            run("[^a-zA-Z0-9 ]+", Value::text("-678))++2")).unwrap(),
            Value::text("6782")
        );
        assert_eq!(
            run(r"\s+", Value::text(" a b  c ")).unwrap(),
            Value::text("abc")
        );
    }

    #[test]
    fn no_match_leaves_text() {
        assert_eq!(run("[0-9]", Value::text("abc")).unwrap(), Value::text("abc"));
    }

    #[test]
    fn kind_is_checked_before_compiling() {
        let err = run("(", Value::I32(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRule);
    }

    #[test]
    fn bad_pattern_is_reported() {
        let err = run("(", Value::text("abc")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Pattern);
        assert!(err.to_string().contains('('));
    }

    #[test]
    fn env_caches_across_slots() {
        let mut env = RuleEnv::default();
        let mut a = Value::text("a-b");
        let mut b = Value::text("c-d");
        apply("-", &mut a, &mut env).unwrap();
        apply("-", &mut b, &mut env).unwrap();
        assert_eq!(env.cached_patterns(), 1);
        assert_eq!(b, Value::text("cd"));
    }
}
