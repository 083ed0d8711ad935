//! `choice`: restrict a set value to a list of options.
//!
//! Options are separated by `||`. A value outside the list is replaced by
//! the first option. Options are parsed one at a time, so a malformed option
//! after the matching one is never looked at.

use super::scalar::{dispatch_scalar, Scalar};
use super::{RuleEnv, RuleKind, OPTION_DELIMITER};
use crate::error::RuleError;
use crate::value::Value;

pub fn apply(payload: &str, slot: &mut Value, _env: &mut RuleEnv) -> Result<(), RuleError> {
    // Unset values are left for `default` to handle.
    if slot.is_zero() {
        return Ok(());
    }
    dispatch_scalar!(
        slot,
        v => choose(payload, v),
        other => Err(RuleError::unsupported(RuleKind::Choice, other.kind()))
    )
}

fn choose<T: Scalar>(payload: &str, slot: &mut T) -> Result<(), RuleError> {
    let mut first = None;
    for option in payload.split(OPTION_DELIMITER) {
        let option = T::parse_literal(option)?;
        if option == *slot {
            return Ok(());
        }
        first.get_or_insert(option);
    }
    if let Some(first) = first {
        *slot = first;
    }
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
    fn listed_value_is_kept() {
        assert_eq!(run("1||2||3", Value::I64(2)).unwrap(), Value::I64(2));
        assert_eq!(
            run("red||green", Value::text("green")).unwrap(),
            Value::text("green")
        );
    }

    #[test]
    fn unlisted_value_becomes_first_option() {
        assert_eq!(run("2000||2001", Value::U16(1999)).unwrap(), Value::U16(2000));
        assert_eq!(
            run("red||green", Value::text("blue")).unwrap(),
            Value::text("red")
        );
    }

    #[test]
    fn single_option_payload() {
        assert_eq!(run("7", Value::I8(3)).unwrap(), Value::I8(7));
    }

    #[test]
    fn zero_slot_is_skipped() {
        assert_eq!(run("1||2", Value::I32(0)).unwrap(), Value::I32(0));
        assert_eq!(run("a||b", Value::text("")).unwrap(), Value::text(""));
        assert_eq!(run("x", Value::Bool(false)).unwrap(), Value::Bool(false));
    }

    #[test]
    fn options_are_parsed_lazily() {
        assert_eq!(run("1||oops", Value::I32(1)).unwrap(), Value::I32(1));
        let err = run("1||oops", Value::I32(5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn floats_compare_at_slot_width() {
        assert_eq!(run("0.1||0.2", Value::F32(0.2)).unwrap(), Value::F32(0.2));
    }

    #[test]
    fn set_bool_is_rejected() {
        let err = run("true", Value::Bool(true)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRule);
    }
}
