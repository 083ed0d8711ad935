//! `default`: fill a zero slot with the payload.

use super::scalar::{dispatch_scalar, Scalar};
use super::{RuleEnv, RuleKind};
use crate::error::RuleError;
use crate::value::{Pointer, Value};

/// A slot that already holds a non-zero value is left alone, whatever its
/// kind. Only a zero slot is checked against the supported kinds.
pub fn apply(payload: &str, slot: &mut Value, _env: &mut RuleEnv) -> Result<(), RuleError> {
    if !slot.is_zero() {
        return Ok(());
    }
    dispatch_scalar!(
        slot,
        v => fill(payload, v),
        other => Err(RuleError::unsupported(RuleKind::Default, other.kind()))
    )
}

fn fill<T: Scalar>(payload: &str, slot: &mut T) -> Result<(), RuleError> {
    if slot.is_zero() {
        *slot = T::parse_literal(payload)?;
    }
    Ok(())
}

/// Allocate the target of an absent pointer and fill it with the default.
/// The pointer is left absent if the payload does not parse.
pub(crate) fn fill_absent(
    payload: &str,
    pointer: &mut Pointer,
    env: &mut RuleEnv,
) -> Result<(), RuleError> {
    let elem = pointer.elem();
    let mut target = elem
        .zero()
        .ok_or_else(|| RuleError::unsupported(RuleKind::Default, elem))?;
    apply(payload, &mut target, env)?;
    pointer.set(target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::Kind;

    fn run(payload: &str, mut slot: Value) -> Result<Value, RuleError> {
        apply(payload, &mut slot, &mut RuleEnv::default())?;
        Ok(slot)
    }

    #[test]
    fn fills_zero_slots() {
        assert_eq!(run("42", Value::I32(0)).unwrap(), Value::I32(42));
        assert_eq!(run("1.5", Value::F64(0.0)).unwrap(), Value::F64(1.5));
        assert_eq!(run("guest", Value::text("")).unwrap(), Value::text("guest"));
    }

    #[test]
    fn keeps_set_values() {
        assert_eq!(run("42", Value::I32(7)).unwrap(), Value::I32(7));
        assert_eq!(run("guest", Value::text("ada")).unwrap(), Value::text("ada"));
        assert_eq!(run("1.5", Value::F64(-0.0)).unwrap().to_string(), "-0");
    }

    #[test]
    fn set_value_skips_parsing() {
        assert_eq!(run("abc", Value::U16(3)).unwrap(), Value::U16(3));
    }

    #[test]
    fn bad_literal_on_zero_slot_fails() {
        let err = run("abc", Value::U16(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(run("300", Value::U8(0)).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn bool_is_only_rejected_when_unset() {
        assert_eq!(run("true", Value::Bool(true)).unwrap(), Value::Bool(true));
        let err = run("true", Value::Bool(false)).unwrap_err();
        assert!(matches!(
            err,
            RuleError::UnsupportedKind {
                rule: RuleKind::Default,
                kind: Kind::Bool
            }
        ));
    }

    #[test]
    fn absent_pointer_gets_a_target() {
        let mut pointer = Pointer::nil(Kind::U32);
        fill_absent("9", &mut pointer, &mut RuleEnv::default()).unwrap();
        assert_eq!(pointer.get(), Some(Value::U32(9)));
    }

    #[test]
    fn absent_pointer_stays_absent_on_error() {
        let mut pointer = Pointer::nil(Kind::U32);
        assert!(fill_absent("x", &mut pointer, &mut RuleEnv::default()).is_err());
        assert!(pointer.is_nil());

        let mut nested = Pointer::nil(Kind::Pointer);
        let err = fill_absent("1", &mut nested, &mut RuleEnv::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRule);
        assert!(nested.is_nil());
    }
}
