//! `minimum`: raise numeric values below the floor.

use super::scalar::{dispatch_number, Number};
use super::{RuleEnv, RuleKind};
use crate::error::RuleError;
use crate::value::Value;

pub fn apply(payload: &str, slot: &mut Value, _env: &mut RuleEnv) -> Result<(), RuleError> {
    dispatch_number!(
        slot,
        v => raise(payload, v),
        other => Err(RuleError::unsupported(RuleKind::Minimum, other.kind()))
    )
}

fn raise<T: Number>(payload: &str, slot: &mut T) -> Result<(), RuleError> {
    let floor = T::parse_literal(payload)?;
    if *slot < floor {
        *slot = floor;
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
    fn raises_values_below_floor() {
        assert_eq!(run("5", Value::I64(-3)).unwrap(), Value::I64(5));
        assert_eq!(run("5", Value::U16(2)).unwrap(), Value::U16(5));
        assert_eq!(run("0.5", Value::F32(0.25)).unwrap(), Value::F32(0.5));
    }

    #[test]
    fn keeps_values_at_or_above_floor() {
        assert_eq!(run("5", Value::I8(5)).unwrap(), Value::I8(5));
        assert_eq!(run("5", Value::U64(90)).unwrap(), Value::U64(90));
    }

    #[test]
    fn zero_is_raised_too() {
        assert_eq!(run("1", Value::I32(0)).unwrap(), Value::I32(1));
    }

    #[test]
    fn rejects_non_numeric_slots() {
        let err = run("5", Value::text("abc")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRule);
        assert!(run("5", Value::Bool(true)).is_err());
    }

    #[test]
    fn payload_must_fit_the_slot() {
        assert_eq!(run("-1", Value::U8(3)).unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(run("five", Value::F64(3.0)).unwrap_err().kind(), ErrorKind::Parse);
    }
}
