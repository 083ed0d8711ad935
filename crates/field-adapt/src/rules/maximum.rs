//! `maximum`: lower numeric values above the ceiling.

use super::scalar::{dispatch_number, Number};
use super::{RuleEnv, RuleKind};
use crate::error::RuleError;
use crate::value::Value;

pub fn apply(payload: &str, slot: &mut Value, _env: &mut RuleEnv) -> Result<(), RuleError> {
    dispatch_number!(
        slot,
        v => lower(payload, v),
        other => Err(RuleError::unsupported(RuleKind::Maximum, other.kind()))
    )
}

fn lower<T: Number>(payload: &str, slot: &mut T) -> Result<(), RuleError> {
    let ceiling = T::parse_literal(payload)?;
    if *slot > ceiling {
        *slot = ceiling;
    }
    Ok(())
}
