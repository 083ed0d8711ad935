//! `forbidden`: swap banned values for a substitute.
//!
//! Payload form: `a||b||c**replacement`. Banned values are separated by
//! `||`; the last one carries the substitute after `**`.

use super::scalar::{dispatch_scalar, Scalar};
use super::{RuleEnv, RuleKind, OPTION_DELIMITER, SUBSTITUTE_DELIMITER};
use crate::error::RuleError;
use crate::value::Value;

/// A split `forbidden` payload. Literals stay unparsed until a slot kind is
/// known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Forbidden<'a> {
    banned: Vec<&'a str>,
    substitute: &'a str,
}

impl<'a> Forbidden<'a> {
    pub fn parse(payload: &'a str) -> Result<Self, RuleError> {
        let mut banned: Vec<&str> = payload.split(OPTION_DELIMITER).collect();
        let last = banned.pop().unwrap_or_default();
        let parts: Vec<&str> = last.split(SUBSTITUTE_DELIMITER).collect();
        let &[last_banned, substitute] = parts.as_slice() else {
            return Err(RuleError::invalid_rule(
                payload,
                format!("last entry must be `value{SUBSTITUTE_DELIMITER}substitute`"),
            ));
        };
        banned.push(last_banned);
        Ok(Self {
            banned,
            substitute,
        })
    }

    pub fn banned(&self) -> &[&'a str] {
        &self.banned
    }

    pub fn substitute(&self) -> &'a str {
        self.substitute
    }

    /// Banned literals are parsed in order until one matches; the
    /// substitute is parsed only on a match.
    fn replace<T: Scalar>(&self, slot: &mut T) -> Result<(), RuleError> {
        for banned in &self.banned {
            if T::parse_literal(banned)? == *slot {
                *slot = T::parse_literal(self.substitute)?;
                break;
            }
        }
        Ok(())
    }
}

pub fn apply(payload: &str, slot: &mut Value, _env: &mut RuleEnv) -> Result<(), RuleError> {
    let rule = Forbidden::parse(payload)?;
    dispatch_scalar!(
        slot,
        v => rule.replace(v),
        other => Err(RuleError::unsupported(RuleKind::Forbidden, other.kind()))
    )
}
