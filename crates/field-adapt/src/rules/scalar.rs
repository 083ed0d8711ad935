//! Typed view over scalar slots, so evaluators are written once per rule
//! instead of once per kind.

use std::fmt::Display;

use crate::error::RuleError;
use crate::value::Kind;

/// A scalar slot type a rule payload can be parsed into.
pub(crate) trait Scalar: Clone + PartialEq + Display {
    const KIND: Kind;

    /// Parse a payload literal at this slot's width. Out-of-range literals
    /// are rejected rather than truncated or rounded to infinity.
    fn parse_literal(literal: &str) -> Result<Self, RuleError>;

    fn is_zero(&self) -> bool;
}

/// Scalars with an ordering: the targets of `minimum` and `maximum`.
pub(crate) trait Number: Scalar + PartialOrd {}

fn parse_error(literal: &str, kind: Kind, reason: impl Display) -> RuleError {
    RuleError::Parse {
        literal: literal.to_string(),
        kind,
        reason: reason.to_string(),
    }
}

/// `inf` or `infinity` in any case, optionally signed.
fn names_infinity(literal: &str) -> bool {
    let unsigned = literal.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! impl_integer {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: Kind = Kind::$kind;

                fn parse_literal(literal: &str) -> Result<Self, RuleError> {
                    literal
                        .parse::<$ty>()
                        .map_err(|err| parse_error(literal, Self::KIND, err))
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }

            impl Number for $ty {}
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: Kind = Kind::$kind;

                fn parse_literal(literal: &str) -> Result<Self, RuleError> {
                    let value = literal
                        .parse::<$ty>()
                        .map_err(|err| parse_error(literal, Self::KIND, err))?;
                    if value.is_infinite() && !names_infinity(literal) {
                        return Err(parse_error(literal, Self::KIND, "value out of range"));
                    }
                    Ok(value)
                }

                // -0.0 is a set value, not an absent one.
                fn is_zero(&self) -> bool {
                    self.to_bits() == 0
                }
            }

            impl Number for $ty {}
        )*
    };
}

impl_integer! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

impl_float! {
    f32 => F32,
    f64 => F64,
}

impl Scalar for String {
    const KIND: Kind = Kind::Text;

    fn parse_literal(literal: &str) -> Result<Self, RuleError> {
        Ok(literal.to_string())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

/// Run `$body` with `$v` bound to the typed numeric payload of `$slot`, or
/// `$fallback` with `$other` bound to the slot for every other kind.
macro_rules! dispatch_number {
    ($slot:expr, $v:ident => $body:expr, $other:ident => $fallback:expr) => {
        match $slot {
            $crate::value::Value::I8($v) => $body,
            $crate::value::Value::I16($v) => $body,
            $crate::value::Value::I32($v) => $body,
            $crate::value::Value::I64($v) => $body,
            $crate::value::Value::U8($v) => $body,
            $crate::value::Value::U16($v) => $body,
            $crate::value::Value::U32($v) => $body,
            $crate::value::Value::U64($v) => $body,
            $crate::value::Value::F32($v) => $body,
            $crate::value::Value::F64($v) => $body,
            $other => $fallback,
        }
    };
}

/// Like [`dispatch_number!`], with text included.
macro_rules! dispatch_scalar {
    ($slot:expr, $v:ident => $body:expr, $other:ident => $fallback:expr) => {
        match $slot {
            $crate::value::Value::Text($v) => $body,
            other => $crate::rules::scalar::dispatch_number!(other, $v => $body, $other => $fallback),
        }
    };
}

pub(crate) use dispatch_number;
pub(crate) use dispatch_scalar;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn integers_parse_at_slot_width() {
        assert_eq!(u8::parse_literal("255").unwrap(), 255);
        let err = u8::parse_literal("256").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("u8"));
        assert!(i16::parse_literal("-1").is_ok());
        assert!(u16::parse_literal("-1").is_err());
    }

    #[test]
    fn literals_are_not_trimmed() {
        assert!(i32::parse_literal(" 5").is_err());
        assert!(f64::parse_literal("5 ").is_err());
    }

    #[test]
    fn floats_out_of_range_are_rejected() {
        let err = f32::parse_literal("1e40").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("f32"));
        assert_eq!(f64::parse_literal("1e40").unwrap(), 1e40);

        let err = f64::parse_literal("1e400").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(f64::parse_literal("-1e400").is_err());
    }

    #[test]
    fn spelled_infinity_and_nan_parse() {
        assert_eq!(f32::parse_literal("inf").unwrap(), f32::INFINITY);
        assert_eq!(f64::parse_literal("-Infinity").unwrap(), f64::NEG_INFINITY);
        assert!(f64::parse_literal("NaN").unwrap().is_nan());
    }

    #[test]
    fn negative_zero_is_not_zero() {
        assert!(0.0f64.is_zero());
        assert!(!(-0.0f64).is_zero());
        assert!(!(-0.0f32).is_zero());
    }

    #[test]
    fn text_accepts_any_literal() {
        assert_eq!(String::parse_literal("x||y").unwrap(), "x||y");
        assert!(String::new().is_zero());
    }
}
