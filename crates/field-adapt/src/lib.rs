//! Field Adapter: rule-driven normalization of tagged record values.
//!
//! Records carry per-field metadata such as `minimum:"5" maximum:"500"`.
//! [`Adapter::adapt`] walks a record, applies each field's rules at its
//! leaves, and returns the adapted record.
//!
//! ## Rules
//!
//! Applied at every leaf in this order:
//!
//! 1. **default**: fill a zero value (or an absent pointer) with the payload
//! 2. **minimum** / **maximum**: clamp numeric values
//! 3. **choice**: `a||b||c`; an unlisted, non-zero value becomes the first option
//! 4. **forbidden**: `a||b**sub`; a banned value becomes the substitute
//! 5. **pattern-strip**: delete every match of a regular expression from text
//!
//! Rules on a sequence, array or map field apply to each element. Rules on a
//! record-typed field are ignored.
//!
//! ## Aliasing
//!
//! The returned record never shares storage with the input for records,
//! arrays and boxed values. It **does** share storage in two places, and
//! writes through those are visible on the caller's input:
//!
//! - **Pointer targets.** The adapted pointee is written back into the
//!   original target, but only after the whole call has succeeded.
//! - **Sequence elements.** Elements are written back into the shared
//!   backing storage as they are adapted.
//!
//! Maps are always rebuilt, so the adapted map is never the input's map.
//!
//! ## Partial side effects
//!
//! Sequence element write-backs are not staged. If a later field fails,
//! elements already adapted stay adapted in the caller's input even though
//! the call returns an error. Boxed values inside those elements are the
//! exception: they are staged and only written on success.

pub mod adapter;
pub mod audit;
pub mod config;
pub mod error;
pub mod ledger;
pub mod rules;
pub mod tag;
pub mod value;
mod walker;

pub use adapter::{adapt, Adapter};
pub use audit::{MemorySink, Mutation, MutationSink, TracingSink};
pub use config::AdapterConfig;
pub use error::{AdaptError, ConfigError, ErrorKind, RuleError};
pub use ledger::{WriteBackLedger, WriteBackTarget};
pub use rules::{RuleKind, RuleSet};
pub use tag::Tag;
pub use value::{Field, Kind, Map, MapKey, Pointer, Record, Sequence, Value};
