use std::sync::Arc;

use tracing::{debug, warn};

use crate::audit::{MutationSink, TracingSink};
use crate::config::AdapterConfig;
use crate::error::AdaptError;
use crate::ledger::WriteBackTarget;
use crate::rules::RuleSet;
use crate::value::Value;
use crate::walker::Walker;

/// Applies field rules to records.
///
/// An adapter holds no per-call state; each [`adapt`](Adapter::adapt) call
/// owns its own ledger and pattern cache, so one adapter can serve many
/// threads.
#[derive(Clone)]
pub struct Adapter {
    config: AdapterConfig,
    sink: Option<Arc<dyn MutationSink>>,
}

impl Adapter {
    /// Adapter with the default configuration, reporting to [`TracingSink`].
    pub fn new() -> Self {
        Self::with_config(AdapterConfig::default())
    }

    /// Adapter with `config`. Mutations go to [`TracingSink`] when
    /// `config.audit` is set, nowhere otherwise.
    pub fn with_config(config: AdapterConfig) -> Self {
        let sink: Option<Arc<dyn MutationSink>> = if config.audit {
            Some(Arc::new(TracingSink))
        } else {
            None
        };
        Self { config, sink }
    }

    /// Replace the mutation sink.
    pub fn with_sink(mut self, sink: Arc<dyn MutationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn without_sink(mut self) -> Self {
        self.sink = None;
        self
    }

    /// Adapt a record, a pointer to a record, or a box holding a record.
    ///
    /// Returns the adapted record. When `input` is a pointer, its target is
    /// also replaced by the adapted record on success. On error nothing is
    /// returned and no deferred write-back is applied.
    pub fn adapt(&self, input: &Value) -> Result<Value, AdaptError> {
        self.run(input).inspect_err(|err| {
            warn!(
                error = %err,
                path = err.path().unwrap_or_default(),
                "adaptation aborted"
            );
        })
    }

    fn run(&self, input: &Value) -> Result<Value, AdaptError> {
        let mut walker = Walker::new(&self.config, self.sink.as_deref());

        let (mut root, root_entry) = match input {
            Value::Record(_) => (input.clone(), None),
            Value::Pointer(pointer) => {
                let target = pointer
                    .target()
                    .ok_or(AdaptError::NotARecord(input.kind()))?;
                let pointee = target.read().clone();
                if !matches!(pointee, Value::Record(_)) {
                    return Err(AdaptError::NotARecord(input.kind()));
                }
                let entry = walker
                    .ledger_mut()
                    .reserve(WriteBackTarget::Pointee(target.clone()));
                (pointee, Some(entry))
            }
            Value::Any(Some(inner)) if matches!(**inner, Value::Record(_)) => {
                ((**inner).clone(), None)
            }
            other => return Err(AdaptError::NotARecord(other.kind())),
        };

        let record_name = root.as_record().map(|r| r.name().to_string());
        debug!(record = record_name.as_deref().unwrap_or_default(), "adapting record");

        walker.walk(&mut root, &RuleSet::new(), "", 0)?;

        let mut ledger = walker.into_ledger();
        if let Some(entry) = root_entry {
            ledger.fill(entry, root.clone());
        }
        let written = ledger.commit();
        debug!(
            record = record_name.as_deref().unwrap_or_default(),
            write_backs = written,
            "adaptation committed"
        );

        Ok(root)
    }
}

impl Default for Adapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapt `input` with a default [`Adapter`].
pub fn adapt(input: &Value) -> Result<Value, AdaptError> {
    Adapter::new().adapt(input)
}
