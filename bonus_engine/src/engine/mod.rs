//! Filter Engine - decides which candidate bonuses apply to a roll.
//!
//! A definition applies when it is enabled and every entry of its filter
//! set passes. Entries that failed to parse reject their own definition
//! and nothing else, so one badly authored bonus never hides the others.

mod config;

pub use config::*;

use bonus_model::{BonusDefinition, BonusId, BonusPayload, Candidate, Filter, FilterError};
use tracing::{debug, instrument, trace, warn};

use crate::context::{EvaluationContext, Subject};
use crate::registry;

/// Runs filter sets against a subject.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    config: FilterConfig,
}

impl FilterEngine {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(FilterConfig::default())
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Keep the payloads of the candidates whose filters all pass, in
    /// candidate order.
    #[instrument(level = "debug", skip_all, fields(candidates = candidates.len()))]
    pub fn evaluate(
        &self,
        candidates: &[Candidate],
        subject: &Subject<'_>,
        context: &EvaluationContext<'_>,
    ) -> Vec<BonusPayload> {
        let payloads: Vec<BonusPayload> = candidates
            .iter()
            .filter(|(id, definition)| self.applies(id, definition, subject, context))
            .map(|(_, definition)| definition.bonuses.clone())
            .collect();

        debug!(applied = payloads.len(), "filtered bonuses");
        payloads
    }

    /// Check whether a single definition applies.
    pub fn applies(
        &self,
        id: &BonusId,
        definition: &BonusDefinition,
        subject: &Subject<'_>,
        context: &EvaluationContext<'_>,
    ) -> bool {
        if !definition.enabled {
            trace!(bonus = %id, "bonus is disabled");
            return false;
        }

        let mut applies = true;
        for entry in definition.filters.iter() {
            if !self.entry_passes(id, entry, subject, context) {
                applies = false;
                if self.config.short_circuit {
                    break;
                }
            }
        }
        applies
    }

    fn entry_passes(
        &self,
        id: &BonusId,
        entry: &Result<Filter, FilterError>,
        subject: &Subject<'_>,
        context: &EvaluationContext<'_>,
    ) -> bool {
        match entry {
            Ok(filter) => {
                let passed = registry::evaluate(filter, subject, context);
                if !passed {
                    trace!(bonus = %id, filter = %filter.kind(), "filter rejected bonus");
                }
                passed
            }
            Err(FilterError::UnknownKey(key))
                if self.config.unknown_filters == UnknownFilterPolicy::Ignore =>
            {
                debug!(bonus = %id, key = %key, "ignoring unknown filter");
                true
            }
            Err(error) => {
                warn!(bonus = %id, %error, "invalid filter, bonus rejected");
                false
            }
        }
    }
}
