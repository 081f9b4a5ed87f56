use std::fmt;
use std::sync::Arc;

use crate::error::FilterError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (a matching record failed to decode).
    Error,
    /// Critical error (the target type cannot be filtered at all).
    Critical,
}

impl FilterSeverity {
    /// Severity reported for a given error.
    pub fn for_error(error: &FilterError) -> Self {
        match error {
            FilterError::Schema { .. } => Self::Critical,
            FilterError::Conversion(_) | FilterError::Decode { .. } => Self::Error,
        }
    }
}

/// Context about a filtering call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterContext {
    /// Name of the target type records are decoded into.
    pub target: &'static str,
}

/// Counters reported on a successful filtering call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterStats {
    /// Map-shaped records that were evaluated.
    pub candidates: usize,
    /// Records skipped because their value is not a map.
    pub skipped: usize,
    /// Records that satisfied every predicate and were decoded.
    pub matched: usize,
    /// Predicates evaluated against each candidate.
    pub predicates: usize,
    /// Filter leaves dropped because they did not resolve against the target schema.
    pub dropped: usize,
}

/// Observer interface for filtering outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait FilterObserver: Send + Sync {
    /// Called when filtering succeeds.
    fn on_success(&self, _ctx: &FilterContext, _stats: FilterStats) {}

    /// Called for every filter leaf whose internal path resolved to no external path.
    fn on_predicate_dropped(&self, _ctx: &FilterContext, _internal_path: &str) {}

    /// Called when filtering fails.
    fn on_failure(&self, _ctx: &FilterContext, _severity: FilterSeverity, _error: &FilterError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &FilterContext, severity: FilterSeverity, error: &FilterError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn FilterObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn FilterObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl FilterObserver for CompositeObserver {
    fn on_success(&self, ctx: &FilterContext, stats: FilterStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_predicate_dropped(&self, ctx: &FilterContext, internal_path: &str) {
        for o in &self.observers {
            o.on_predicate_dropped(ctx, internal_path);
        }
    }

    fn on_failure(&self, ctx: &FilterContext, severity: FilterSeverity, error: &FilterError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &FilterContext, severity: FilterSeverity, error: &FilterError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs filtering events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl FilterObserver for StdErrObserver {
    fn on_success(&self, ctx: &FilterContext, stats: FilterStats) {
        eprintln!(
            "[filter][ok] target={} candidates={} skipped={} matched={} predicates={} dropped={}",
            ctx.target, stats.candidates, stats.skipped, stats.matched, stats.predicates, stats.dropped
        );
    }

    fn on_predicate_dropped(&self, ctx: &FilterContext, internal_path: &str) {
        eprintln!(
            "[filter][drop] target={} path={} (no external name)",
            ctx.target, internal_path
        );
    }

    fn on_failure(&self, ctx: &FilterContext, severity: FilterSeverity, error: &FilterError) {
        eprintln!("[filter][{:?}] target={} err={}", severity, ctx.target, error);
    }

    fn on_alert(&self, ctx: &FilterContext, severity: FilterSeverity, error: &FilterError) {
        eprintln!("[ALERT][filter][{:?}] target={} err={}", severity, ctx.target, error);
    }
}
