//! Per-severity finding thresholds.

use crate::severity::Severity;

/// Optional per-severity maxima. A counter reaching its maximum fails the
/// run; an absent maximum is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub max_errors: Option<usize>,
    pub max_warnings: Option<usize>,
    pub max_infos: Option<usize>,
}

/// Tallies findings by severity and latches failure once any configured
/// maximum is reached.
///
/// Counters only grow and the failed state is terminal: once latched, no
/// further analysis proceeds and nothing resets.
#[derive(Debug, Default)]
pub struct ThresholdCounters {
    errors: usize,
    warnings: usize,
    infos: usize,
    failed: bool,
}

impl ThresholdCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one finding, in production order. Weak warnings count against
    /// the warning maximum. Returns false once failure is latched.
    pub fn register(&mut self, severity: Severity, limits: &Thresholds) -> bool {
        if self.failed {
            return false;
        }
        let (count, max) = match severity {
            Severity::Error => {
                self.errors += 1;
                (self.errors, limits.max_errors)
            }
            Severity::Warning | Severity::WeakWarning => {
                self.warnings += 1;
                (self.warnings, limits.max_warnings)
            }
            Severity::Info => {
                self.infos += 1;
                (self.infos, limits.max_infos)
            }
        };
        if let Some(max) = max
            && count >= max
        {
            self.failed = true;
        }
        !self.failed
    }

    /// True until a maximum is reached.
    pub fn is_ok(&self) -> bool {
        !self.failed
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn infos(&self) -> usize {
        self.infos
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unbounded_counters_never_fail() {
        let mut counters = ThresholdCounters::new();
        let limits = Thresholds::default();

        for _ in 0..1000 {
            assert!(counters.register(Severity::Error, &limits));
        }
        assert!(counters.is_ok());
        assert_eq!(counters.errors(), 1000);
    }

    #[test]
    fn reaching_the_maximum_latches_failure() {
        let mut counters = ThresholdCounters::new();
        let limits = Thresholds {
            max_errors: Some(2),
            ..Thresholds::default()
        };

        assert!(counters.register(Severity::Error, &limits));
        assert!(!counters.register(Severity::Error, &limits));
        assert!(!counters.is_ok());
    }

    #[test]
    fn failure_is_terminal() {
        let mut counters = ThresholdCounters::new();
        let limits = Thresholds {
            max_infos: Some(1),
            ..Thresholds::default()
        };

        assert!(!counters.register(Severity::Info, &limits));
        // Registrations after the latch change nothing and keep reporting
        // failure, whatever their severity.
        assert!(!counters.register(Severity::Warning, &limits));
        assert!(!counters.is_ok());
        assert_eq!(counters.infos(), 1);
        assert_eq!(counters.warnings(), 0);
    }

    #[test]
    fn weak_warnings_count_as_warnings() {
        let mut counters = ThresholdCounters::new();
        let limits = Thresholds {
            max_warnings: Some(2),
            ..Thresholds::default()
        };

        assert!(counters.register(Severity::WeakWarning, &limits));
        assert!(!counters.register(Severity::Warning, &limits));
        assert_eq!(counters.warnings(), 2);
    }

    #[test]
    fn severities_count_independently() {
        let mut counters = ThresholdCounters::new();
        let limits = Thresholds {
            max_errors: Some(2),
            ..Thresholds::default()
        };

        assert!(counters.register(Severity::Warning, &limits));
        assert!(counters.register(Severity::Error, &limits));
        assert!(counters.register(Severity::Info, &limits));
        assert!(counters.is_ok());
        assert_eq!((counters.errors(), counters.warnings(), counters.infos()), (1, 1, 1));
    }
}
