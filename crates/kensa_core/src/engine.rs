//! The engine entry point: one run from configuration to success flag.

use tracing::info;

use crate::access::AccessArbiter;
use crate::analysis::run_analysis;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::fixer::apply_fixes;
use crate::registry::{ProfileStore, ToolRegistry, resolve_tools};
use crate::report::{Renderer, report};
use crate::source::FileProvider;

/// Orchestrates one diagnostic run.
///
/// Owns the configuration and the access arbiter for the run; both live as
/// plain values created by the caller, never behind hidden statics.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    access: AccessArbiter,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            access: AccessArbiter::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves tools, analyzes, reports, and applies fixes.
    ///
    /// Returns true iff no configured threshold was exceeded — the only
    /// status a caller needs to decide whether to fail a build. Everything
    /// recoverable is absorbed into the logs; only configuration and
    /// profile errors propagate.
    pub fn run(
        &self,
        registry: &dyn ToolRegistry,
        profiles: &dyn ProfileStore,
        provider: &dyn FileProvider,
        renderers: &mut [Box<dyn Renderer>],
    ) -> Result<bool, EngineError> {
        let tools = resolve_tools(&self.config, registry, profiles)?;
        let outcome = run_analysis(&tools, provider, &self.config.thresholds(), &self.access);

        report(&outcome.results, renderers, self.config.quiet);
        apply_fixes(&outcome.results, &self.config, provider, &self.access);

        if outcome.success {
            info!("analysis finished without exceeding thresholds");
        } else {
            info!("analysis failed: a finding threshold was exceeded");
        }
        Ok(outcome.success)
    }
}
