use std::sync::atomic::{AtomicU64, Ordering};

use engine_logging::{engine_info, engine_warn, RunScope};

use crate::{
    ActionDescriptor, ActionRegistry, Chain, ExecutionContext, ExtractError, Extraction, Limits,
};

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// A compiled chain plus the limits each run is held to.
#[derive(Debug, Clone)]
pub struct Extractor {
    chain: Chain,
    limits: Limits,
}

impl Extractor {
    pub fn new(chain: Chain, limits: Limits) -> Self {
        Self { chain, limits }
    }

    /// Compiles `actions` against `registry` with unlimited depth and iterations.
    pub fn compile(
        registry: &ActionRegistry,
        actions: &[ActionDescriptor],
    ) -> Result<Self, ExtractError> {
        Ok(Self::new(registry.compile(actions)?, Limits::default()))
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Runs the chain once, starting at the first action with an empty
    /// selector and payload.
    pub fn run(&self, base_url: &str, search: &str) -> Extraction {
        let _scope = RunScope::enter(NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed));
        engine_info!(
            "starting run: {} actions, base_url={}, search={:?}",
            self.chain.len(),
            base_url,
            search
        );

        let mut ctx = ExecutionContext::new(&self.chain, base_url, search, self.limits);
        let outcome = ctx.advance(0, "", &[]);
        match &outcome {
            Ok(()) => engine_info!("run finished with {} results", ctx.results().len()),
            Err(err) => engine_warn!(
                "run aborted with {} results kept: {}",
                ctx.results().len(),
                err
            ),
        }
        ctx.finish(outcome)
    }
}
