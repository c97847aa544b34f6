use engine_logging::{engine_trace, engine_warn};

use crate::chain::Invocation;
use crate::{Chain, ExtractError, Extraction, ResultMap};

/// Resource limits for one run. Zero means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting of handler invocations.
    pub depth: u64,
    /// Maximum downstream invocations per `extract` call.
    pub iterations: u64,
}

/// Mutable state of a single run over a [`Chain`].
pub struct ExecutionContext<'a> {
    chain: &'a Chain,
    base_url: &'a str,
    search: &'a str,
    limits: Limits,
    depth: u64,
    stopped: bool,
    results: ResultMap,
    last_url: Option<String>,
}

impl<'a> ExecutionContext<'a> {
    pub(crate) fn new(
        chain: &'a Chain,
        base_url: &'a str,
        search: &'a str,
        limits: Limits,
    ) -> Self {
        Self {
            chain,
            base_url,
            search,
            limits,
            depth: 0,
            stopped: false,
            results: ResultMap::new(),
            last_url: None,
        }
    }

    pub fn base_url(&self) -> &'a str {
        self.base_url
    }

    pub fn search(&self) -> &'a str {
        self.search
    }

    pub fn depth(&self) -> u64 {
        self.depth
    }

    pub fn iteration_limit(&self) -> u64 {
        self.limits.iterations
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Halts further traversal. Calls already in progress run to completion.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Records `value` under `key`, replacing any earlier value.
    pub fn store(&mut self, key: String, value: Vec<u8>) {
        self.results.insert(key, value);
    }

    pub fn results(&self) -> &ResultMap {
        &self.results
    }

    pub(crate) fn record_url(&mut self, url: String) {
        self.last_url = Some(url);
    }

    /// Invokes the binding at chain position `next` with `selector` and
    /// `payload`. Past the end of the chain this is a successful no-op.
    ///
    /// Any handler error stops the run and is returned unchanged.
    pub fn advance(
        &mut self,
        next: usize,
        selector: &str,
        payload: &[u8],
    ) -> Result<(), ExtractError> {
        if self.stopped {
            return Ok(());
        }
        let chain = self.chain;
        let Some(binding) = chain.get(next) else {
            return Ok(());
        };
        // Only an invocation that would nest deeper than the limit fails.
        let limit = self.limits.depth;
        if limit != 0 && self.depth >= limit {
            engine_warn!("depth limit {} reached before action {}", limit, next);
            self.stopped = true;
            return Err(ExtractError::DepthLimitExceeded { limit });
        }

        engine_trace!(
            "action {} `{}` selector={:?} payload_len={}",
            next,
            binding.verb(),
            selector,
            payload.len()
        );
        self.depth += 1;
        let outcome = binding.handler().handle(
            self,
            Invocation {
                param: binding.param(),
                selector,
                payload,
                next: next + 1,
            },
        );
        self.depth -= 1;

        if outcome.is_err() {
            self.stopped = true;
        }
        outcome
    }

    pub(crate) fn finish(self, outcome: Result<(), ExtractError>) -> Extraction {
        Extraction {
            results: self.results,
            last_url: self.last_url,
            outcome,
        }
    }
}
