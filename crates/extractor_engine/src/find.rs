use engine_logging::{engine_debug, engine_warn};

use crate::chain::Invocation;
use crate::template::{compile_pattern, Placeholders};
use crate::{ActionHandler, ExecutionContext, ExtractError};

/// `findAll` / `findFirst`: continues with the payload unchanged when it
/// passes a filter. `findFirst` stops the run after its first pass.
pub(crate) struct FindAction {
    stop_on_match: bool,
}

impl FindAction {
    pub fn all() -> Self {
        Self {
            stop_on_match: false,
        }
    }

    pub fn first() -> Self {
        Self {
            stop_on_match: true,
        }
    }

    fn matches(&self, ctx: &ExecutionContext<'_>, call: &Invocation<'_>) -> bool {
        if call.param.is_empty() {
            return !call.payload.is_empty();
        }
        let pattern = Placeholders {
            arg: None,
            selector: call.selector,
            search: ctx.search(),
        }
        .expand(call.param);
        match compile_pattern(&pattern) {
            Ok(re) => re.is_match(call.payload),
            // A broken filter is a filter nothing passes.
            Err(err) => {
                engine_warn!("ignoring invalid filter pattern `{}`: {}", pattern, err);
                false
            }
        }
    }
}

impl ActionHandler for FindAction {
    fn handle(
        &self,
        ctx: &mut ExecutionContext<'_>,
        call: Invocation<'_>,
    ) -> Result<(), ExtractError> {
        if !self.matches(ctx, &call) {
            return Ok(());
        }
        let outcome = ctx.advance(call.next, call.selector, call.payload);
        if self.stop_on_match {
            engine_debug!("first match for selector {:?}, stopping", call.selector);
            ctx.stop();
        }
        outcome
    }
}
