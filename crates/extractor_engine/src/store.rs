use engine_logging::engine_debug;

use crate::chain::Invocation;
use crate::{ActionHandler, ExecutionContext, ExtractError};

/// `store`: saves the payload under `param ++ selector` and continues.
pub(crate) struct StoreAction;

impl ActionHandler for StoreAction {
    fn handle(
        &self,
        ctx: &mut ExecutionContext<'_>,
        call: Invocation<'_>,
    ) -> Result<(), ExtractError> {
        let key = format!("{}{}", call.param, call.selector);
        engine_debug!("store {:?} ({} bytes)", key, call.payload.len());
        ctx.store(key, call.payload.to_vec());
        ctx.advance(call.next, call.selector, call.payload)
    }
}
