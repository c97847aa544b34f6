use std::fmt;
use std::sync::Arc;

use crate::{ExecutionContext, ExtractError};

/// Arguments of one handler invocation.
///
/// `next` is the chain position the handler continues with. A handler that
/// fans out passes the same `next` to every [`ExecutionContext::advance`]
/// call, so each branch resumes at the identical point.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub param: &'a str,
    pub selector: &'a str,
    pub payload: &'a [u8],
    pub next: usize,
}

/// Behaviour bound to an action verb.
pub trait ActionHandler: Send + Sync {
    fn handle(
        &self,
        ctx: &mut ExecutionContext<'_>,
        call: Invocation<'_>,
    ) -> Result<(), ExtractError>;
}

#[derive(Clone)]
pub struct Binding {
    verb: String,
    param: String,
    handler: Arc<dyn ActionHandler>,
}

impl Binding {
    pub(crate) fn new(verb: String, param: String, handler: Arc<dyn ActionHandler>) -> Self {
        Self {
            verb,
            param,
            handler,
        }
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub(crate) fn handler(&self) -> &dyn ActionHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("verb", &self.verb)
            .field("param", &self.param)
            .finish_non_exhaustive()
    }
}

/// Compiled, immutable sequence of bindings. Cheap to share between runs.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    bindings: Vec<Binding>,
}

impl Chain {
    pub(crate) fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Binding> {
        self.bindings.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }
}
