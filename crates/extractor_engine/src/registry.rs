use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use engine_logging::engine_debug;

use crate::chain::Binding;
use crate::extract::ExtractAction;
use crate::find::FindAction;
use crate::go::GoAction;
use crate::store::StoreAction;
use crate::{ActionDescriptor, ActionHandler, Chain, ExtractError, Fetcher, RegistryError};

/// Built-in action verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Go,
    Extract,
    FindAll,
    FindFirst,
    Store,
}

impl Verb {
    pub const ALL: [Verb; 5] = [
        Verb::Go,
        Verb::Extract,
        Verb::FindAll,
        Verb::FindFirst,
        Verb::Store,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Verb::Go => "go",
            Verb::Extract => "extract",
            Verb::FindAll => "findAll",
            Verb::FindFirst => "findFirst",
            Verb::Store => "store",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verb| verb.name() == name)
    }

    fn builtin(self, fetcher: &Arc<dyn Fetcher>) -> Arc<dyn ActionHandler> {
        match self {
            Verb::Go => Arc::new(GoAction::new(fetcher.clone())),
            Verb::Extract => Arc::new(ExtractAction),
            Verb::FindAll => Arc::new(FindAction::all()),
            Verb::FindFirst => Arc::new(FindAction::first()),
            Verb::Store => Arc::new(StoreAction),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verb name → handler table used to compile chains.
///
/// Registration needs `&mut self`; compile against a registry that is no
/// longer being modified.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// An empty registry. Every verb must be registered before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with all of [`Verb::ALL`] bound; `go` fetches through `fetcher`.
    pub fn with_builtins(fetcher: Arc<dyn Fetcher>) -> Self {
        let handlers = Verb::ALL
            .into_iter()
            .map(|verb| (verb.name().to_string(), verb.builtin(&fetcher)))
            .collect();
        Self { handlers }
    }

    /// Binds `verb` to `handler`, returning the handler it replaced.
    pub fn register(
        &mut self,
        verb: impl Into<String>,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<Option<Arc<dyn ActionHandler>>, RegistryError> {
        let verb = verb.into();
        if verb.is_empty() {
            return Err(RegistryError::EmptyVerb);
        }
        Ok(self.handlers.insert(verb, handler))
    }

    pub fn contains(&self, verb: &str) -> bool {
        self.handlers.contains_key(verb)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Resolves every descriptor in order. The first unregistered verb aborts
    /// compilation; patterns are not validated here.
    pub fn compile(&self, descriptors: &[ActionDescriptor]) -> Result<Chain, ExtractError> {
        let bindings = descriptors
            .iter()
            .map(|descriptor| {
                self.handlers
                    .get(&descriptor.verb)
                    .map(|handler| {
                        Binding::new(
                            descriptor.verb.clone(),
                            descriptor.param.clone(),
                            handler.clone(),
                        )
                    })
                    .ok_or_else(|| ExtractError::UnknownAction(descriptor.verb.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        engine_debug!("compiled chain of {} actions", bindings.len());
        Ok(Chain::new(bindings))
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut verbs: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        verbs.sort_unstable();
        f.debug_struct("ActionRegistry")
            .field("verbs", &verbs)
            .finish()
    }
}
