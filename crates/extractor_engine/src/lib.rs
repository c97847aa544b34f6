//! Extractor engine: action registry, chain compiler and evaluator.
mod chain;
mod context;
mod engine;
mod extract;
mod fetch;
mod find;
mod go;
mod registry;
mod store;
mod template;
mod types;

pub use chain::{ActionHandler, Binding, Chain, Invocation};
pub use context::{ExecutionContext, Limits};
pub use engine::Extractor;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use registry::{ActionRegistry, Verb};
pub use types::{
    ActionDescriptor, ExtractError, Extraction, FailureKind, FetchCause, FetchError,
    FetchMetadata, FetchOutput, RegistryError, ResultMap,
};
