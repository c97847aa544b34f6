#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use extractor_engine::{
    ActionDescriptor, ActionHandler, ActionRegistry, ExecutionContext, ExtractError, FailureKind,
    FetchError, FetchMetadata, FetchOutput, Fetcher, Invocation,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// In-memory fetcher: known URLs return their body, anything else is a 404.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Vec<u8>>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.as_bytes().to_vec());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        let body = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::new(FailureKind::HttpStatus(404), "404 Not Found"))?;
        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                redirect_count: 0,
                content_type: Some("text/html".to_string()),
                byte_len: body.len() as u64,
            },
            bytes: body,
        })
    }
}

/// Pass-through action that remembers every (selector, payload) it sees.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<(String, String)>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, payload)| payload).collect()
    }
}

impl ActionHandler for Recorder {
    fn handle(
        &self,
        ctx: &mut ExecutionContext<'_>,
        call: Invocation<'_>,
    ) -> Result<(), ExtractError> {
        self.calls.lock().unwrap().push((
            call.selector.to_string(),
            String::from_utf8_lossy(call.payload).into_owned(),
        ));
        ctx.advance(call.next, call.selector, call.payload)
    }
}

pub fn registry_with(fetcher: Arc<StaticFetcher>) -> ActionRegistry {
    ActionRegistry::with_builtins(fetcher)
}

pub fn actions(list: &[(&str, &str)]) -> Vec<ActionDescriptor> {
    list.iter()
        .map(|(verb, param)| ActionDescriptor::new(*verb, *param))
        .collect()
}
