use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};

use crate::chain::Invocation;
use crate::template::Placeholders;
use crate::{ActionHandler, ExecutionContext, ExtractError, Fetcher};

const HTTP_SCHEME: &str = "http";

/// `go`: fetches a URL built from the parameter and continues with the body.
pub(crate) struct GoAction {
    fetcher: Arc<dyn Fetcher>,
}

impl GoAction {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

impl ActionHandler for GoAction {
    fn handle(
        &self,
        ctx: &mut ExecutionContext<'_>,
        call: Invocation<'_>,
    ) -> Result<(), ExtractError> {
        let arg = String::from_utf8_lossy(call.payload);
        let url = target_url(ctx.base_url(), call.param, &arg, call.selector, ctx.search());
        engine_info!("GET {}", url);

        let output = self.fetcher.fetch(&url).map_err(|err| {
            engine_warn!("HTTP error for {}: {}", url, err);
            ExtractError::Http(err)
        })?;
        engine_info!(
            "fetched {} bytes from {} ({} redirects)",
            output.metadata.byte_len,
            output.metadata.final_url,
            output.metadata.redirect_count
        );
        ctx.record_url(url);
        ctx.advance(call.next, call.selector, &output.bytes)
    }
}

/// Expands `template` and prefixes `base_url` unless the result is already
/// absolute.
pub(crate) fn target_url(
    base_url: &str,
    template: &str,
    arg: &str,
    selector: &str,
    search: &str,
) -> String {
    let expanded = Placeholders {
        arg: Some(arg),
        selector,
        search,
    }
    .expand(template);
    if arg.starts_with(HTTP_SCHEME) || expanded.starts_with(HTTP_SCHEME) {
        expanded
    } else {
        format!("{base_url}{expanded}")
    }
}
