mod config;
mod logging;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_info;
use extractor_engine::{ActionRegistry, Extractor, ReqwestFetcher};
use log::LevelFilter;

use crate::config::Config;
use crate::logging::LogDestination;

#[derive(Parser)]
#[command(
    name = "chain-extract",
    about = "Fetch pages and extract labelled fragments with a chain of regex actions",
    version
)]
struct Cli {
    /// Path to the JSON action configuration.
    config: PathBuf,

    /// Override the search term from the configuration.
    #[arg(long)]
    search: Option<String>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "terminal")]
    log_destination: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(cli.log_destination, level);

    let config = Config::load(&cli.config)?;
    let fetcher =
        ReqwestFetcher::new(config.fetch_settings()).context("failed to build HTTP client")?;
    let registry = ActionRegistry::with_builtins(Arc::new(fetcher));
    let extractor = Extractor::compile(&registry, &config.actions)
        .context("failed to compile actions")?
        .with_limits(config.limits());
    engine_info!(
        "loaded {} actions from {}",
        extractor.chain().len(),
        cli.config.display()
    );

    let search = cli.search.as_deref().unwrap_or(&config.search);
    let extraction = extractor.run(&config.base_url, search);

    for line in report::format_results(&extraction.results) {
        println!("{line}");
    }
    if let Some(url) = &extraction.last_url {
        println!("last url: {url}");
    }
    extraction.outcome.context("extraction failed")?;
    Ok(())
}
