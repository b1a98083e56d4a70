//! krm-remote-resources - generate resources from remote YAML streams

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use krm_core::document::write_stream;
use krm_core::logging::init_tracing;
use krm_remote_resources::{RemoteConfig, RemoteResourceGenerator, UrlFetcher};
use std::io::{self, Write};

/// Fetch resources from remote URLs and write them to stdout
#[derive(Parser, Debug)]
#[command(name = "krm-remote-resources")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,

    /// Path to the plugin config file
    config: Utf8PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = RemoteConfig::load(&cli.config)
        .with_context(|| format!("Failed to load plugin config {}", cli.config))?;

    let fetcher = UrlFetcher::new()?;
    let documents = RemoteResourceGenerator::new(&config, &fetcher)
        .generate()
        .await?;

    let mut stdout = io::stdout().lock();
    write_stream(&mut stdout, &documents).context("Failed to write resources")?;
    stdout.flush()?;
    Ok(())
}
