//! krm-env-placeholder - replace `${env:NAME}` placeholders in resources
//!
//! Reads a YAML resource stream on stdin and writes the transformed stream
//! to stdout.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use krm_core::document::write_stream;
use krm_core::logging::init_tracing;
use krm_core::placeholder::Environment;
use krm_env_placeholder::{PlaceholderConfig, PlaceholderTransformer};
use std::io::{self, Read, Write};

/// Replace ${env:NAME} placeholders with environment variable values
#[derive(Parser, Debug)]
#[command(name = "krm-env-placeholder")]
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

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = PlaceholderConfig::load(&cli.config)
        .with_context(|| format!("Failed to load plugin config {}", cli.config))?;
    let env = Environment::capture();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read resources from stdin")?;

    let transformer = PlaceholderTransformer::new(&config, &env);
    let documents = transformer.transform_stream(&input)?;

    let mut stdout = io::stdout().lock();
    write_stream(&mut stdout, &documents).context("Failed to write resources")?;
    stdout.flush()?;
    Ok(())
}
