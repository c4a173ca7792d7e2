use anyhow::{Context, Result};
use clap::Parser;
use regalg::{Config, batch};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Evaluate grammar test cases and write the resulting DFAs
#[derive(Parser)]
#[clap(version)]
struct Args {
    /// Test cases to read
    #[clap(default_value = "input.txt")]
    input: PathBuf,
    /// Where to write the rendered automata
    #[clap(default_value = "output.txt")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input file `{}`", args.input.display()))?;
    let output = batch::process(&input, &Config::default())
        .with_context(|| format!("failed to process `{}`", args.input.display()))?;
    fs::write(&args.output, output)
        .with_context(|| format!("failed to write output file `{}`", args.output.display()))?;

    info!(output = %args.output.display(), "processing result saved");
    Ok(())
}
