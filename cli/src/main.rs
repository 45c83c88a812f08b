mod container;

use anyhow::{Context, Result};
use clap::Parser;
use smd_oxide::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smd2obj")]
#[command(about = "Converts an SMD mesh, plain or CMP-compressed, into a Wavefront OBJ file")]
struct Cli {
    /// Input SMD file path
    input: PathBuf,

    /// Output OBJ file path
    output: PathBuf,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout stays free.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("Converting {:?} -> {:?}", cli.input, cli.output);

    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open {:?}", cli.input))?;
    let stream = container::open_smd(BufReader::new(file))
        .with_context(|| format!("Failed to read the container of {:?}", cli.input))?;

    let mesh = decode(&mut StreamReader::new(stream), decode::Config::default())
        .with_context(|| format!("Failed to decode {:?}", cli.input))?;

    save_obj(&mesh, &cli.output, obj::Config::default())
        .with_context(|| format!("Failed to write {:?}", cli.output))?;

    tracing::info!("Conversion complete!");
    Ok(())
}
