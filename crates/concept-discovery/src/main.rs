//! Concept discovery binary.

use clap::Parser;
use concept_discovery::cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let summary = Cli::parse().run()?;

    tracing::info!(
        "Found codes for {} concepts, results in {}",
        summary.results.len(),
        summary.output_dir.display()
    );
    Ok(())
}
