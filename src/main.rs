use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(name = "racecal")]
#[command(about = "Generate an iCalendar feed from race event records")]
struct Cli {
    /// Directory containing race record YAML files
    #[arg(long, default_value = "events")]
    events_dir: PathBuf,

    /// Path of the .ics file to write
    #[arg(long, default_value = "output/marathons.ics")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.events_dir.is_dir() {
        anyhow::bail!(
            "Events directory '{}' does not exist.\n\n\
            Point --events-dir at a directory of race record YAML files.",
            cli.events_dir.display()
        );
    }

    // Nothing is written until the whole document has been assembled
    let (document, summary) = racecal_core::generate(&cli.events_dir)?;

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&cli.output, document.as_bytes())
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    for path in &summary.templates_skipped {
        println!("{}", format!("Skipping template: {}", path.display()).dimmed());
    }

    println!("{}", format!("Wrote {}", cli.output.display()).green());
    println!(
        "  {} files, {} records, {} race entries, {} registration entries",
        summary.files_read, summary.records, summary.race_entries, summary.registration_entries
    );

    Ok(())
}
