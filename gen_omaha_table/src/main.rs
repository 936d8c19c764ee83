use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use table_io::TableIO;

use gen_omaha_table::{build_table, verify_against_reference};

/// Generates the 7/8/9-card Omaha hand-ranks table.
#[derive(Debug, Parser)]
struct Cli {
    /// Output path for the generated table.
    output: PathBuf,
    /// A 7-card reference table; when given, every 7-, 8- and 9-card
    /// combination is cross-checked after the build.
    reference: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let hand_ranks = build_table();
    let mut file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    file.write_table(&hand_ranks)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!(
        "wrote {} entries to {}",
        hand_ranks.len(),
        cli.output.display()
    );

    if let Some(reference) = &cli.reference {
        let hr_old = File::open(reference)
            .with_context(|| format!("opening {}", reference.display()))?
            .read_table()
            .with_context(|| format!("reading {}", reference.display()))?;
        match verify_against_reference(&hand_ranks, &hr_old) {
            Ok(()) => info!("all combinations verified"),
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
