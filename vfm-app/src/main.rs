//! VFM (Vertical Feature Mask) Application
//!
//! Main entry point for decoding raw CALIPSO Feature_Classification_Flags dumps.

mod input;
mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use vfm_core::FlagWord;
use vfm_kernel::{decode_with, expand_with, FeatureName, Parallelism};

use report::{inspect_word, parse_word, FeatureReport};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand a raw dump and summarize the decoded features as JSON
    Summary {
        /// Path to the raw little-endian u16 dump
        #[arg(short, long)]
        input: PathBuf,

        /// Feature to decode (repeatable, default: all)
        #[arg(short, long = "feature")]
        features: Vec<FeatureName>,

        /// The dump is stored as 5515 x N instead of N x 5515
        #[arg(long)]
        transposed: bool,

        /// Disable parallel expansion and decoding
        #[arg(long)]
        sequential: bool,

        /// Write the JSON report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode every feature of a single flag word
    Inspect {
        /// Flag word as decimal, 0x hex or 0b binary
        #[arg(value_parser = parse_word)]
        word: FlagWord,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match args.command {
        Command::Summary {
            input,
            features,
            transposed,
            sequential,
            output,
        } => {
            let parallelism = if sequential {
                Parallelism::Sequential
            } else {
                Parallelism::Parallel
            };
            let features = if features.is_empty() {
                FeatureName::ALL.to_vec()
            } else {
                features
            };

            info!("Loading VFM rows from: {}", input.display());
            let rows = input::read_rows(&input, transposed)?;
            let block = expand_with(rows.view(), parallelism)?;
            info!("Size of VFM block: {:?}", block.dim());

            let reports: Vec<FeatureReport> = features
                .iter()
                .map(|&feature| FeatureReport::from(&decode_with(block.view(), feature, parallelism)))
                .collect();
            let json = serde_json::to_string_pretty(&reports)?;

            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Report written to: {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Inspect { word } => {
            println!("Flag word {word:#06x} ({word:#018b})");
            for field in inspect_word(word) {
                println!("{:<16} {:>3}  {}", field.feature, field.value, field.label);
            }
        }
    }

    Ok(())
}
