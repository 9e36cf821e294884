use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use pairdup::config::Config;
use pairdup::core::compare::compare_files;
use pairdup::core::dhash::DHasher;
use pairdup::core::driver::{run_hash_pass, run_norm_pass};
use pairdup::logging;
use pairdup::report::{Format, write_matches};

#[derive(Parser, Debug)]
#[command(
    name = "pairdup",
    version,
    about = "Flag near-duplicate neighbouring photos"
)]
struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare neighbouring images by pixel differences of grayscale thumbnails
    Norm {
        /// Directory to scan
        #[arg(value_name = "DIR")]
        path: PathBuf,
        /// Walk files in name order instead of directory order
        #[arg(long)]
        sorted: bool,
        /// Write each pair's thumbnails and grayscale images into this directory
        #[arg(long, value_name = "DIR")]
        save_intermediates: Option<PathBuf>,
        /// Print matches as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Compare neighbouring images by difference hash
    Hash {
        /// Directory to scan
        #[arg(value_name = "DIR")]
        path: PathBuf,
        /// Print matches as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Show both distances for two image files
    Compare {
        #[arg(value_name = "FILE")]
        first: PathBuf,
        #[arg(value_name = "FILE")]
        second: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::default();

    match cli.command {
        Commands::Norm {
            path,
            sorted,
            save_intermediates,
            json,
        } => {
            config.scan.sorted = sorted;
            config.norm.intermediates = save_intermediates;

            if !json {
                println!("▶ Comparing adjacent images in: {}", path.display());
            }
            let report = run_norm_pass(&path, &config)?;
            write_matches(&mut io::stdout().lock(), &report, format(json))?;
        }

        Commands::Hash { path, json } => {
            if !json {
                println!("▶ Hashing images in: {}", path.display());
            }
            let report = run_hash_pass(&path, &config)?;
            write_matches(&mut io::stdout().lock(), &report, format(json))?;
        }

        Commands::Compare { first, second } => {
            let norm = compare_files(&first, &second, &config.norm).with_context(|| {
                format!("Failed to compare {:?} and {:?}", first, second)
            })?;

            let hasher = DHasher::new(config.hash.hash_size);
            let first_hash = hasher
                .hash_file(&first)
                .with_context(|| format!("Failed to hash {:?}", first))?;
            let second_hash = hasher
                .hash_file(&second)
                .with_context(|| format!("Failed to hash {:?}", second))?;
            let bits = first_hash.distance(&second_hash);

            println!(
                "Manhattan norm: {:.4} / per sample (similar below {})",
                norm.manhattan, config.norm.threshold
            );
            println!("Zero norm: {:.4} / per sample", norm.zero_norm);
            println!(
                "Hamming distance: {} of {} bits (similar below {})",
                bits,
                first_hash.as_bytes().len() * 8,
                config.hash.threshold
            );
        }
    }

    Ok(())
}

fn format(json: bool) -> Format {
    if json { Format::JsonLines } else { Format::Text }
}
