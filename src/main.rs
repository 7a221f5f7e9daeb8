//! PTCG Deck Stats
//!
//! Summarizes official deck print texts into per-card statistics and prints
//! the core-card skeleton of a summarized sample.

use clap::{Parser, Subcommand};
use ptcg_deck_stats::{
    build_summary, read_deck_texts, read_summary, write_summary, NameCollator, Skeleton,
    DEFAULT_CORE_THRESHOLD,
};
use std::path::PathBuf;

const DEFAULT_SUMMARY_PATH: &str = "tmp/nidangir_5deck_summary.json";

/// Deck list statistics for Pokémon TCG sample decks
#[derive(Parser, Debug)]
#[command(name = "ptcg_deck_stats")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse deck print texts and write the aggregated summary JSON
    Summarize {
        /// JSON object mapping deck id to print text
        input: PathBuf,

        /// Where to write the summary
        #[arg(short, long, default_value = DEFAULT_SUMMARY_PATH)]
        output: PathBuf,
    },
    /// Print the core-card skeleton of a summary
    Skeleton {
        /// Summary JSON written by `summarize`
        summary: PathBuf,

        /// Minimum number of decks a card must appear in
        #[arg(long, default_value_t = DEFAULT_CORE_THRESHOLD)]
        threshold: usize,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() {
    // Set RUST_LOG to control the log level, e.g. RUST_LOG=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args.command) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Summarize { input, output } => {
            let texts = read_deck_texts(&input)?;
            let doc = build_summary(&texts)?;
            write_summary(&output, &doc)?;
            println!("wrote {}", output.display());
        }
        Command::Skeleton {
            summary,
            threshold,
            json,
        } => {
            let doc = read_summary(&summary)?;
            log::info!("Loaded summary of {} decks", doc.result.n);

            let skeleton = Skeleton::build(&doc.result, threshold, &NameCollator::japanese());
            if json {
                println!("{}", serde_json::to_string_pretty(&skeleton)?);
            } else {
                print!("{}", skeleton.to_text());
            }
        }
    }
    Ok(())
}
