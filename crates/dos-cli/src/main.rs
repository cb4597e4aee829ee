//! CLI frontend for the degree-of-success roll engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use dos_mechanics::RollModifiers;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "dos",
    about = "Percentile degree-of-success dice roller",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log each resolution to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll d100 against a target value
    Roll {
        /// Target value to meet or undercut
        #[arg(short, long, allow_negative_numbers = true)]
        target: i32,

        /// Advantage sources
        #[arg(short, long, default_value = "0")]
        advantage: u32,

        /// Disadvantage sources
        #[arg(short, long, default_value = "0")]
        disadvantage: u32,

        /// Luck added to the margin
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        luck: i32,

        /// Flat success-level modifier
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        modifier: i32,

        /// JSON roll configuration (thresholds, advantage cap)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Roll an effect formula such as 2d6+3
    Effect {
        /// Dice formula
        formula: String,

        /// Double the dice for a critical success
        #[arg(short, long)]
        critical: bool,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a JSON array of roll requests
    Batch {
        /// File containing the requests
        file: PathBuf,

        /// Base RNG seed (request i uses seed + i)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the outcomes as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dos_mechanics=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Roll {
            target,
            advantage,
            disadvantage,
            luck,
            modifier,
            config,
            seed,
            json,
        } => commands::roll::run(
            target,
            &RollModifiers {
                advantage,
                disadvantage,
                luck,
                success_level_modifier: modifier,
            },
            config.as_deref(),
            seed,
            json,
        ),
        Commands::Effect {
            formula,
            critical,
            seed,
            json,
        } => commands::effect::run(&formula, critical, seed, json),
        Commands::Batch { file, seed, json } => commands::batch::run(&file, seed, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
