//! Root CLI structure for skelanim

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::sample::SampleArgs;

#[derive(Parser)]
#[command(name = "skelanim")]
#[command(about = "Inspect and sample skeletal animation assets", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display the skeleton and clips of an animation asset
    Info {
        /// Path to the JSON asset
        file: PathBuf,

        /// List every bone with its parent and depth
        #[arg(short, long)]
        bones: bool,
    },

    /// Play a clip up to a point in time and print the resulting matrices
    Sample(SampleArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
