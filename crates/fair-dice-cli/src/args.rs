//! Command-line configuration.

use clap::Parser;
use std::num::NonZeroUsize;

/// Non-transitive dice game with provably fair throws
#[derive(Parser, Debug)]
#[command(name = "fair-dice", version, about)]
pub struct Args {
    /// Dice as comma-separated face values, at least three
    /// (example: 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7)
    pub dice: Vec<String>,

    /// Rows per page of the probability table
    #[arg(long, env = "FAIR_DICE_ROWS_PER_PAGE", default_value = "3")]
    pub rows_per_page: NonZeroUsize,

    /// Print game events as JSON lines instead of prose
    #[arg(long)]
    pub json: bool,

    /// Stop after this many games instead of restarting forever
    #[arg(long, env = "FAIR_DICE_MAX_ROUNDS")]
    pub max_rounds: Option<usize>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
