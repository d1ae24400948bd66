//! Fair Dice
//!
//! Plays the non-transitive dice game against the computer in the terminal.
//! Every computer value is committed with an HMAC before the player answers.
//!
//! ## Usage
//!
//! ```bash
//! fair-dice 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7
//! fair-dice --json --max-rounds 1 1,2,3,4,5,6 1,2,3,4,5,6 1,2,3,4,5,6
//! ```

mod args;
mod console;
mod table;

use anyhow::Context;
use args::Args;
use clap::Parser;
use console::{ConsoleDisplay, ConsoleInput, OutputFormat};
use fair_dice_core::{DieSet, GameStateMachine, SecureEntropy};
use std::io;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let dice = DieSet::parse(&args.dice).context(
        "expected at least three dice of six comma-separated non-negative integers, \
         e.g. fair-dice 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7",
    )?;
    info!(dice = dice.len(), rows_per_page = args.rows_per_page.get(), "starting");

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut input = ConsoleInput::new(io::stdin().lock(), io::stdout(), format);
    let mut display = ConsoleDisplay::new(io::stdout(), format, args.rows_per_page);

    let mut machine = GameStateMachine::new(dice, SecureEntropy::new());
    let rounds = machine.run(&mut input, &mut display, args.max_rounds)?;

    info!(rounds, "input closed, exiting");
    Ok(())
}
