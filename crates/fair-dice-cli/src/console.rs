//! Terminal front end: prompt menus on the way in, prose or JSON on the way out.

use crate::table::{ProbabilityTable, TableCommand};
use colored::Colorize;
use fair_dice_core::error::{GameError, Result};
use fair_dice_core::exchange::{ExchangeMode, ExchangeResult};
use fair_dice_core::game::{DieSet, Party, ProbabilityMatrix, RoundOutcome, RoundSummary};
use fair_dice_core::protocol::{GameDisplay, GameEvent, HelpExit, Prompt, PromptKind, TokenSource};
use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use tracing::{debug, warn};

const RULE: &str = "==============================================================";

/// How events are written
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// One JSON object per line
    Json,
}

/// Reads one line per prompt from `reader`, writing the menu to `out` first.
pub struct ConsoleInput<R, W> {
    reader: R,
    out: W,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, out: W, format: OutputFormat) -> Self {
        Self { reader, out, format }
    }

    fn write_menu(&mut self, prompt: &Prompt) -> io::Result<()> {
        match &prompt.kind {
            PromptKind::GuessFirstMover => writeln!(self.out, "Try to guess my selection:")?,
            PromptKind::PickDie { first: true, .. } => {
                writeln!(self.out, "{RULE}")?;
                writeln!(self.out, "You make the first move, choose your dice:")?;
            }
            PromptKind::PickDie { first: false, .. } => writeln!(self.out, "Choose your dice:")?,
            PromptKind::AddToThrow { .. } => writeln!(self.out, "Add your number modulo 6.")?,
            PromptKind::Table { .. } => {
                write!(self.out, "Choose an option: ")?;
                return self.out.flush();
            }
        }

        match &prompt.kind {
            PromptKind::PickDie { options, .. } => {
                for (position, option) in options.iter().enumerate() {
                    writeln!(self.out, "{} - {}", position, option.die)?;
                }
            }
            _ => {
                for choice in 0..prompt.choices {
                    writeln!(self.out, "{choice} - {choice}")?;
                }
            }
        }
        writeln!(self.out, "X - exit")?;
        writeln!(self.out, "? - help")?;
        write!(self.out, "Your selection: ")?;
        self.out.flush()
    }
}

impl<R: BufRead, W: Write> TokenSource for ConsoleInput<R, W> {
    fn next_token(&mut self, prompt: &Prompt) -> Result<Option<String>> {
        if self.format == OutputFormat::Text {
            self.write_menu(prompt)?;
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            debug!("input closed");
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        debug!(input = %line, "read token");
        Ok(Some(line))
    }
}

/// Writes game events and serves the probability table.
pub struct ConsoleDisplay<W> {
    out: W,
    format: OutputFormat,
    rows_per_page: NonZeroUsize,
    table: Option<ProbabilityTable>,
    first_mover: Option<Party>,
    /// First write failure, held until the next read
    failed: Option<io::Error>,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, format: OutputFormat, rows_per_page: NonZeroUsize) -> Self {
        Self {
            out,
            format,
            rows_per_page,
            table: None,
            first_mover: None,
            failed: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &GameEvent) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            serde_json::to_writer(&mut self.out, event)?;
            writeln!(self.out)?;
            return self.out.flush();
        }

        match event {
            GameEvent::SessionStarted { .. } => {
                self.first_mover = None;
                writeln!(self.out, "LETS PLAY A DICE GAME!")?;
                writeln!(self.out)?;
                writeln!(self.out, "Lets determine who makes the first move.")?;
            }
            GameEvent::CommitmentPublished {
                mode, party, min, max, digest, ..
            } => {
                if *mode == ExchangeMode::Throw {
                    writeln!(self.out, "{RULE}")?;
                    match party {
                        Party::User => writeln!(self.out, "Its time for your throw.")?,
                        Party::Computer => writeln!(self.out, "Its time for my throw.")?,
                    }
                }
                writeln!(self.out, "I selected a random value in the range {min}..{max}")?;
                writeln!(self.out, "(HMAC={digest})")?;
            }
            GameEvent::FirstMoverDecided {
                exchange, first_mover, ..
            } => {
                self.first_mover = Some(*first_mover);
                writeln!(self.out, "Your selection: {}", exchange.contribution)?;
                writeln!(self.out, "My selection: {} (KEY={}).", exchange.generated, exchange.key)?;
            }
            GameEvent::DieSelected { party, die, .. } => match party {
                Party::User => writeln!(self.out, "You choose the [{}] dice.", die.die)?,
                Party::Computer if self.first_mover == Some(Party::Computer) => {
                    writeln!(self.out, "{RULE}")?;
                    writeln!(self.out, "I make the first move and choose the [{}] dice.", die.die)?;
                }
                Party::Computer => writeln!(self.out, "I choose the [{}] dice.", die.die)?,
            },
            GameEvent::ThrowResolved {
                party, exchange, face, ..
            } => {
                self.write_reveal(exchange)?;
                match party {
                    Party::User => writeln!(self.out, "Your throw is {face}.")?,
                    Party::Computer => writeln!(self.out, "My throw is {face}.")?,
                }
            }
            GameEvent::RoundFinished { summary, .. } => self.write_outcome(summary)?,
            GameEvent::InputRejected { .. } => {
                writeln!(self.out, "Invalid input. Please choose a valid option.")?;
            }
            GameEvent::SessionAborted { .. } => {
                writeln!(self.out, "Game over. Starting a new game.")?;
                writeln!(self.out)?;
            }
            GameEvent::SessionFailed { reason, .. } => {
                writeln!(self.out, "{}", format!("Something went wrong: {reason}").red())?;
                writeln!(self.out, "Starting a new game.")?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }

    fn write_reveal(&mut self, exchange: &ExchangeResult) -> io::Result<()> {
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "Your selection: {}", exchange.contribution)?;
        writeln!(self.out, "My number is {} (KEY={})", exchange.generated, exchange.key)?;
        writeln!(
            self.out,
            "The result is {} + {} = {} (mod 6).",
            exchange.generated, exchange.contribution, exchange.combined
        )
    }

    fn write_outcome(&mut self, summary: &RoundSummary) -> io::Result<()> {
        let user = summary.user_throw.face;
        let computer = summary.computer_throw.face;
        let line = match summary.outcome {
            RoundOutcome::UserWins => format!("You win ({user} > {computer})!").green(),
            RoundOutcome::ComputerWins => format!("You lose ({user} < {computer})!").red(),
            RoundOutcome::Tie => format!("Its a Tie ({user} = {computer})!").yellow(),
        };
        writeln!(self.out, "{line}")?;
        writeln!(self.out)
    }

    fn write_probabilities(&mut self, dice: &DieSet) -> io::Result<()> {
        let matrix = ProbabilityMatrix::new(dice);
        let rows: Vec<Vec<f64>> = matrix.rows().map(|(_, row)| row.to_vec()).collect();
        let value = serde_json::json!({
            "event": "probabilities",
            "dice": dice,
            "matrix": rows,
        });
        serde_json::to_writer(&mut self.out, &value)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> GameDisplay for ConsoleDisplay<W> {
    fn show(&mut self, event: &GameEvent) {
        if self.failed.is_some() {
            return;
        }
        if let Err(err) = self.write_event(event) {
            warn!(session = %event.session(), %err, "failed to write event");
            self.failed = Some(err);
        }
    }

    fn take_error(&mut self) -> Result<()> {
        match self.failed.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn help(&mut self, dice: &DieSet, input: &mut dyn TokenSource) -> Result<HelpExit> {
        self.take_error()?;
        if self.format == OutputFormat::Json {
            self.write_probabilities(dice)?;
            return Ok(HelpExit::Resume);
        }

        let rows_per_page = self.rows_per_page;
        let table = self
            .table
            .get_or_insert_with(|| ProbabilityTable::new(dice, rows_per_page));
        write!(self.out, "{}", table.render())?;

        loop {
            let prompt = Prompt::table(table.page(), table.pages());
            let line = input.next_token(&prompt)?.ok_or(GameError::InputClosed)?;
            match TableCommand::parse(&line) {
                TableCommand::Close => return Ok(HelpExit::Resume),
                TableCommand::Abort => return Ok(HelpExit::Abort),
                command => match table.navigate(command) {
                    Ok(()) => write!(self.out, "{}", table.render())?,
                    Err(message) => writeln!(self.out, "{message}")?,
                },
            }
        }
    }
}
