//! Paginated win-probability table shown on `?`.

use colored::Colorize;
use fair_dice_core::game::{DieSet, ProbabilityMatrix};
use std::num::NonZeroUsize;

const COLUMN_WIDTH: usize = 25;

const HEADER: &str = "
PROBABILITY OF WIN FOR EACH DIE - YOU CAN OPEN THIS TABLE AT ANY POINT OF THE GAME.

Find a die in the ROWS and read its chance of rolling strictly higher
than each die in the COLUMNS.
";

/// A command typed while the table is open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableCommand {
    Next,
    Previous,
    Goto(usize),
    /// Leave the table and the game
    Abort,
    /// Back to the interrupted prompt (empty line)
    Close,
    Invalid,
}

impl TableCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "" => TableCommand::Close,
            "n" => TableCommand::Next,
            "p" => TableCommand::Previous,
            "x" => TableCommand::Abort,
            other => other
                .strip_prefix("c ")
                .and_then(|page| page.trim().parse().ok())
                .map_or(TableCommand::Invalid, TableCommand::Goto),
        }
    }
}

/// The table plus the page currently shown (1-based)
pub struct ProbabilityTable {
    matrix: ProbabilityMatrix,
    rows_per_page: usize,
    page: usize,
}

impl ProbabilityTable {
    pub fn new(dice: &DieSet, rows_per_page: NonZeroUsize) -> Self {
        Self {
            matrix: ProbabilityMatrix::new(dice),
            rows_per_page: rows_per_page.get(),
            page: 1,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn pages(&self) -> usize {
        self.matrix.dice().len().div_ceil(self.rows_per_page).max(1)
    }

    /// Move between pages; `Err` carries the message to show instead
    pub fn navigate(&mut self, command: TableCommand) -> Result<(), &'static str> {
        match command {
            TableCommand::Next if self.page < self.pages() => self.page += 1,
            TableCommand::Next => return Err("You are already on the last page."),
            TableCommand::Previous if self.page > 1 => self.page -= 1,
            TableCommand::Previous => return Err("You are already on the first page."),
            TableCommand::Goto(page) if (1..=self.pages()).contains(&page) => self.page = page,
            TableCommand::Goto(_) => return Err("Invalid page number."),
            TableCommand::Abort | TableCommand::Close | TableCommand::Invalid => {
                return Err("Invalid command.")
            }
        }
        Ok(())
    }

    /// The current page with its heading and menu
    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);

        let dice = self.matrix.dice();
        let rule = "-".repeat((dice.len() + 1) * (COLUMN_WIDTH + 1));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&cell("Die"));
        for die in dice {
            out.push_str(&cell(&die.to_string()));
        }
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');

        let start = (self.page - 1) * self.rows_per_page;
        for (die, probabilities) in self.matrix.rows().skip(start).take(self.rows_per_page) {
            out.push_str(&cell(&die.to_string()).blue().to_string());
            for p in probabilities {
                out.push_str(&cell(&format!("{:.4} ({:.2}%)", p, p * 100.0)));
            }
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');

        out.push_str(&format!("Page {} of {}\n\n", self.page, self.pages()));
        out.push_str("n - Next page\n");
        out.push_str("p - Previous page\n");
        out.push_str("c [number] - Go to page number\n");
        out.push_str("x - Exit game\n");
        out.push_str("ENTER - Back to the game\n");
        out
    }
}

fn cell(text: &str) -> String {
    format!("{:<width$} ", text, width = COLUMN_WIDTH)
}
