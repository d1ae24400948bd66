//! Prompting: the seam between the state machine and whoever collects input.

use super::events::GameEvent;
use super::token::Token;
use crate::crypto::CommitmentDigest;
use crate::error::{GameError, Result};
use crate::exchange::ExchangeMode;
use crate::game::{DieSet, Party, PickedDie, SessionId};
use tracing::warn;

/// What the player is being asked for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// Guess the computer's committed bit
    GuessFirstMover,
    /// Pick one of the listed dice (listed in pool order)
    PickDie { options: Vec<PickedDie>, first: bool },
    /// Add a number modulo 6 to the throw of `party`'s die
    AddToThrow { party: Party },
    /// Navigate the probability table
    Table { page: usize, pages: usize },
}

/// A single request for input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    /// Numeric options are `0..choices`
    pub choices: u32,
    /// The pending commitment, for prompts that feed an exchange
    pub digest: Option<CommitmentDigest>,
}

impl Prompt {
    /// Ask for the counterpart's contribution to an exchange on `party`'s behalf
    pub fn for_exchange(mode: ExchangeMode, party: Party, digest: CommitmentDigest) -> Self {
        let kind = match mode {
            ExchangeMode::FirstMove => PromptKind::GuessFirstMover,
            ExchangeMode::Throw => PromptKind::AddToThrow { party },
        };
        Self {
            kind,
            choices: mode.choices(),
            digest: Some(digest),
        }
    }

    pub fn pick_die(options: Vec<PickedDie>, first: bool) -> Self {
        Self {
            choices: options.len() as u32,
            kind: PromptKind::PickDie { options, first },
            digest: None,
        }
    }

    pub fn table(page: usize, pages: usize) -> Self {
        Self {
            kind: PromptKind::Table { page, pages },
            choices: 0,
            digest: None,
        }
    }
}

/// Source of raw input lines
pub trait TokenSource {
    /// Present `prompt` and return the next token, or `None` once input is closed
    fn next_token(&mut self, prompt: &Prompt) -> Result<Option<String>>;
}

/// How the help display was left
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HelpExit {
    /// Go back to the prompt that was interrupted
    Resume,
    /// The player asked to leave the game from the help screen
    Abort,
}

/// The display layer: renders events and serves help requests
pub trait GameDisplay {
    fn show(&mut self, event: &GameEvent);

    /// Surface a failure from an earlier `show`; checked before every read
    fn take_error(&mut self) -> Result<()> {
        Ok(())
    }

    /// Show the probability analysis for `dice`, reading navigation from `input`
    fn help(&mut self, dice: &DieSet, input: &mut dyn TokenSource) -> Result<HelpExit>;
}

/// The player's answer to a prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    Choice(u32),
    Abort,
}

/// Asks for input until a choice or an abort arrives.
///
/// Help requests and invalid tokens are served here without returning, so
/// whatever the caller holds pending stays untouched across them.
pub struct Prompter<'a> {
    input: &'a mut dyn TokenSource,
    display: &'a mut dyn GameDisplay,
    dice: &'a DieSet,
    session: SessionId,
}

impl<'a> Prompter<'a> {
    pub fn new(
        input: &'a mut dyn TokenSource,
        display: &'a mut dyn GameDisplay,
        dice: &'a DieSet,
        session: SessionId,
    ) -> Self {
        Self {
            input,
            display,
            dice,
            session,
        }
    }

    pub fn show(&mut self, event: GameEvent) {
        self.display.show(&event);
    }

    pub fn ask(&mut self, prompt: &Prompt) -> Result<Answer> {
        loop {
            self.display.take_error()?;
            let raw = self.input.next_token(prompt)?.ok_or(GameError::InputClosed)?;
            match Token::parse(&raw, prompt.choices) {
                Ok(Token::Choice(n)) => return Ok(Answer::Choice(n)),
                Ok(Token::Abort) => return Ok(Answer::Abort),
                Ok(Token::Help) => match self.display.help(self.dice, &mut *self.input)? {
                    HelpExit::Resume => continue,
                    HelpExit::Abort => return Ok(Answer::Abort),
                },
                Err(err) => {
                    warn!(session = %self.session, input = %err.input, "rejected input");
                    self.show(GameEvent::InputRejected {
                        session: self.session,
                        input: err.input.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}
