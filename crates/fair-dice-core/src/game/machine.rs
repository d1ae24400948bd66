//! The game state machine.
//!
//! Each call to [`GameStateMachine::step`] performs one transition. The only
//! place a transition waits is a prompt, and a prompt only returns with a
//! choice or an abort, so help requests and bad input never reach here.

use super::dice::{DiePool, DieSet, PickedDie};
use super::outcome::{Party, RoundOutcome};
use super::session::{DiceSelection, Ending, GameSession, Phase, RoundSummary, SessionId, Throw};
use crate::error::{GameError, Result};
use crate::exchange::{ExchangeMode, ExchangeResult, FairExchange};
use crate::protocol::{Answer, GameDisplay, GameEvent, Prompt, Prompter, TokenSource};
use crate::random::Entropy;
use tracing::{error, info};

/// Runs sessions of the game for one set of dice.
pub struct GameStateMachine<E> {
    dice: DieSet,
    entropy: E,
    session: GameSession,
}

impl<E: Entropy> GameStateMachine<E> {
    pub fn new(dice: DieSet, entropy: E) -> Self {
        Self {
            dice,
            entropy,
            session: GameSession::new(),
        }
    }

    pub fn dice(&self) -> &DieSet {
        &self.dice
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    /// Discard the current session and start over from the first phase
    pub fn restart(&mut self) {
        let previous = self.session.id();
        self.session = GameSession::new();
        info!(%previous, session = %self.session.id(), "session restarted");
    }

    /// Perform one transition and return the phase reached.
    ///
    /// A terminal session stays terminal until [`restart`](Self::restart).
    pub fn step(
        &mut self,
        input: &mut dyn TokenSource,
        display: &mut dyn GameDisplay,
    ) -> Result<&Phase> {
        if self.session.phase().is_terminal() {
            return Ok(self.session.phase());
        }
        let session = self.session.id();
        let mut prompter = Prompter::new(input, display, &self.dice, session);
        let mut turn = Turn {
            dice: &self.dice,
            entropy: &mut self.entropy,
            prompter: &mut prompter,
            session,
        };
        let next = match self.session.phase().clone() {
            Phase::DetermineFirstMover => turn.determine_first_mover()?,
            Phase::UserPicksDieFirst { first_move } => turn.user_picks_first(first_move)?,
            Phase::ComputerPicksDieFirst { first_move } => {
                turn.computer_picks_first(first_move)?
            }
            Phase::UserThrow {
                dice,
                computer_throw,
            } => turn.throw(Party::User, dice, computer_throw)?,
            Phase::ComputerThrow { dice, user_throw } => {
                turn.throw(Party::Computer, dice, user_throw)?
            }
            Phase::ResolveOutcome {
                dice,
                user_throw,
                computer_throw,
            } => turn.resolve(dice, user_throw, computer_throw),
            terminal @ Phase::Terminal(_) => terminal,
        };
        if let Phase::Terminal(Ending::Aborted) = next {
            info!(%session, from = self.session.phase().name(), "session aborted");
            prompter.show(GameEvent::SessionAborted { session });
        } else {
            info!(
                %session,
                from = self.session.phase().name(),
                to = next.name(),
                "phase transition"
            );
        }
        self.session.advance(next);
        Ok(self.session.phase())
    }

    /// Step until the session ends
    pub fn play_round(
        &mut self,
        input: &mut dyn TokenSource,
        display: &mut dyn GameDisplay,
    ) -> Result<Ending> {
        loop {
            if let Phase::Terminal(ending) = self.step(input, display)? {
                return Ok(ending.clone());
            }
        }
    }

    /// Play sessions back to back, restarting after every ending, until
    /// input closes or `max_rounds` sessions have ended.
    ///
    /// Session-fatal errors are reported and followed by a fresh session.
    /// Returns the number of sessions that ended.
    pub fn run(
        &mut self,
        input: &mut dyn TokenSource,
        display: &mut dyn GameDisplay,
        max_rounds: Option<usize>,
    ) -> Result<usize> {
        let mut rounds = 0;
        while max_rounds.map_or(true, |max| rounds < max) {
            match self.play_round(input, display) {
                Ok(_) => rounds += 1,
                Err(GameError::InputClosed) => break,
                Err(err) if err.is_session_fatal() => {
                    error!(session = %self.session.id(), %err, "session failed");
                    display.show(&GameEvent::SessionFailed {
                        session: self.session.id(),
                        reason: err.to_string(),
                    });
                    rounds += 1;
                }
                Err(err) => return Err(err),
            }
            self.restart();
        }
        Ok(rounds)
    }
}

/// Borrowed context for a single transition
struct Turn<'t, 'p, E> {
    dice: &'t DieSet,
    entropy: &'t mut E,
    prompter: &'t mut Prompter<'p>,
    session: SessionId,
}

impl<E: Entropy> Turn<'_, '_, E> {
    fn determine_first_mover(&mut self) -> Result<Phase> {
        self.prompter.show(GameEvent::SessionStarted {
            session: self.session,
            dice: self.dice.iter().copied().collect(),
        });

        let mode = ExchangeMode::FirstMove;
        let pending = FairExchange::open(&mut *self.entropy, mode, Party::Computer)?;
        let digest = *pending.digest();
        self.prompter.show(GameEvent::CommitmentPublished {
            session: self.session,
            mode,
            party: Party::User,
            min: mode.min(),
            max: mode.max(),
            digest,
        });

        let prompt = Prompt::for_exchange(mode, Party::User, digest);
        let guess = match self.prompter.ask(&prompt)? {
            Answer::Choice(guess) => guess,
            Answer::Abort => return Ok(Phase::Terminal(Ending::Aborted)),
        };
        let first_move = pending.settle(guess)?;
        let first_mover = if first_move.counterpart_wins() {
            Party::User
        } else {
            Party::Computer
        };
        self.prompter.show(GameEvent::FirstMoverDecided {
            session: self.session,
            exchange: first_move.clone(),
            first_mover,
        });

        Ok(match first_mover {
            Party::User => Phase::UserPicksDieFirst { first_move },
            Party::Computer => Phase::ComputerPicksDieFirst { first_move },
        })
    }

    fn user_picks_first(&mut self, first_move: ExchangeResult) -> Result<Phase> {
        let mut pool = self.dice.pool();
        let Some(user) = self.user_picks(&mut pool, true)? else {
            return Ok(Phase::Terminal(Ending::Aborted));
        };
        let computer = self.computer_picks(&mut pool)?;
        let dice = DiceSelection {
            first_mover: Party::User,
            first_move,
            user,
            computer,
        };
        Ok(Phase::UserThrow {
            dice,
            computer_throw: None,
        })
    }

    fn computer_picks_first(&mut self, first_move: ExchangeResult) -> Result<Phase> {
        let mut pool = self.dice.pool();
        let computer = self.computer_picks(&mut pool)?;
        let Some(user) = self.user_picks(&mut pool, false)? else {
            return Ok(Phase::Terminal(Ending::Aborted));
        };
        let dice = DiceSelection {
            first_mover: Party::Computer,
            first_move,
            user,
            computer,
        };
        Ok(Phase::ComputerThrow {
            dice,
            user_throw: None,
        })
    }

    /// `None` when the player aborted
    fn user_picks(&mut self, pool: &mut DiePool, first: bool) -> Result<Option<PickedDie>> {
        let position = match self.prompter.ask(&Prompt::pick_die(pool.options(), first))? {
            Answer::Choice(position) => position as usize,
            Answer::Abort => return Ok(None),
        };
        let picked = take(pool, position)?;
        self.announce_pick(Party::User, picked);
        Ok(Some(picked))
    }

    /// The computer picks uniformly from whatever is left
    fn computer_picks(&mut self, pool: &mut DiePool) -> Result<PickedDie> {
        let position = self.entropy.pick(pool.len());
        let picked = take(pool, position)?;
        self.announce_pick(Party::Computer, picked);
        Ok(picked)
    }

    fn announce_pick(&mut self, party: Party, die: PickedDie) {
        self.prompter.show(GameEvent::DieSelected {
            session: self.session,
            party,
            die,
        });
    }

    /// Throw `party`'s die; `earlier` is the other party's throw if it came first
    fn throw(
        &mut self,
        party: Party,
        dice: DiceSelection,
        earlier: Option<Throw>,
    ) -> Result<Phase> {
        let die = dice.die_of(party).die;
        let mode = ExchangeMode::Throw;
        let pending = FairExchange::open(&mut *self.entropy, mode, Party::Computer)?;
        let digest = *pending.digest();
        self.prompter.show(GameEvent::CommitmentPublished {
            session: self.session,
            mode,
            party,
            min: mode.min(),
            max: mode.max(),
            digest,
        });

        let contribution = match self.prompter.ask(&Prompt::for_exchange(mode, party, digest))? {
            Answer::Choice(value) => value,
            Answer::Abort => return Ok(Phase::Terminal(Ending::Aborted)),
        };
        let exchange = pending.settle(contribution)?;
        let face = exchange.face(&die);
        self.prompter.show(GameEvent::ThrowResolved {
            session: self.session,
            party,
            die,
            exchange: exchange.clone(),
            face,
        });
        let this = Throw { exchange, face };

        Ok(match (party, earlier) {
            (Party::User, None) => Phase::ComputerThrow {
                dice,
                user_throw: Some(this),
            },
            (Party::Computer, None) => Phase::UserThrow {
                dice,
                computer_throw: Some(this),
            },
            (Party::User, Some(computer_throw)) => Phase::ResolveOutcome {
                dice,
                user_throw: this,
                computer_throw,
            },
            (Party::Computer, Some(user_throw)) => Phase::ResolveOutcome {
                dice,
                user_throw,
                computer_throw: this,
            },
        })
    }

    fn resolve(&mut self, dice: DiceSelection, user_throw: Throw, computer_throw: Throw) -> Phase {
        let outcome = RoundOutcome::judge(user_throw.face, computer_throw.face);
        info!(
            session = %self.session,
            user = user_throw.face,
            computer = computer_throw.face,
            %outcome,
            "round finished"
        );
        let summary = RoundSummary {
            first_mover: dice.first_mover,
            first_move: dice.first_move,
            user_die: dice.user,
            computer_die: dice.computer,
            user_throw,
            computer_throw,
            outcome,
        };
        self.prompter.show(GameEvent::RoundFinished {
            session: self.session,
            summary: summary.clone(),
        });
        Phase::Terminal(Ending::Finished(Box::new(summary)))
    }
}

fn take(pool: &mut DiePool, position: usize) -> Result<PickedDie> {
    let available = pool.len();
    pool.take(position)
        .ok_or(GameError::InvalidSelection { position, available })
}
