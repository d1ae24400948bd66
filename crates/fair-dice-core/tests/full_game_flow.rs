//! Integration tests for the full game flow.
//!
//! These tests drive complete sessions through the state machine with
//! scripted entropy and scripted input.

use fair_dice_core::{
    crypto::{verify_reveal, CommitmentDigest, SecretKey},
    error::Result,
    game::{Ending, GameStateMachine, Party, Phase, RoundOutcome},
    protocol::{GameDisplay, GameEvent, HelpExit, Prompt, PromptKind, TokenSource},
    DieSet, ExchangeMode, ScriptedEntropy,
};
use std::collections::VecDeque;

/// Input lines fed one per prompt, recording every prompt shown
struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<Prompt>,
}

impl ScriptedInput {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            prompts: Vec::new(),
        }
    }

    fn throw_prompts(&self) -> Vec<&Prompt> {
        self.prompts
            .iter()
            .filter(|p| matches!(p.kind, PromptKind::AddToThrow { .. }))
            .collect()
    }
}

impl TokenSource for ScriptedInput {
    fn next_token(&mut self, prompt: &Prompt) -> Result<Option<String>> {
        self.prompts.push(prompt.clone());
        Ok(self.lines.pop_front())
    }
}

/// Records events; the help screen reads one line: empty resumes, `x` aborts
#[derive(Default)]
struct RecordingDisplay {
    events: Vec<GameEvent>,
    help_requests: usize,
}

impl RecordingDisplay {
    fn summary(&self) -> &fair_dice_core::game::RoundSummary {
        self.events
            .iter()
            .find_map(|e| match e {
                GameEvent::RoundFinished { summary, .. } => Some(summary),
                _ => None,
            })
            .expect("round finished")
    }

    fn sessions_started(&self) -> Vec<fair_dice_core::SessionId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::SessionStarted { session, .. } => Some(*session),
                _ => None,
            })
            .collect()
    }
}

impl GameDisplay for RecordingDisplay {
    fn show(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }

    fn help(&mut self, dice: &DieSet, input: &mut dyn TokenSource) -> Result<HelpExit> {
        self.help_requests += 1;
        let line = input.next_token(&Prompt::table(1, dice.len().div_ceil(3)))?;
        Ok(match line.as_deref().map(str::trim) {
            Some("x") => HelpExit::Abort,
            _ => HelpExit::Resume,
        })
    }
}

fn non_transitive_dice() -> DieSet {
    DieSet::parse(&["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap()
}

#[test]
fn test_user_moves_first_and_wins() {
    // Words: first-move bit 1, user throw r=3, computer throw r=0.
    // Picks: computer takes position 0 of the remaining pool (die #1).
    let entropy = ScriptedEntropy::new([1, 3, 0]).with_picks([0]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["1", "0", "2", "1"]);
    let mut display = RecordingDisplay::default();

    let ending = machine.play_round(&mut input, &mut display).unwrap();
    let Ending::Finished(summary) = ending else {
        panic!("round did not finish");
    };

    assert_eq!(summary.first_mover, Party::User);
    assert_eq!(summary.user_die.index, 0);
    assert_eq!(summary.computer_die.index, 1);

    // 3 + 2 = 5 (mod 6) -> face index 5 of 2,2,4,4,9,9 -> 9
    assert_eq!(summary.user_throw.exchange.generated, 3);
    assert_eq!(summary.user_throw.exchange.contribution, 2);
    assert_eq!(summary.user_throw.exchange.combined, 5);
    assert_eq!(summary.user_throw.face, 9);

    // 0 + 1 = 1 -> face index 1 of 1,1,6,6,8,8 -> 1
    assert_eq!(summary.computer_throw.face, 1);
    assert_eq!(summary.outcome, RoundOutcome::UserWins);

    let exchanges = [
        &summary.first_move,
        &summary.user_throw.exchange,
        &summary.computer_throw.exchange,
    ];
    for exchange in exchanges {
        assert!(exchange.verify().is_ok());
    }
    assert_eq!(machine.entropy().remaining(), (0, 0));
    assert_eq!(machine.entropy().keys_drawn(), 3);
    assert_eq!(display.summary(), summary.as_ref());

    let session = machine.session();
    assert_eq!(session.first_mover(), Some(Party::User));
    assert_eq!(session.selected_die(Party::Computer).map(|d| d.index), Some(1));
    assert_eq!(session.throw_value(Party::User), Some(9));
    assert_eq!(session.throw_value(Party::Computer), Some(1));
}

#[test]
fn test_computer_moves_first_and_throws_first() {
    // Words: first-move bit 0 (user guesses 1), computer throw r=4, user throw r=2.
    let entropy = ScriptedEntropy::new([0, 4, 2]).with_picks([2]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["1", "0", "5", "2"]);
    let mut display = RecordingDisplay::default();

    let ending = machine.play_round(&mut input, &mut display).unwrap();
    let Ending::Finished(summary) = ending else {
        panic!("round did not finish");
    };

    assert_eq!(summary.first_mover, Party::Computer);
    assert_eq!(summary.computer_die.index, 2);
    assert_eq!(summary.user_die.index, 0);

    let order: Vec<Party> = input
        .throw_prompts()
        .iter()
        .map(|p| match p.kind {
            PromptKind::AddToThrow { party } => party,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(order, vec![Party::Computer, Party::User]);

    // (4 + 5) mod 6 = 3 -> 3,3,5,5,7,7[3] = 5; (2 + 2) mod 6 = 4 -> 2,2,4,4,9,9[4] = 9
    assert_eq!(summary.computer_throw.face, 5);
    assert_eq!(summary.user_throw.face, 9);
    assert_eq!(summary.outcome, RoundOutcome::UserWins);
}

#[test]
fn test_second_mover_pool_excludes_first_pick() {
    let entropy = ScriptedEntropy::new([0, 0, 0]).with_picks([1]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["1", "1", "0", "0"]);
    let mut display = RecordingDisplay::default();

    machine.play_round(&mut input, &mut display).unwrap();

    let options = input
        .prompts
        .iter()
        .find_map(|p| match &p.kind {
            PromptKind::PickDie { options, first: false } => Some(options.clone()),
            _ => None,
        })
        .unwrap();
    assert!(options.iter().all(|picked| picked.index != 1));
    // Position 1 of the remaining pool is die #2.
    assert_eq!(display.summary().user_die.index, 2);
}

#[test]
fn test_help_query_keeps_pending_commitment() {
    let entropy = ScriptedEntropy::new([1, 3, 0]).with_picks([0]);
    let key_for_user_throw = SecretKey::from_bytes([2; 32]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    // During the user's throw: help, leave help with an empty line, a bad token, then 2.
    let mut input = ScriptedInput::new(&["1", "0", "?", "", "7", "2", "1"]);
    let mut display = RecordingDisplay::default();

    let ending = machine.play_round(&mut input, &mut display).unwrap();
    assert!(matches!(ending, Ending::Finished(_)));
    assert_eq!(display.help_requests, 1);

    let throw_prompts = input.throw_prompts();
    // Three asks for the user's throw, one for the computer's.
    assert_eq!(throw_prompts.len(), 4);
    let digest = throw_prompts[0].digest.unwrap();
    assert_eq!(throw_prompts[1].digest, Some(digest));
    assert_eq!(throw_prompts[2].digest, Some(digest));

    // Same key and value as committed before the query, and no extra draws.
    assert_eq!(digest, CommitmentDigest::compute(&key_for_user_throw, 3));
    let summary = display.summary();
    assert_eq!(summary.user_throw.exchange.key, key_for_user_throw);
    assert_eq!(summary.user_throw.exchange.digest, digest);
    assert_eq!(summary.user_throw.face, 9);
    assert_eq!(machine.entropy().keys_drawn(), 3);
    assert_eq!(machine.entropy().words_drawn(), 3);

    let rejected: Vec<&str> = display
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::InputRejected { input, .. } => Some(input.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(rejected, vec!["7"]);
}

#[test]
fn test_abort_from_help_screen_ends_session() {
    let entropy = ScriptedEntropy::new([1]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["?", "x"]);
    let mut display = RecordingDisplay::default();

    let ending = machine.play_round(&mut input, &mut display).unwrap();
    assert_eq!(ending, Ending::Aborted);
    assert_eq!(machine.session().phase(), &Phase::Terminal(Ending::Aborted));
}

#[test]
fn test_abort_at_throw_prompt_discards_pending_commitment() {
    // User moves first, both dice are chosen, then `X` at the user's throw.
    let entropy = ScriptedEntropy::new([1, 3]).with_picks([0]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["1", "0", "X"]);
    let mut display = RecordingDisplay::default();

    let ending = machine.play_round(&mut input, &mut display).unwrap();
    assert_eq!(ending, Ending::Aborted);
    assert_eq!(input.throw_prompts().len(), 1);
    assert!(matches!(display.events.last(), Some(GameEvent::SessionAborted { .. })));
    assert!(!display
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ThrowResolved { .. })));

    // The throw commitment was drawn, nothing after it.
    let entropy = machine.entropy();
    assert_eq!((entropy.words_drawn(), entropy.keys_drawn(), entropy.picks_drawn()), (2, 2, 1));
    assert_eq!(entropy.remaining(), (0, 0));
    assert_eq!(machine.session().throw_value(Party::User), None);

    // A terminal session stays put until restarted.
    let phase = machine.step(&mut input, &mut display).unwrap().clone();
    assert_eq!(phase, Phase::Terminal(Ending::Aborted));
    assert_eq!(machine.entropy().words_drawn(), 2);
}

#[test]
fn test_second_mover_abort_after_computer_picks() {
    // Computer moves first (guess 1 misses 0), takes die #1, then the user exits.
    let entropy = ScriptedEntropy::new([0]).with_picks([1]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["1", "x"]);
    let mut display = RecordingDisplay::default();

    let ending = machine.play_round(&mut input, &mut display).unwrap();
    assert_eq!(ending, Ending::Aborted);

    let second_pick = input
        .prompts
        .iter()
        .find_map(|p| match &p.kind {
            PromptKind::PickDie { options, first: false } => Some(options.len()),
            _ => None,
        });
    assert_eq!(second_pick, Some(2));
    assert!(input.throw_prompts().is_empty());

    let picks: Vec<Party> = display
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::DieSelected { party, .. } => Some(*party),
            _ => None,
        })
        .collect();
    assert_eq!(picks, vec![Party::Computer]);
    assert!(matches!(display.events.last(), Some(GameEvent::SessionAborted { .. })));

    let entropy = machine.entropy();
    assert_eq!((entropy.words_drawn(), entropy.keys_drawn(), entropy.picks_drawn()), (1, 1, 1));
    assert_eq!(entropy.remaining(), (0, 0));
}

#[test]
fn test_published_digest_matches_reveal() {
    let entropy = ScriptedEntropy::new([1, 3, 0]).with_picks([0]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["0", "0", "0", "0"]);
    let mut display = RecordingDisplay::default();
    machine.play_round(&mut input, &mut display).unwrap();

    let published: Vec<(ExchangeMode, CommitmentDigest)> = display
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::CommitmentPublished { mode, digest, .. } => Some((*mode, *digest)),
            _ => None,
        })
        .collect();
    assert_eq!(published.len(), 3);
    assert_eq!(published[0].0, ExchangeMode::FirstMove);

    let summary = display.summary();
    let revealed = [
        &summary.first_move,
        &summary.computer_throw.exchange,
        &summary.user_throw.exchange,
    ];
    for exchange in revealed {
        assert!(published.iter().any(|(_, d)| *d == exchange.digest));
        assert!(verify_reveal(&exchange.key, exchange.generated, &exchange.digest));
    }
}

#[test]
fn test_run_restarts_with_fresh_sessions_until_input_closes() {
    // Session 1 aborts at the first prompt; session 2 plays to the end; then input closes.
    let entropy = ScriptedEntropy::new([1, 1, 3, 0, 0]).with_picks([0]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["x", "1", "0", "2", "1"]);
    let mut display = RecordingDisplay::default();

    let rounds = machine.run(&mut input, &mut display, None).unwrap();
    assert_eq!(rounds, 2);

    let sessions = display.sessions_started();
    // The third session starts and then finds input closed.
    assert_eq!(sessions.len(), 3);
    assert_ne!(sessions[0], sessions[1]);
    assert_ne!(sessions[1], sessions[2]);
    assert!(display
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::SessionAborted { session } if *session == sessions[0])));
}

#[test]
fn test_run_stops_after_max_rounds() {
    let entropy = ScriptedEntropy::new([0, 0]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["x", "x", "x"]);
    let mut display = RecordingDisplay::default();

    assert_eq!(machine.run(&mut input, &mut display, Some(2)).unwrap(), 2);
    assert_eq!(input.lines.len(), 1);
}

#[test]
fn test_round_finished_event_serializes() {
    let entropy = ScriptedEntropy::new([1, 3, 0]).with_picks([0]);
    let mut machine = GameStateMachine::new(non_transitive_dice(), entropy);
    let mut input = ScriptedInput::new(&["1", "0", "2", "1"]);
    let mut display = RecordingDisplay::default();
    machine.play_round(&mut input, &mut display).unwrap();

    let finished = display
        .events
        .iter()
        .find(|e| matches!(e, GameEvent::RoundFinished { .. }))
        .unwrap();
    let json = serde_json::to_value(finished).unwrap();
    assert_eq!(json["event"], "round_finished");
    assert_eq!(json["summary"]["outcome"], "user_wins");
    assert_eq!(json["summary"]["user_throw"]["face"], 9);
    assert_eq!(json["summary"]["user_throw"]["exchange"]["key"], "02".repeat(32));
}
