//! Input tokens, prompting and the event stream.

mod events;
mod prompt;
mod token;

pub use events::GameEvent;
pub use prompt::{Answer, GameDisplay, HelpExit, Prompt, PromptKind, Prompter, TokenSource};
pub use token::{Token, TokenError, ABORT, HELP};
