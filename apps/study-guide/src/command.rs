//! Commands typed at the study guide prompt.

use std::str::FromStr;
use study_core::Key;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  show                      redraw the page
  quiz <question> <answer>  pick an answer (numbers as shown)
  flip <card>               flip a flashcard
  key card <card> <key>     press a key on a flashcard (enter, space, ...)
  key quiz <q> <a> <key>    press a key on a quiz answer
  match <item>              select a matching game item
  nav <#section>            jump to a section (#quiz, #flashcards, #matching)
  move <x> <y>              move the pointer (mouse trail)
  status                    print the matching game state as JSON
  help                      show this help
  quit                      leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Answer { question: usize, response: usize },
    Flip { card: usize },
    CardKey { card: usize, key: Key },
    AnswerKey { question: usize, response: usize, key: Key },
    Match { item: u32 },
    Navigate { href: String },
    Pointer { x: i64, y: i64 },
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a number: {0}")]
    NotANumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            ["show"] => Ok(Self::Show),
            ["quiz", q, r] => Ok(Self::Answer {
                question: index(q)?,
                response: index(r)?,
            }),
            ["quiz", ..] => Err(CommandError::Usage("quiz <question> <answer>")),
            ["flip", n] => Ok(Self::Flip { card: index(n)? }),
            ["flip", ..] => Err(CommandError::Usage("flip <card>")),
            ["key", "card", n, key] => Ok(Self::CardKey {
                card: index(n)?,
                key: Key::from_name(key),
            }),
            ["key", "quiz", q, r, key] => Ok(Self::AnswerKey {
                question: index(q)?,
                response: index(r)?,
                key: Key::from_name(key),
            }),
            ["key", ..] => Err(CommandError::Usage(
                "key card <card> <key> | key quiz <question> <answer> <key>",
            )),
            ["match", item] => Ok(Self::Match {
                item: number(item)?,
            }),
            ["match", ..] => Err(CommandError::Usage("match <item>")),
            ["nav", href] => Ok(Self::Navigate {
                href: href.to_string(),
            }),
            ["nav", ..] => Err(CommandError::Usage("nav <#section>")),
            ["move", x, y] => Ok(Self::Pointer {
                x: number(x)?,
                y: number(y)?,
            }),
            ["move", ..] => Err(CommandError::Usage("move <x> <y>")),
            ["status"] => Ok(Self::Status),
            ["help"] | ["?"] => Ok(Self::Help),
            ["quit"] | ["exit"] | ["q"] => Ok(Self::Quit),
            [] => Err(CommandError::Usage("type `help` for commands")),
            [other, ..] => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn number<T: FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse::<T>()
        .map_err(|_| CommandError::NotANumber(word.to_string()))
}

/// Convert a 1-based number as shown on screen to an index.
fn index(word: &str) -> Result<usize, CommandError> {
    match number::<usize>(word)? {
        0 => Err(CommandError::NotANumber(word.to_string())),
        n => Ok(n - 1),
    }
}
