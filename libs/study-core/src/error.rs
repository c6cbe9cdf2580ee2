//! Error types for study-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing study guide markdown.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown section at line {line}: {name}")]
    UnknownSection { line: usize, name: String },

    #[error("content outside of a section at line {line}")]
    OutsideSection { line: usize },

    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },

    #[error("question at line {line} has no responses")]
    NoResponses { line: usize },

    #[error("question at line {line} has no correct response")]
    NoCorrectResponse { line: usize },

    #[error("question at line {line} has more than one correct response")]
    MultipleCorrect { line: usize },

    #[error("malformed pair at line {line}: {value}")]
    MalformedPair { line: usize, value: String },
}

/// Errors from the multiple-choice quiz.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("question {question} has no response {response}")]
    UnknownResponse { question: usize, response: usize },
}

/// Errors resolving an in-page navigation link.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("not an in-page link: {0}")]
    NotInPage(String),

    #[error("no section with id {0}")]
    UnknownSection(String),
}
