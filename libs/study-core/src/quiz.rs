//! Multiple-choice questions with one-shot answer feedback.

use crate::effects::EffectsEmitter;
use crate::error::QuizError;
use crate::types::{EffectTarget, Key, RawQuestion};
use serde::{Deserialize, Serialize};

pub const FEEDBACK_CORRECT: &str = " ✓ Correct!";
pub const FEEDBACK_INCORRECT: &str = " ✗ Incorrect";

/// Opacity applied to responses that were not chosen.
pub const DIMMED_OPACITY: f64 = 0.6;

/// Display state of one response button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseState {
    Open,
    Correct,
    Incorrect,
    Dimmed,
}

impl ResponseState {
    /// Feedback text appended after the response label, if any.
    pub fn feedback(self) -> Option<&'static str> {
        match self {
            Self::Correct => Some(FEEDBACK_CORRECT),
            Self::Incorrect => Some(FEEDBACK_INCORRECT),
            Self::Open | Self::Dimmed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub label: String,
    pub is_correct: bool,
    pub state: ResponseState,
}

/// Result of answering a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub response: usize,
    pub is_correct: bool,
}

/// One question on the page. Once answered every response is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub index: usize,
    pub prompt: String,
    pub responses: Vec<Response>,
    answered: bool,
}

impl QuizQuestion {
    pub fn new(index: usize, raw: &RawQuestion) -> Self {
        let responses = raw
            .responses
            .iter()
            .enumerate()
            .map(|(i, label)| Response {
                label: label.clone(),
                is_correct: i == raw.correct,
                state: ResponseState::Open,
            })
            .collect();

        Self {
            index,
            prompt: raw.prompt.clone(),
            responses,
            answered: false,
        }
    }

    /// Whether responses are disabled.
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// Answer with the response at `response`.
    ///
    /// Returns `Ok(None)` when the question was already answered.
    pub fn check_answer<E: EffectsEmitter>(
        &mut self,
        response: usize,
        effects: &mut E,
    ) -> Result<Option<AnswerResult>, QuizError> {
        if response >= self.responses.len() {
            return Err(QuizError::UnknownResponse {
                question: self.index,
                response,
            });
        }
        if self.answered {
            return Ok(None);
        }
        self.answered = true;

        for (i, r) in self.responses.iter_mut().enumerate() {
            if i == response {
                r.state = if r.is_correct {
                    ResponseState::Correct
                } else {
                    ResponseState::Incorrect
                };
            } else if !matches!(r.state, ResponseState::Correct | ResponseState::Incorrect) {
                r.state = ResponseState::Dimmed;
            }
        }

        let is_correct = self.responses[response].is_correct;
        if is_correct {
            effects.celebrate(EffectTarget::Response {
                question: self.index,
                response,
            });
        }

        tracing::debug!(question = self.index, response, is_correct, "question answered");
        Ok(Some(AnswerResult {
            response,
            is_correct,
        }))
    }

    /// Keyboard activation on a response behaves like a click.
    ///
    /// Returns `Ok(None)` for keys that do not activate.
    pub fn handle_key<E: EffectsEmitter>(
        &mut self,
        response: usize,
        key: Key,
        effects: &mut E,
    ) -> Result<Option<AnswerResult>, QuizError> {
        if !key.is_activation() {
            return Ok(None);
        }
        self.check_answer(response, effects)
    }
}

/// Build the page's questions from parsed content.
pub fn build_quiz(questions: &[RawQuestion]) -> Vec<QuizQuestion> {
    questions
        .iter()
        .enumerate()
        .map(|(i, raw)| QuizQuestion::new(i, raw))
        .collect()
}
