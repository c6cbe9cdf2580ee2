//! Headless widgets for the Art History Study Guide.
//!
//! Provides:
//! - Pair-matching game controller with deferred mismatch reset
//! - Multiple-choice answer checking and flippable flashcards
//! - Effect signals and particle planning (sparkles, confetti, glitter, trail)
//! - Reduced-motion adaptation and in-page navigation
//! - Markdown parser for study guide content

pub mod effects;
pub mod error;
pub mod flashcards;
pub mod matching_game;
pub mod motion;
pub mod navigation;
pub mod parser;
pub mod presenter;
pub mod quiz;
pub mod scheduler;
pub mod types;

pub use effects::{EffectsEmitter, NoEffects, Particle, ParticleKind, ParticlePlanner, Point, Rect, Viewport};
pub use error::{NavigationError, ParseError, QuizError, Result};
pub use flashcards::{build_deck, Flashcard};
pub use matching_game::{
    GameSnapshot, MatchingGame, PendingReset, SelectOutcome, Selection, MISMATCH_RESET_DELAY,
};
pub use motion::{EnvironmentCapabilities, MotionSettings, ScrollBehavior};
pub use navigation::{resolve_anchor, ScrollRequest, Section};
pub use parser::parse;
pub use presenter::{StatusLine, StatusPresenter};
pub use quiz::{build_quiz, AnswerResult, QuizQuestion, ResponseState};
pub use scheduler::{ManualScheduler, Scheduler};
pub use types::{
    EffectTarget, GameProgress, ItemId, ItemState, Key, MatchBoard, MatchId, MatchItem, MatchPair,
    RawCard, RawQuestion, StudyGuide,
};
