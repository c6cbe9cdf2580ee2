//! The study guide page: every widget wired to terminal output.

use crate::command::{Command, HELP};
use crate::render::{Burst, BurstKind, Layout, TerminalEffects};
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use study_core::{
    build_deck, build_quiz, resolve_anchor, EffectTarget, Flashcard, ItemId, ItemState, MatchBoard,
    MatchingGame, MotionSettings, NavigationError, Particle, ParticlePlanner, PendingReset, Point,
    QuizError,
    QuizQuestion, ResponseState, Scheduler, ScrollBehavior, Section, StatusLine, StudyGuide,
    Viewport,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no question {0}")]
    UnknownQuestion(usize),

    #[error("question {question} has no answer {response}")]
    UnknownResponse { question: usize, response: usize },

    #[error("no flashcard {0}")]
    UnknownCard(usize),

    #[error("no matching item {0}")]
    UnknownItem(u32),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("failed to serialize game state: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl From<QuizError> for PageError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::UnknownResponse { question, response } => Self::UnknownResponse {
                question: question + 1,
                response: response + 1,
            },
        }
    }
}

pub struct Page<S, R: Rng = ThreadRng> {
    questions: Vec<QuizQuestion>,
    cards: Vec<Flashcard>,
    board: MatchBoard,
    sections: Vec<Section>,
    motion: MotionSettings,
    game: MatchingGame<StatusLine, TerminalEffects<R>, S>,
    status_seen: usize,
    glitter: Vec<Particle>,
    output: Vec<String>,
}

impl<S: Scheduler, R: Rng> Page<S, R> {
    pub fn new(
        guide: StudyGuide,
        motion: MotionSettings,
        planner: ParticlePlanner<R>,
        viewport: Viewport,
        scheduler: S,
    ) -> Self {
        let questions = build_quiz(&guide.questions);
        let cards = build_deck(&guide.flashcards);
        let board = MatchBoard::from_pairs(&guide.pairs);

        let layout = Layout::new(questions.len(), cards.len(), &board);
        let effects = TerminalEffects::new(planner, layout, viewport);
        let game = MatchingGame::new(board.total_pairs(), StatusLine::new(), effects, scheduler);

        tracing::info!(
            questions = questions.len(),
            flashcards = cards.len(),
            pairs = board.total_pairs(),
            "study guide loaded"
        );

        let mut page = Self {
            questions,
            cards,
            board,
            sections: vec![
                Section::new("quiz", "Quiz"),
                Section::new("flashcards", "Flashcards"),
                Section::new("matching", "Matching Game"),
            ],
            motion,
            game,
            status_seen: 0,
            glitter: Vec::new(),
            output: Vec::new(),
        };
        page.flush_status();
        page
    }

    /// Shuffle the right-hand column so partners are not side by side.
    pub fn shuffle_board<G: Rng>(&mut self, rng: &mut G) {
        self.board.right.shuffle(rng);
        let layout = Layout::new(self.questions.len(), self.cards.len(), &self.board);
        self.game.effects_mut().set_layout(layout);
    }

    /// Lines produced since the last call.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    pub fn handle(&mut self, command: Command) -> Result<(), PageError> {
        self.flush_glitter();
        let result = self.dispatch(command);
        self.flush_effects();
        self.flush_status();
        result
    }

    /// A mismatch reset delivered by the scheduler.
    pub fn apply_reset(&mut self, reset: PendingReset) {
        self.game.apply_reset(reset);
        self.flush_status();
    }

    /// Release one ambient glitter particle.
    ///
    /// Particles are held back and summarised before the next command's
    /// output, so the prompt is not flooded on every tick.
    pub fn glitter(&mut self) {
        let effects = self.game.effects_mut();
        let viewport = effects.viewport();
        let particle = effects.planner_mut().glitter(viewport);
        tracing::trace!(
            x = particle.position.x,
            color = particle.color.unwrap_or_default(),
            "glitter"
        );
        self.glitter.push(particle);
    }

    fn dispatch(&mut self, command: Command) -> Result<(), PageError> {
        match command {
            Command::Show => self.render(),
            Command::Help => self.output.extend(HELP.lines().map(str::to_string)),
            Command::Quit => {}
            Command::Answer { question, response } => {
                let q = self
                    .questions
                    .get_mut(question)
                    .ok_or(PageError::UnknownQuestion(question + 1))?;
                match q.check_answer(response, self.game.effects_mut())? {
                    Some(_) => self.render_question(question),
                    None => self
                        .output
                        .push(format!("Question {} is already answered.", question + 1)),
                }
            }
            Command::AnswerKey {
                question,
                response,
                key,
            } => {
                let q = self
                    .questions
                    .get_mut(question)
                    .ok_or(PageError::UnknownQuestion(question + 1))?;
                if !key.is_activation() {
                    self.output.push("(key ignored)".to_string());
                    return Ok(());
                }
                match q.handle_key(response, key, self.game.effects_mut())? {
                    Some(_) => self.render_question(question),
                    None => self
                        .output
                        .push(format!("Question {} is already answered.", question + 1)),
                }
            }
            Command::Flip { card } => {
                let c = self
                    .cards
                    .get_mut(card)
                    .ok_or(PageError::UnknownCard(card + 1))?;
                c.flip(self.game.effects_mut());
                self.render_card(card);
            }
            Command::CardKey { card, key } => {
                let c = self
                    .cards
                    .get_mut(card)
                    .ok_or(PageError::UnknownCard(card + 1))?;
                if c.handle_key(key, self.game.effects_mut()) {
                    self.render_card(card);
                } else {
                    self.output.push("(key ignored)".to_string());
                }
            }
            Command::Match { item } => {
                let match_id = self
                    .board
                    .item(ItemId(item))
                    .map(|i| i.match_id)
                    .ok_or(PageError::UnknownItem(item))?;
                let outcome = self.game.select_match(ItemId(item), match_id);
                tracing::debug!(item, ?outcome, "match selection");
                self.render_board();
            }
            Command::Navigate { href } => {
                let request = resolve_anchor(&href, &self.sections, self.motion.scroll)?;
                let behavior = match request.behavior {
                    ScrollBehavior::Smooth => "smooth",
                    ScrollBehavior::Instant => "instant",
                };
                let title = self.sections[request.section].title.clone();
                self.output.push(format!("↪ {title} ({behavior} scroll)"));
                match request.section {
                    0 => self.render_quiz(),
                    1 => self.render_cards(),
                    _ => self.render_board(),
                }
            }
            Command::Pointer { x, y } => {
                let pointer = Point {
                    x: x as f64,
                    y: y as f64,
                };
                let trail = self.motion.mouse_trail;
                if let Some(dot) = self.game.effects_mut().planner_mut().trail_dot(pointer, trail) {
                    self.output.push(format!(
                        "· trail at ({x}, {y}) {}",
                        dot.color.unwrap_or_default()
                    ));
                }
            }
            Command::Status => {
                let snapshot = serde_json::to_string_pretty(&self.game.snapshot())?;
                self.output.extend(snapshot.lines().map(str::to_string));
            }
        }
        Ok(())
    }

    fn flush_status(&mut self) {
        let status = self.game.presenter();
        if status.updates() != self.status_seen {
            self.status_seen = status.updates();
            self.output.push(format!("» {}", status.text()));
        }
    }

    fn flush_glitter(&mut self) {
        let Some(latest) = self.glitter.last() else {
            return;
        };
        self.output.push(format!(
            "✧ {} glitter sparkles drifted up the page (latest {} at x {:.0})",
            self.glitter.len(),
            latest.color.unwrap_or_default(),
            latest.position.x
        ));
        self.glitter.clear();
    }

    fn flush_effects(&mut self) {
        for burst in self.game.effects_mut().drain() {
            let line = self.describe(&burst);
            self.output.push(line);
        }
    }

    fn describe(&self, burst: &Burst) -> String {
        let seconds = burst.span().as_secs_f64();
        let count = burst.particles.len();
        match (burst.kind, burst.target) {
            (BurstKind::Confetti, _) | (_, None) => {
                format!("🎊 confetti across the page ({count} sparkles, {seconds:.1}s)")
            }
            (BurstKind::Celebration, Some(target)) => format!(
                "✨ celebration around \"{}\" ({count} sparkles, {seconds:.1}s)",
                self.label(target)
            ),
            (BurstKind::Sparkle, Some(target)) => format!(
                "✨ sparkles on \"{}\" ({count} sparkles, {seconds:.1}s)",
                self.label(target)
            ),
        }
    }

    fn label(&self, target: EffectTarget) -> &str {
        match target {
            EffectTarget::Response { question, response } => self
                .questions
                .get(question)
                .and_then(|q| q.responses.get(response))
                .map_or("", |r| r.label.as_str()),
            EffectTarget::Flashcard { index } => self.cards.get(index).map_or("", |c| c.front.as_str()),
            EffectTarget::MatchItem { id } => self.board.item(id).map_or("", |i| i.label.as_str()),
        }
    }

    fn render(&mut self) {
        self.render_quiz();
        self.render_cards();
        self.render_board();
    }

    fn render_quiz(&mut self) {
        self.output.push("── Quiz ──".to_string());
        for i in 0..self.questions.len() {
            self.render_question(i);
        }
    }

    fn render_question(&mut self, index: usize) {
        let Some(q) = self.questions.get(index) else {
            return;
        };
        let mut lines = vec![format!("{}. {}", index + 1, q.prompt)];
        for (i, r) in q.responses.iter().enumerate() {
            let marker = match r.state {
                ResponseState::Open => "  ",
                ResponseState::Dimmed => "░ ",
                ResponseState::Correct | ResponseState::Incorrect => "▶ ",
            };
            let feedback = r.state.feedback().unwrap_or_default();
            lines.push(format!("   {marker}{}) {}{feedback}", i + 1, r.label));
        }
        self.output.extend(lines);
    }

    fn render_cards(&mut self) {
        self.output.push("── Flashcards ──".to_string());
        for i in 0..self.cards.len() {
            self.render_card(i);
        }
    }

    fn render_card(&mut self, index: usize) {
        let Some(card) = self.cards.get(index) else {
            return;
        };
        let side = if card.is_flipped() { "back" } else { "front" };
        let text = card.visible_text().replace('\n', " ");
        self.output.push(format!("[{}] ({side}) {text}", index + 1));
    }

    fn render_board(&mut self) {
        let mut lines = vec!["── Matching Game ──".to_string()];
        let rows = self.board.left.len().max(self.board.right.len());
        for row in 0..rows {
            let left = self.board.left.get(row).map(|i| self.cell(i.id, &i.label));
            let right = self.board.right.get(row).map(|i| self.cell(i.id, &i.label));
            lines.push(format!(
                "{:<40} {}",
                left.unwrap_or_default(),
                right.unwrap_or_default()
            ));
        }
        let progress = self.game.progress();
        lines.push(format!(
            "{}/{} pairs matched",
            progress.matched_pairs, progress.total_pairs
        ));
        self.output.extend(lines);
    }

    fn cell(&self, id: ItemId, label: &str) -> String {
        let marker = match self.game.item_state(id) {
            ItemState::Unselected => "[ ]",
            ItemState::Selected => "[>]",
            ItemState::Matched => "[✓]",
        };
        format!("{marker} {:>2} {label}", id.0)
    }
}
