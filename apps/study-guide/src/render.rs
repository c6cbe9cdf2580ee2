//! Terminal rendering of decorative effects.

use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;
use study_core::{
    EffectTarget, EffectsEmitter, ItemId, MatchBoard, Particle, ParticlePlanner, Rect, Viewport,
};

const MARGIN: f64 = 40.0;
const RESPONSE_SIZE: (f64, f64) = (180.0, 40.0);
const CARD_SIZE: (f64, f64) = (240.0, 160.0);
const CARDS_PER_ROW: usize = 3;
const ITEM_SIZE: (f64, f64) = (320.0, 48.0);

/// Where each widget element sits on the virtual page.
///
/// The page is laid out top to bottom: quiz, flashcards, matching board.
#[derive(Debug, Clone)]
pub struct Layout {
    questions: usize,
    cards: usize,
    items: HashMap<ItemId, (usize, usize)>,
}

impl Layout {
    pub fn new(questions: usize, cards: usize, board: &MatchBoard) -> Self {
        let mut items = HashMap::new();
        for (column, items_in_column) in [&board.left, &board.right].into_iter().enumerate() {
            for (row, item) in items_in_column.iter().enumerate() {
                items.insert(item.id, (column, row));
            }
        }
        Self {
            questions,
            cards,
            items,
        }
    }

    fn flashcards_top(&self) -> f64 {
        MARGIN + self.questions as f64 * (RESPONSE_SIZE.1 * 2.0)
    }

    fn board_top(&self) -> f64 {
        let card_rows = self.cards.div_ceil(CARDS_PER_ROW);
        self.flashcards_top() + card_rows as f64 * (CARD_SIZE.1 + MARGIN)
    }

    pub fn rect(&self, target: EffectTarget) -> Rect {
        match target {
            EffectTarget::Response { question, response } => Rect {
                left: MARGIN + response as f64 * (RESPONSE_SIZE.0 + MARGIN / 2.0),
                top: MARGIN + question as f64 * (RESPONSE_SIZE.1 * 2.0),
                width: RESPONSE_SIZE.0,
                height: RESPONSE_SIZE.1,
            },
            EffectTarget::Flashcard { index } => Rect {
                left: MARGIN + (index % CARDS_PER_ROW) as f64 * (CARD_SIZE.0 + MARGIN / 2.0),
                top: self.flashcards_top() + (index / CARDS_PER_ROW) as f64 * (CARD_SIZE.1 + MARGIN),
                width: CARD_SIZE.0,
                height: CARD_SIZE.1,
            },
            EffectTarget::MatchItem { id } => {
                let (column, row) = self.items.get(&id).copied().unwrap_or_default();
                Rect {
                    left: MARGIN + column as f64 * (ITEM_SIZE.0 + MARGIN),
                    top: self.board_top() + row as f64 * (ITEM_SIZE.1 + MARGIN / 2.0),
                    width: ITEM_SIZE.0,
                    height: ITEM_SIZE.1,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Celebration,
    Sparkle,
    Confetti,
}

/// Particles planned for one effect signal.
#[derive(Debug, Clone)]
pub struct Burst {
    pub kind: BurstKind,
    pub target: Option<EffectTarget>,
    pub particles: Vec<Particle>,
}

impl Burst {
    /// Time until the last particle is gone.
    pub fn span(&self) -> Duration {
        self.particles
            .iter()
            .map(|p| p.delay + p.lifetime)
            .max()
            .unwrap_or_default()
    }
}

/// Effects emitter that plans particles and queues them for printing.
pub struct TerminalEffects<R: Rng = ThreadRng> {
    planner: ParticlePlanner<R>,
    layout: Layout,
    viewport: Viewport,
    pending: Vec<Burst>,
}

impl<R: Rng> TerminalEffects<R> {
    pub fn new(planner: ParticlePlanner<R>, layout: Layout, viewport: Viewport) -> Self {
        Self {
            planner,
            layout,
            viewport,
            pending: Vec::new(),
        }
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn planner_mut(&mut self) -> &mut ParticlePlanner<R> {
        &mut self.planner
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Bursts planned since the last call.
    pub fn drain(&mut self) -> Vec<Burst> {
        std::mem::take(&mut self.pending)
    }
}

impl<R: Rng> EffectsEmitter for TerminalEffects<R> {
    fn celebrate(&mut self, target: EffectTarget) {
        let particles = self.planner.celebration(self.layout.rect(target));
        self.pending.push(Burst {
            kind: BurstKind::Celebration,
            target: Some(target),
            particles,
        });
    }

    fn sparkle(&mut self, target: EffectTarget) {
        let particles = self.planner.card_sparkles(self.layout.rect(target));
        self.pending.push(Burst {
            kind: BurstKind::Sparkle,
            target: Some(target),
            particles,
        });
    }

    fn confetti(&mut self) {
        let particles = self.planner.confetti(self.viewport);
        self.pending.push(Burst {
            kind: BurstKind::Confetti,
            target: None,
            particles,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use study_core::{MatchPair, ParticleKind};

    fn board() -> MatchBoard {
        MatchBoard::from_pairs(&[
            MatchPair {
                left: "Guernica".to_string(),
                right: "Picasso".to_string(),
                line_number: 1,
            },
            MatchPair {
                left: "The Night Watch".to_string(),
                right: "Rembrandt".to_string(),
                line_number: 2,
            },
        ])
    }

    fn effects() -> TerminalEffects<StdRng> {
        TerminalEffects::new(
            ParticlePlanner::with_rng(StdRng::seed_from_u64(1)),
            Layout::new(2, 4, &board()),
            Viewport {
                width: 1280.0,
                height: 720.0,
            },
        )
    }

    #[test]
    fn layout_stacks_sections() {
        let layout = Layout::new(2, 4, &board());
        let response = layout.rect(EffectTarget::Response {
            question: 1,
            response: 0,
        });
        let card = layout.rect(EffectTarget::Flashcard { index: 3 });
        let left = layout.rect(EffectTarget::MatchItem { id: ItemId(2) });
        let right = layout.rect(EffectTarget::MatchItem { id: ItemId(4) });

        assert!(card.top > response.top);
        assert!(left.top > card.top);
        assert_eq!(left.top, right.top);
        assert!(right.left > left.left);
    }

    #[test]
    fn signals_become_bursts() {
        let mut effects = effects();
        effects.celebrate(EffectTarget::MatchItem { id: ItemId(1) });
        effects.sparkle(EffectTarget::Flashcard { index: 0 });
        effects.confetti();

        let bursts = effects.drain();
        assert_eq!(bursts.len(), 3);
        assert_eq!(bursts[0].kind, BurstKind::Celebration);
        assert_eq!(bursts[0].particles.len(), 6);
        assert_eq!(bursts[1].particles.len(), 3);
        assert_eq!(bursts[2].target, None);
        assert_eq!(bursts[2].particles.len(), 50);
        assert!(bursts
            .iter()
            .flat_map(|b| &b.particles)
            .all(|p| p.kind == ParticleKind::Sparkle));
        assert_eq!(bursts[2].span(), Duration::from_millis(4900 + 3000));

        assert!(effects.drain().is_empty());
    }
}
