//! Flippable flashcards.

use crate::effects::EffectsEmitter;
use crate::types::{EffectTarget, Key, RawCard};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub index: usize,
    pub front: String,
    pub back: String,
    flipped: bool,
}

impl Flashcard {
    pub fn new(index: usize, raw: &RawCard) -> Self {
        Self {
            index,
            front: raw.front.clone(),
            back: raw.back.clone(),
            flipped: false,
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Text currently facing the reader.
    pub fn visible_text(&self) -> &str {
        if self.flipped {
            &self.back
        } else {
            &self.front
        }
    }

    /// Turn the card over. Showing the back sparkles.
    pub fn flip<E: EffectsEmitter>(&mut self, effects: &mut E) -> bool {
        self.flipped = !self.flipped;
        if self.flipped {
            effects.sparkle(EffectTarget::Flashcard { index: self.index });
        }
        self.flipped
    }

    /// Flip on Enter or Space.
    ///
    /// Returns `true` when the key was handled and its default action
    /// (scrolling, for Space) must be suppressed.
    pub fn handle_key<E: EffectsEmitter>(&mut self, key: Key, effects: &mut E) -> bool {
        if !key.is_activation() {
            return false;
        }
        self.flip(effects);
        true
    }
}

pub fn build_deck(cards: &[RawCard]) -> Vec<Flashcard> {
    cards
        .iter()
        .enumerate()
        .map(|(i, raw)| Flashcard::new(i, raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sparkles(Vec<EffectTarget>);

    impl EffectsEmitter for Sparkles {
        fn celebrate(&mut self, _target: EffectTarget) {}
        fn sparkle(&mut self, target: EffectTarget) {
            self.0.push(target);
        }
        fn confetti(&mut self) {}
    }

    fn card() -> Flashcard {
        Flashcard::new(
            3,
            &RawCard {
                front: "Sfumato".to_string(),
                back: "Soft transitions between tones.".to_string(),
                line_number: 1,
            },
        )
    }

    #[test]
    fn flip_toggles_and_sparkles_on_back() {
        let mut card = card();
        let mut effects = Sparkles::default();

        assert_eq!(card.visible_text(), "Sfumato");
        assert!(card.flip(&mut effects));
        assert_eq!(card.visible_text(), "Soft transitions between tones.");
        assert!(!card.flip(&mut effects));
        assert_eq!(effects.0, vec![EffectTarget::Flashcard { index: 3 }]);
    }

    #[test]
    fn only_activation_keys_flip() {
        let mut card = card();
        let mut effects = Sparkles::default();

        assert!(!card.handle_key(Key::Other, &mut effects));
        assert!(!card.is_flipped());
        assert!(card.handle_key(Key::Enter, &mut effects));
        assert!(card.is_flipped());
        assert!(card.handle_key(Key::Space, &mut effects));
        assert!(!card.is_flipped());
    }
}
