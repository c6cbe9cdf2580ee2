//! Core types for the study guide widgets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one selectable item on the matching board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical group key. Two distinct items sharing a `MatchId` form a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u32);

/// Per-item state in the matching game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Unselected,
    Selected,
    Matched,
}

impl Default for ItemState {
    fn default() -> Self {
        Self::Unselected
    }
}

/// A selectable item together with its group and display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchItem {
    pub id: ItemId,
    pub match_id: MatchId,
    pub label: String,
}

/// Matched pair count against the fixed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProgress {
    pub matched_pairs: u32,
    pub total_pairs: u32,
}

impl GameProgress {
    pub fn new(total_pairs: u32) -> Self {
        Self {
            matched_pairs: 0,
            total_pairs,
        }
    }

    /// Whether every pair has been matched.
    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }
}

/// One left/right pair as written in the study guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
    pub line_number: usize,
}

/// A multiple-choice question as written in the study guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub prompt: String,
    pub responses: Vec<String>,
    pub correct: usize,
    pub line_number: usize,
}

/// Front/back text of a flashcard as written in the study guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCard {
    pub front: String,
    pub back: String,
    pub line_number: usize,
}

/// Parsed content of a study guide page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyGuide {
    pub questions: Vec<RawQuestion>,
    pub flashcards: Vec<RawCard>,
    pub pairs: Vec<MatchPair>,
}

impl StudyGuide {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty() && self.flashcards.is_empty() && self.pairs.is_empty()
    }
}

/// Items laid out for the matching game.
///
/// Pair `n` (1-based) yields a left item and a right item sharing `MatchId(n)`.
/// Left items are numbered first, so with `p` pairs the left column holds ids
/// `1..=p` and the right column `p+1..=2p`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchBoard {
    pub left: Vec<MatchItem>,
    pub right: Vec<MatchItem>,
}

impl MatchBoard {
    pub fn from_pairs(pairs: &[MatchPair]) -> Self {
        let count = pairs.len() as u32;
        let mut left = Vec::with_capacity(pairs.len());
        let mut right = Vec::with_capacity(pairs.len());

        for (idx, pair) in pairs.iter().enumerate() {
            let n = idx as u32 + 1;
            left.push(MatchItem {
                id: ItemId(n),
                match_id: MatchId(n),
                label: pair.left.clone(),
            });
            right.push(MatchItem {
                id: ItemId(count + n),
                match_id: MatchId(n),
                label: pair.right.clone(),
            });
        }

        Self { left, right }
    }

    pub fn total_pairs(&self) -> u32 {
        self.left.len() as u32
    }

    /// Look up an item in either column.
    pub fn item(&self, id: ItemId) -> Option<&MatchItem> {
        self.left.iter().chain(self.right.iter()).find(|item| item.id == id)
    }

    pub fn items(&self) -> impl Iterator<Item = &MatchItem> {
        self.left.iter().chain(self.right.iter())
    }
}

/// What a decorative effect is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EffectTarget {
    MatchItem { id: ItemId },
    Response { question: usize, response: usize },
    Flashcard { index: usize },
}

/// Keys the widgets react to. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    /// Parse a key name as reported by a keyboard event (`"Enter"`, `" "`)
    /// or typed by hand (`"return"`, `"space"`). Case is ignored.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "enter" | "return" => Self::Enter,
            " " | "space" | "spacebar" => Self::Space,
            _ => Self::Other,
        }
    }

    /// Enter and Space activate buttons and cards.
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(left: &str, right: &str) -> MatchPair {
        MatchPair {
            left: left.to_string(),
            right: right.to_string(),
            line_number: 1,
        }
    }

    #[test]
    fn board_assigns_shared_match_ids() {
        let board = MatchBoard::from_pairs(&[pair("Mona Lisa", "Leonardo"), pair("David", "Michelangelo")]);

        assert_eq!(board.total_pairs(), 2);
        assert_eq!(board.left[0].id, ItemId(1));
        assert_eq!(board.right[0].id, ItemId(3));
        assert_eq!(board.left[1].match_id, board.right[1].match_id);
        assert_ne!(board.left[0].match_id, board.right[1].match_id);
        assert_eq!(board.item(ItemId(4)).map(|i| i.label.as_str()), Some("Michelangelo"));
        assert!(board.item(ItemId(5)).is_none());
    }

    #[test]
    fn progress_completion() {
        let mut progress = GameProgress::new(1);
        assert!(!progress.is_complete());
        progress.matched_pairs = 1;
        assert!(progress.is_complete());
    }

    #[test]
    fn activation_keys() {
        assert_eq!(Key::from_name("Enter"), Key::Enter);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("RETURN"), Key::Enter);
        assert_eq!(Key::from_name("Spacebar"), Key::Space);
        assert!(Key::from_name("space").is_activation());
        assert!(!Key::from_name("Escape").is_activation());
    }
}
