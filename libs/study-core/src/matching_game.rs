//! Pair-matching game.
//!
//! The player picks one item, then its partner. A correct pair locks both
//! items as matched; a wrong pair stays highlighted for
//! [`MISMATCH_RESET_DELAY`] before both items revert. The selection slot is
//! freed as soon as the second pick is judged, so a new pick may start while
//! an older reset is still pending. The reset only touches the two items it
//! captured and leaves the slot alone.

use crate::effects::EffectsEmitter;
use crate::presenter::StatusPresenter;
use crate::scheduler::{ManualScheduler, Scheduler};
use crate::types::{EffectTarget, GameProgress, ItemId, ItemState, MatchId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// How long a wrong pair stays highlighted.
pub const MISMATCH_RESET_DELAY: Duration = Duration::from_millis(1500);

pub const MSG_CHOOSE: &str = "Choose an item to match.";
pub const MSG_SELECTED: &str = "Item selected. Now choose its match.";
pub const MSG_CLEARED: &str = "Selection cleared. Choose an item to match.";
pub const MSG_MISMATCH: &str = "✗ Not a match. Try again!";
pub const MSG_COMPLETE: &str = "🎉 Congratulations! All pairs matched correctly!";

/// The first pick awaiting its partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub item: ItemId,
    pub match_id: MatchId,
}

/// Deferred cleanup of a wrong pair, captured by value at schedule time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReset {
    /// The earlier pick.
    pub first: ItemId,
    /// The item that did not match it.
    pub second: ItemId,
}

/// What a call to [`MatchingGame::select_match`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    /// The item was already matched.
    Ignored,
    /// First pick stored.
    Selected,
    /// The first pick was clicked again and released.
    Cleared,
    /// A correct pair.
    Matched { complete: bool },
    /// A wrong pair; a reset has been scheduled.
    Mismatched,
}

/// Serializable view of the game for hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub progress: GameProgress,
    pub selection: Option<Selection>,
    pub items: Vec<(ItemId, ItemState)>,
}

/// Controller for one matching game session.
pub struct MatchingGame<P, E, S> {
    presenter: P,
    effects: E,
    scheduler: S,
    states: HashMap<ItemId, ItemState>,
    selection: Option<Selection>,
    progress: GameProgress,
}

impl<P, E, S> MatchingGame<P, E, S>
where
    P: StatusPresenter,
    E: EffectsEmitter,
    S: Scheduler,
{
    /// Start a fresh session and show the opening prompt.
    pub fn new(total_pairs: u32, mut presenter: P, effects: E, scheduler: S) -> Self {
        presenter.set_message(MSG_CHOOSE);
        Self {
            presenter,
            effects,
            scheduler,
            states: HashMap::new(),
            selection: None,
            progress: GameProgress::new(total_pairs),
        }
    }

    /// Handle a click (or keyboard activation) on `item`.
    pub fn select_match(&mut self, item: ItemId, match_id: MatchId) -> SelectOutcome {
        if self.item_state(item) == ItemState::Matched {
            tracing::trace!(%item, "ignoring click on matched item");
            return SelectOutcome::Ignored;
        }

        let Some(selected) = self.selection.take() else {
            self.states.insert(item, ItemState::Selected);
            self.selection = Some(Selection { item, match_id });
            self.presenter.set_message(MSG_SELECTED);
            tracing::debug!(%item, "first pick");
            return SelectOutcome::Selected;
        };

        if selected.item == item {
            self.states.insert(item, ItemState::Unselected);
            self.presenter.set_message(MSG_CLEARED);
            tracing::debug!(%item, "selection cleared");
            return SelectOutcome::Cleared;
        }

        if selected.match_id == match_id {
            self.states.insert(selected.item, ItemState::Matched);
            self.states.insert(item, ItemState::Matched);
            self.progress.matched_pairs = (self.progress.matched_pairs + 1).min(self.progress.total_pairs);

            self.effects.celebrate(EffectTarget::MatchItem { id: item });
            self.effects.celebrate(EffectTarget::MatchItem { id: selected.item });

            let complete = self.progress.is_complete();
            if complete {
                self.presenter.set_message(MSG_COMPLETE);
                self.effects.confetti();
            } else {
                let message = format!(
                    "✓ Correct match! ({}/{} completed)",
                    self.progress.matched_pairs, self.progress.total_pairs
                );
                self.presenter.set_message(&message);
            }

            tracing::debug!(
                first = %selected.item,
                second = %item,
                matched = self.progress.matched_pairs,
                total = self.progress.total_pairs,
                "pair matched"
            );
            SelectOutcome::Matched { complete }
        } else {
            self.states.insert(item, ItemState::Selected);
            self.presenter.set_message(MSG_MISMATCH);
            self.scheduler.schedule(
                MISMATCH_RESET_DELAY,
                PendingReset {
                    first: selected.item,
                    second: item,
                },
            );
            tracing::debug!(first = %selected.item, second = %item, "pair mismatched");
            SelectOutcome::Mismatched
        }
    }

    /// Run a mismatch reset that has come due.
    ///
    /// Each captured item still highlighted reverts to unselected, unless it
    /// has since become the current first pick.
    pub fn apply_reset(&mut self, reset: PendingReset) {
        for id in [reset.first, reset.second] {
            let owns_slot = self.selection.is_some_and(|s| s.item == id);
            if !owns_slot && self.item_state(id) == ItemState::Selected {
                self.states.insert(id, ItemState::Unselected);
            }
        }
        self.presenter.set_message(MSG_CHOOSE);
        tracing::debug!(first = %reset.first, second = %reset.second, "mismatch reset");
    }
}

impl<P, E, S> MatchingGame<P, E, S> {
    pub fn item_state(&self, item: ItemId) -> ItemState {
        self.states.get(&item).copied().unwrap_or_default()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn progress(&self) -> GameProgress {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Items that have left the unselected state, ordered by id.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut items: Vec<_> = self
            .states
            .iter()
            .filter(|(_, state)| **state != ItemState::Unselected)
            .map(|(id, state)| (*id, *state))
            .collect();
        items.sort_by_key(|(id, _)| *id);

        GameSnapshot {
            progress: self.progress,
            selection: self.selection,
            items,
        }
    }
}

impl<P, E> MatchingGame<P, E, ManualScheduler>
where
    P: StatusPresenter,
    E: EffectsEmitter,
{
    /// Advance the virtual clock and apply every reset that came due.
    /// Returns how many resets fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let due = self.scheduler.advance(by);
        let fired = due.len();
        for reset in due {
            self.apply_reset(reset);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::StatusLine;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct RecordingEffects {
        celebrated: Vec<EffectTarget>,
        confetti: usize,
    }

    impl EffectsEmitter for RecordingEffects {
        fn celebrate(&mut self, target: EffectTarget) {
            self.celebrated.push(target);
        }

        fn sparkle(&mut self, _target: EffectTarget) {}

        fn confetti(&mut self) {
            self.confetti += 1;
        }
    }

    type Game = MatchingGame<StatusLine, RecordingEffects, ManualScheduler>;

    const A: ItemId = ItemId(1);
    const B: ItemId = ItemId(2);
    const C: ItemId = ItemId(3);
    const D: ItemId = ItemId(4);

    fn game(total_pairs: u32) -> Game {
        MatchingGame::new(
            total_pairs,
            StatusLine::new(),
            RecordingEffects::default(),
            ManualScheduler::new(),
        )
    }

    fn status(game: &Game) -> &str {
        game.presenter().text()
    }

    #[test]
    fn starts_with_prompt() {
        let game = game(2);
        assert_eq!(status(&game), MSG_CHOOSE);
        assert_eq!(game.progress(), GameProgress::new(2));
        assert_eq!(game.selection(), None);
    }

    #[test]
    fn first_pick_fills_slot() {
        let mut game = game(2);

        assert_eq!(game.select_match(A, MatchId(1)), SelectOutcome::Selected);
        assert_eq!(
            game.selection(),
            Some(Selection {
                item: A,
                match_id: MatchId(1)
            })
        );
        assert_eq!(game.item_state(A), ItemState::Selected);
        assert_eq!(status(&game), MSG_SELECTED);
    }

    #[test]
    fn reclick_clears_without_delay_or_effect() {
        let mut game = game(2);
        game.select_match(A, MatchId(1));

        assert_eq!(game.select_match(A, MatchId(1)), SelectOutcome::Cleared);
        assert_eq!(game.selection(), None);
        assert_eq!(game.item_state(A), ItemState::Unselected);
        assert_eq!(status(&game), MSG_CLEARED);
        assert_eq!(game.scheduler().pending(), 0);
        assert!(game.effects().celebrated.is_empty());
    }

    #[test]
    fn full_game_scenario() {
        let mut game = game(2);

        game.select_match(A, MatchId(1));
        assert_eq!(status(&game), MSG_SELECTED);

        assert_eq!(
            game.select_match(B, MatchId(1)),
            SelectOutcome::Matched { complete: false }
        );
        assert_eq!(game.item_state(A), ItemState::Matched);
        assert_eq!(game.item_state(B), ItemState::Matched);
        assert_eq!(game.selection(), None);
        assert_eq!(game.progress().matched_pairs, 1);
        assert_eq!(status(&game), "✓ Correct match! (1/2 completed)");
        assert_eq!(
            game.effects().celebrated,
            vec![
                EffectTarget::MatchItem { id: B },
                EffectTarget::MatchItem { id: A }
            ]
        );

        game.select_match(C, MatchId(2));
        assert_eq!(status(&game), MSG_SELECTED);

        assert_eq!(
            game.select_match(D, MatchId(2)),
            SelectOutcome::Matched { complete: true }
        );
        assert_eq!(game.progress().matched_pairs, 2);
        assert!(game.is_complete());
        assert_eq!(status(&game), MSG_COMPLETE);
        assert_eq!(game.effects().confetti, 1);
        assert_eq!(game.effects().celebrated.len(), 4);
    }

    #[test]
    fn matched_item_is_inert() {
        let mut game = game(2);
        game.select_match(A, MatchId(1));
        game.select_match(B, MatchId(1));
        let updates = game.presenter().updates();

        assert_eq!(game.select_match(A, MatchId(1)), SelectOutcome::Ignored);
        assert_eq!(game.select_match(B, MatchId(7)), SelectOutcome::Ignored);

        assert_eq!(game.presenter().updates(), updates);
        assert_eq!(game.selection(), None);
        assert_eq!(game.progress().matched_pairs, 1);
        assert_eq!(game.effects().celebrated.len(), 2);
    }

    #[test]
    fn matched_item_ignored_while_slot_is_held() {
        let mut game = game(2);
        game.select_match(A, MatchId(1));
        game.select_match(B, MatchId(1));
        game.select_match(C, MatchId(2));

        assert_eq!(game.select_match(A, MatchId(2)), SelectOutcome::Ignored);
        assert_eq!(
            game.selection(),
            Some(Selection {
                item: C,
                match_id: MatchId(2)
            })
        );
    }

    #[test]
    fn mismatch_frees_slot_then_resets_after_delay() {
        let mut game = game(2);
        game.select_match(A, MatchId(1));

        assert_eq!(game.select_match(C, MatchId(2)), SelectOutcome::Mismatched);
        assert_eq!(status(&game), MSG_MISMATCH);
        assert_eq!(game.selection(), None);
        assert_eq!(game.item_state(A), ItemState::Selected);
        assert_eq!(game.item_state(C), ItemState::Selected);
        assert!(game.effects().celebrated.is_empty());

        assert_eq!(game.advance(Duration::from_millis(1499)), 0);
        assert_eq!(game.item_state(C), ItemState::Selected);

        assert_eq!(game.advance(Duration::from_millis(1)), 1);
        assert_eq!(game.item_state(A), ItemState::Unselected);
        assert_eq!(game.item_state(C), ItemState::Unselected);
        assert_eq!(status(&game), MSG_CHOOSE);
    }

    #[test]
    fn fresh_pick_during_reset_window_survives() {
        let mut game = game(2);
        game.select_match(A, MatchId(1));
        game.select_match(C, MatchId(2));

        assert_eq!(game.select_match(B, MatchId(1)), SelectOutcome::Selected);
        assert_eq!(
            game.selection(),
            Some(Selection {
                item: B,
                match_id: MatchId(1)
            })
        );

        game.advance(MISMATCH_RESET_DELAY);
        assert_eq!(game.item_state(A), ItemState::Unselected);
        assert_eq!(game.item_state(C), ItemState::Unselected);
        assert_eq!(game.item_state(B), ItemState::Selected);
        assert_eq!(game.selection().map(|s| s.item), Some(B));

        assert_eq!(
            game.select_match(A, MatchId(1)),
            SelectOutcome::Matched { complete: false }
        );
    }

    #[test]
    fn stale_reset_leaves_reselected_item_alone() {
        let mut game = game(2);
        game.select_match(A, MatchId(1));
        game.select_match(C, MatchId(2));

        // A is picked again before its reset fires
        game.select_match(A, MatchId(1));
        game.advance(MISMATCH_RESET_DELAY);

        assert_eq!(game.item_state(A), ItemState::Selected);
        assert_eq!(game.item_state(C), ItemState::Unselected);
        assert_eq!(game.selection().map(|s| s.item), Some(A));
    }

    #[test]
    fn stale_reset_never_unmatches() {
        let mut game = game(2);
        game.select_match(A, MatchId(1));
        game.select_match(C, MatchId(2));
        game.select_match(C, MatchId(2));
        game.select_match(D, MatchId(2));

        game.advance(MISMATCH_RESET_DELAY);

        assert_eq!(game.item_state(C), ItemState::Matched);
        assert_eq!(game.item_state(D), ItemState::Matched);
        assert_eq!(game.item_state(A), ItemState::Unselected);
        assert_eq!(game.progress().matched_pairs, 1);
    }

    #[test]
    fn progress_never_exceeds_total() {
        let mut game = game(1);
        let picks = [
            (A, 1),
            (B, 1),
            (C, 1),
            (D, 1),
            (ItemId(5), 1),
            (ItemId(6), 1),
        ];

        let mut last = 0;
        for (item, id) in picks {
            game.select_match(item, MatchId(id));
            let matched = game.progress().matched_pairs;
            assert!(matched >= last);
            assert!(matched <= 1);
            last = matched;
        }
    }

    #[test]
    fn snapshot_lists_touched_items() {
        let mut game = game(2);
        game.select_match(A, MatchId(1));
        game.select_match(B, MatchId(1));
        game.select_match(D, MatchId(2));

        let snapshot = game.snapshot();
        assert_eq!(
            snapshot.items,
            vec![
                (A, ItemState::Matched),
                (B, ItemState::Matched),
                (D, ItemState::Selected)
            ]
        );
        assert_eq!(snapshot.selection.map(|s| s.item), Some(D));
    }
}
