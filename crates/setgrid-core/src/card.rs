//! Card identity, board partitions and selection state.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque identity of one physical card.
///
/// Two cards with identical traits are still distinct cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Game variant. Only chain mode changes the board geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Plain board
    #[default]
    Normal,
    /// The last matched set stays visible ahead of the board
    Chain,
}

impl GameMode {
    /// Whether the last matched set is shown as a board prefix.
    #[must_use]
    pub const fn is_chain(self) -> bool {
        matches!(self, Self::Chain)
    }
}

/// Every card that exists in one game mode, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardUniverse {
    cards: Vec<CardId>,
}

impl CardUniverse {
    /// Wrap an ordered list of cards.
    #[must_use]
    pub fn new(cards: Vec<CardId>) -> Self {
        Self { cards }
    }

    /// Cards `0..count` in order.
    #[must_use]
    pub fn sequential(count: u32) -> Self {
        Self::new((0..count).map(CardId).collect())
    }

    /// The cards.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether there are no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }
}

impl FromIterator<CardId> for CardUniverse {
    fn from_iter<T: IntoIterator<Item = CardId>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Deck generation, owned by the game rules.
pub trait CardSource {
    /// The full card universe for a game mode.
    fn generate_cards(&self, mode: GameMode) -> CardUniverse;
}

/// The dealt state of a game, as owned by the game-state controller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardState {
    /// Remaining deck; the first `board_size` cards are in play
    pub deck: Vec<CardId>,
    /// Number of in-play slots
    pub board_size: usize,
    /// Most recently matched set
    pub last_set: Vec<CardId>,
    /// Game variant
    pub mode: GameMode,
}

impl BoardState {
    /// Create a normal-mode board.
    #[must_use]
    pub fn new(deck: Vec<CardId>, board_size: usize) -> Self {
        Self {
            deck,
            board_size,
            last_set: Vec::new(),
            mode: GameMode::Normal,
        }
    }

    /// Switch to chain mode with the given matched prefix.
    #[must_use]
    pub fn with_chain(mut self, last_set: Vec<CardId>) -> Self {
        self.mode = GameMode::Chain;
        self.last_set = last_set;
        self
    }

    /// Cards currently dealt onto the board.
    #[must_use]
    pub fn in_play(&self) -> &[CardId] {
        &self.deck[..self.board_size.min(self.deck.len())]
    }

    /// Cards still waiting in the deck.
    #[must_use]
    pub fn unplayed(&self) -> &[CardId] {
        &self.deck[self.board_size.min(self.deck.len())..]
    }

    /// The matched prefix shown ahead of the board (chain mode only).
    #[must_use]
    pub fn chain_prefix(&self) -> &[CardId] {
        if self.mode.is_chain() {
            &self.last_set
        } else {
            &[]
        }
    }

    /// Whether a chain divider is drawn.
    #[must_use]
    pub fn has_chain_prefix(&self) -> bool {
        !self.chain_prefix().is_empty()
    }

    /// Visible slots in display order: chain prefix, then in-play cards.
    #[must_use]
    pub fn board(&self) -> Vec<CardId> {
        self.chain_prefix()
            .iter()
            .chain(self.in_play())
            .copied()
            .collect()
    }

    /// Number of cards left in the deck.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.unplayed().len()
    }

    /// Check that the partitions are disjoint and drawn from `universe`.
    pub fn validate(&self, universe: &CardUniverse) -> Result<(), BoardError> {
        let known: BTreeSet<CardId> = universe.cards().iter().copied().collect();
        let mut seen = BTreeSet::new();
        for &card in self.chain_prefix().iter().chain(&self.deck) {
            if !known.contains(&card) {
                return Err(BoardError::UnknownCard(card));
            }
            if !seen.insert(card) {
                return Err(BoardError::DuplicateCard(card));
            }
        }
        Ok(())
    }
}

/// Selection and hint state, owned by the game-state controller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    /// Currently selected cards
    pub selected: Vec<CardId>,
    /// Suggested answer, if the player asked for a hint
    pub hinted: Option<Vec<CardId>>,
}

impl SelectionState {
    /// Whether the card is selected.
    #[must_use]
    pub fn is_selected(&self, card: CardId) -> bool {
        self.selected.contains(&card)
    }

    /// Whether the card belongs to the hint set.
    #[must_use]
    pub fn is_hinted(&self, card: CardId) -> bool {
        self.hinted.as_ref().is_some_and(|hint| hint.contains(&card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<u32>) -> Vec<CardId> {
        range.map(CardId).collect()
    }

    #[test]
    fn test_board_partitions() {
        let board = BoardState::new(ids(0..20), 12);
        assert_eq!(board.in_play(), ids(0..12).as_slice());
        assert_eq!(board.unplayed(), ids(12..20).as_slice());
        assert_eq!(board.remaining(), 8);
        assert!(board.chain_prefix().is_empty());
        assert_eq!(board.board(), ids(0..12));
    }

    #[test]
    fn test_board_size_beyond_deck_is_clamped() {
        let board = BoardState::new(ids(0..5), 12);
        assert_eq!(board.in_play().len(), 5);
        assert_eq!(board.remaining(), 0);
    }

    #[test]
    fn test_chain_prefix_only_in_chain_mode() {
        let mut board = BoardState::new(ids(3..15), 12);
        board.last_set = ids(0..3);
        assert!(!board.has_chain_prefix());
        assert_eq!(board.board().len(), 12);

        let board = board.clone().with_chain(ids(0..3));
        assert!(board.has_chain_prefix());
        assert_eq!(board.board()[..3], ids(0..3)[..]);
        assert_eq!(board.board()[3], CardId(3));
    }

    #[test]
    fn test_validate_ok() {
        let universe = CardUniverse::sequential(81);
        let board = BoardState::new(ids(3..30), 12).with_chain(ids(0..3));
        assert_eq!(board.validate(&universe), Ok(()));
    }

    #[test]
    fn test_validate_duplicate_between_prefix_and_deck() {
        let universe = CardUniverse::sequential(81);
        let board = BoardState::new(ids(2..30), 12).with_chain(ids(0..3));
        assert_eq!(
            board.validate(&universe),
            Err(BoardError::DuplicateCard(CardId(2)))
        );
    }

    #[test]
    fn test_validate_unknown_card() {
        let universe = CardUniverse::sequential(10);
        let board = BoardState::new(ids(0..12), 12);
        assert_eq!(
            board.validate(&universe),
            Err(BoardError::UnknownCard(CardId(10)))
        );
    }

    #[test]
    fn test_selection_flags() {
        let selection = SelectionState {
            selected: vec![CardId(1)],
            hinted: Some(vec![CardId(2), CardId(3), CardId(4)]),
        };
        assert!(selection.is_selected(CardId(1)));
        assert!(!selection.is_selected(CardId(2)));
        assert!(selection.is_hinted(CardId(3)));
        assert!(!SelectionState::default().is_hinted(CardId(3)));
    }

    #[test]
    fn test_card_identity_not_value() {
        let universe: CardUniverse = [CardId(5), CardId(6)].into_iter().collect();
        assert!(universe.contains(CardId(5)));
        assert_ne!(CardId(5), CardId(6));
        assert_eq!(CardId(5).to_string(), "#5");
    }
}
