//! Per-card target states for one board recomputation.

use crate::params::LayoutParams;
use crate::sizer::{GridGeometry, GridSizer};
use serde::{Deserialize, Serialize};
use setgrid_core::{
    AnimationDriver, BoardError, BoardState, CardId, CardUniverse, CardVisualState,
    DisplayConfig, LayoutOrientation, Point, Rect, SelectionState, Size, VisualMap,
};
use tracing::debug;

/// Direction of the line separating the chain prefix from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DividerOrientation {
    /// Runs left to right (portrait boards)
    Horizontal,
    /// Runs top to bottom (landscape boards)
    Vertical,
}

/// Placement of the chain divider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainDivider {
    /// Line direction
    pub orientation: DividerOrientation,
    /// Distance from the top (horizontal) or left (vertical) edge
    pub offset: f32,
}

/// Placement of the "cards remaining" caption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// Cards left in the deck
    pub remaining: usize,
    /// Distance from the left edge
    pub left: f32,
    /// Distance from the bottom edge of the outer board
    pub bottom: f32,
}

/// Everything a renderer needs for one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Grid dimensions
    pub geometry: GridGeometry,
    /// Target rotation for every card, in degrees
    pub rotation: f32,
    /// Target state of every card in the universe
    pub cards: VisualMap,
    /// Chain divider, when a matched prefix is shown
    pub divider: Option<ChainDivider>,
    /// Remaining-count caption
    pub caption: Caption,
    /// Grid container plus the caption strip
    pub outer_height: f32,
}

impl BoardLayout {
    /// The grid container.
    #[must_use]
    pub fn container_bounds(&self) -> Rect {
        self.geometry.bounds()
    }

    /// Cards left in the deck.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.caption.remaining
    }

    /// Target state of one card.
    #[must_use]
    pub fn get(&self, card: CardId) -> Option<&CardVisualState> {
        self.cards.get(&card)
    }

    /// On-screen box a card occupies at its target, rotation applied.
    #[must_use]
    pub fn target_rect(&self, card: CardId) -> Option<Rect> {
        let state = self.cards.get(&card)?;
        let rect = Rect::from_origin_size(
            state.position,
            Size::new(self.geometry.card_width, self.geometry.card_height),
        );
        Some(if self.geometry.card.is_horizontal() {
            rect.rotated_quarter()
        } else {
            rect
        })
    }

    /// Hand the targets to an animation driver.
    pub fn retarget(&self, driver: &mut AnimationDriver) {
        driver.set_targets(&self.cards, self.rotation);
    }
}

/// Computes target visual states from game and display state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutEngine {
    sizer: GridSizer,
}

impl LayoutEngine {
    /// Create an engine.
    #[must_use]
    pub const fn new(params: LayoutParams) -> Self {
        Self {
            sizer: GridSizer::new(params),
        }
    }

    /// The sizer in use.
    #[must_use]
    pub const fn sizer(&self) -> &GridSizer {
        &self.sizer
    }

    /// Like [`compute`](Self::compute), but reports inconsistent board
    /// state instead of asserting.
    pub fn try_compute(
        &self,
        universe: &CardUniverse,
        state: &BoardState,
        selection: &SelectionState,
        display: &DisplayConfig,
    ) -> Result<BoardLayout, BoardError> {
        state.validate(universe)?;
        Ok(self.layout(universe, state, selection, display))
    }

    /// Compute the target state of every card.
    ///
    /// # Panics
    ///
    /// In debug builds, if the board references unknown or duplicate cards.
    #[must_use]
    pub fn compute(
        &self,
        universe: &CardUniverse,
        state: &BoardState,
        selection: &SelectionState,
        display: &DisplayConfig,
    ) -> BoardLayout {
        if cfg!(debug_assertions) {
            if let Err(err) = state.validate(universe) {
                panic!("inconsistent board state: {err}");
            }
        }
        self.layout(universe, state, selection, display)
    }

    fn layout(
        &self,
        universe: &CardUniverse,
        state: &BoardState,
        selection: &SelectionState,
        display: &DisplayConfig,
    ) -> BoardLayout {
        let board = state.board();
        let has_prefix = state.has_chain_prefix();
        let geometry = self.sizer.compute(board.len(), has_prefix, display);
        let mut cards = VisualMap::new();

        for (index, &card) in board.iter().enumerate() {
            let target = CardVisualState::on_board(
                geometry.slot_position(index),
                selection.is_hinted(card),
                selection.is_selected(card),
            );
            cards.insert(card, target);
        }

        // Waiting cards sit past the trailing edge, played ones past the leading edge.
        let parked_y = geometry.parked_y();
        let waiting = Point::new(geometry.container_width, parked_y);
        for &card in state.unplayed() {
            cards.insert(card, CardVisualState::off_board(waiting));
        }
        let retired = Point::new(-geometry.card_width, parked_y);
        for &card in universe.cards() {
            cards
                .entry(card)
                .or_insert_with(|| CardVisualState::off_board(retired));
        }

        let footprint = geometry.footprint();
        let divider = has_prefix.then(|| match geometry.layout {
            LayoutOrientation::Portrait => ChainDivider {
                orientation: DividerOrientation::Horizontal,
                offset: footprint.height + geometry.padding + geometry.line_spacing / 2.0,
            },
            LayoutOrientation::Landscape => ChainDivider {
                orientation: DividerOrientation::Vertical,
                offset: footprint.width + geometry.padding + geometry.line_spacing / 2.0,
            },
        });

        let caption = Caption {
            remaining: state.remaining(),
            left: if has_prefix && geometry.layout.is_landscape() {
                geometry.padding + footprint.width / 2.0
            } else {
                0.0
            },
            bottom: geometry.padding,
        };

        debug!(
            slots = board.len(),
            rows = geometry.rows,
            cols = geometry.cols,
            card_width = geometry.card_width,
            card_height = geometry.card_height,
            remaining = caption.remaining,
            "layout computed"
        );

        BoardLayout {
            geometry,
            rotation: display.card.rotation_degrees(),
            cards,
            divider,
            caption,
            outer_height: geometry.container_height + self.sizer.params().caption_height,
        }
    }
}
