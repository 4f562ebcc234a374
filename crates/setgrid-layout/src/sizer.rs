//! Grid dimensions for a given card count and display configuration.

use crate::params::LayoutParams;
use serde::{Deserialize, Serialize};
use setgrid_core::{CardOrientation, DisplayConfig, LayoutOrientation, Point, Rect, Size};

/// Lanes perpendicular to the growth axis. A chain prefix fills exactly one.
pub const LANES: usize = 3;

/// Computed grid dimensions.
///
/// `card_width` and `card_height` always describe the unrotated card; a
/// horizontal card occupies a `card_height × card_width` box on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Lanes perpendicular to the growth axis
    pub lanes: usize,
    /// Unrotated card width
    pub card_width: f32,
    /// Unrotated card height
    pub card_height: f32,
    /// Width the grid was fitted into
    pub container_width: f32,
    /// Height of the grid area, padding and divider included
    pub container_height: f32,
    /// Divider spacing after the chain prefix, 0 without one
    pub line_spacing: f32,
    /// Edge padding
    pub padding: f32,
    /// Board orientation
    pub layout: LayoutOrientation,
    /// Card rotation
    pub card: CardOrientation,
}

impl GridGeometry {
    /// Number of slots the grid can show.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// On-screen box of one slot, rotation applied.
    #[must_use]
    pub fn footprint(&self) -> Size {
        let size = Size::new(self.card_width, self.card_height);
        if self.card.is_horizontal() {
            size.transposed()
        } else {
            size
        }
    }

    /// The grid container, origin at its top-left corner.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.container_width, self.container_height)
    }

    /// Target top-left of slot `index` in display order.
    ///
    /// The position is that of the unrotated card box; for horizontal cards
    /// it is offset so the box lands in its slot after a quarter turn about
    /// its center.
    #[must_use]
    pub fn slot_position(&self, index: usize) -> Point {
        let (row, col) = match self.layout {
            LayoutOrientation::Portrait => (index / self.lanes, index % self.lanes),
            LayoutOrientation::Landscape => (index % self.lanes, index / self.lanes),
        };
        let (row, col) = (row as f32, col as f32);
        let p = self.padding;

        let (mut x, mut y) = match self.card {
            CardOrientation::Vertical => (self.card_width * col + p, self.card_height * row + p),
            CardOrientation::Horizontal => {
                let delta = (self.card_width - self.card_height) / 2.0;
                (
                    self.card_height * col + p - delta,
                    self.card_width * row + p + delta,
                )
            }
        };

        if index >= self.lanes {
            match self.layout {
                LayoutOrientation::Portrait => y += self.line_spacing,
                LayoutOrientation::Landscape => x += self.line_spacing,
            }
        }
        Point::new(x, y)
    }

    /// Vertical position shared by every parked card.
    #[must_use]
    pub fn parked_y(&self) -> f32 {
        self.container_height / 2.0 - self.card_height / 2.0
    }
}

/// Derives grid dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridSizer {
    params: LayoutParams,
}

impl GridSizer {
    /// Create a sizer.
    #[must_use]
    pub const fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    /// Layout constants in use.
    #[must_use]
    pub const fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Fit `num_cards` slots into the configured container width.
    #[must_use]
    pub fn compute(
        &self,
        num_cards: usize,
        has_chain_prefix: bool,
        display: &DisplayConfig,
    ) -> GridGeometry {
        let params = &self.params;
        let growth = num_cards.div_ceil(LANES).max(params.min_growth).max(1);
        let (rows, cols) = match display.layout {
            LayoutOrientation::Portrait => (growth, LANES),
            LayoutOrientation::Landscape => (LANES, growth),
        };

        let line_spacing = if has_chain_prefix {
            params.divider_spacing()
        } else {
            0.0
        };
        let (spacing_x, spacing_y) = match display.layout {
            LayoutOrientation::Portrait => (0.0, line_spacing),
            LayoutOrientation::Landscape => (line_spacing, 0.0),
        };

        let container_width = display.width_or(params.placeholder_width);
        let available = (container_width - 2.0 * params.padding - spacing_x).max(0.0);
        let lane_size = (available / cols as f32).floor();

        let (card_width, card_height, principal) = match display.card {
            CardOrientation::Vertical => {
                let height = (lane_size / params.aspect_ratio).round();
                (lane_size, height, height)
            }
            CardOrientation::Horizontal => {
                let width = (lane_size * params.aspect_ratio).round();
                (width, lane_size, width)
            }
        };

        GridGeometry {
            rows,
            cols,
            lanes: LANES,
            card_width,
            card_height,
            container_width,
            container_height: rows as f32 * principal + 2.0 * params.padding + spacing_y,
            line_spacing,
            padding: params.padding,
            layout: display.layout,
            card: display.card,
        }
    }
}
