//! Per-card visual targets and card-face metrics.

use crate::card::CardId;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target visual state of one card for one recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardVisualState {
    /// Top-left of the unrotated card box
    pub position: Point,
    /// Either 0.0 or 1.0
    pub opacity: f32,
    /// Part of the suggested answer
    pub hinted: bool,
    /// Currently selected
    pub active: bool,
    /// Occupies a visible slot and accepts selection
    pub in_play: bool,
}

impl CardVisualState {
    /// A visible board slot.
    #[must_use]
    pub const fn on_board(position: Point, hinted: bool, active: bool) -> Self {
        Self {
            position,
            opacity: 1.0,
            hinted,
            active,
            in_play: true,
        }
    }

    /// Parked outside the container, invisible and inert.
    #[must_use]
    pub const fn off_board(position: Point) -> Self {
        Self {
            position,
            opacity: 0.0,
            hinted: false,
            active: false,
            in_play: false,
        }
    }

    /// Whether pointer selection may reach this card.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.in_play && self.opacity > 0.0
    }
}

/// Identity-keyed visual states, rebuilt from scratch on every recomputation.
pub type VisualMap = BTreeMap<CardId, CardVisualState>;

/// Inner measurements of a card face for a given card width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFaceMetrics {
    /// Outer card width
    pub width: u32,
    /// Outer card height
    pub height: u32,
    /// Margin on every side, also used as the corner radius
    pub margin: u32,
    /// Width inside the margin
    pub content_width: u32,
    /// Height inside the margin
    pub content_height: u32,
    /// Width of one symbol; symbols are twice as tall
    pub symbol_size: u32,
}

impl CardFaceMetrics {
    /// Derive face metrics from the unrotated card width.
    #[must_use]
    pub fn for_width(width: u32, aspect_ratio: f64) -> Self {
        let height = (f64::from(width) / aspect_ratio).round() as u32;
        let margin = (f64::from(width) * 0.035).round() as u32;
        let content_width = width.saturating_sub(2 * margin);
        let content_height = height.saturating_sub(2 * margin);
        let symbol_size = (f64::from(content_height) * 0.36).round() as u32;
        Self {
            width,
            height,
            margin,
            content_width,
            content_height,
            symbol_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_board_is_interactive() {
        let state = CardVisualState::on_board(Point::new(8.0, 8.0), true, false);
        assert!(state.is_interactive());
        assert_eq!(state.opacity, 1.0);
        assert!(state.hinted);
    }

    #[test]
    fn test_off_board_is_inert() {
        let state = CardVisualState::off_board(Point::new(-61.0, 65.0));
        assert!(!state.is_interactive());
        assert_eq!(state.opacity, 0.0);
        assert!(!state.hinted && !state.active);
    }

    #[test]
    fn test_face_metrics() {
        let face = CardFaceMetrics::for_width(112, 1.6);
        assert_eq!(face.height, 70);
        assert_eq!(face.margin, 4);
        assert_eq!(face.content_width, 104);
        assert_eq!(face.content_height, 62);
        assert_eq!(face.symbol_size, 22);
    }

    #[test]
    fn test_face_metrics_tiny_card() {
        let face = CardFaceMetrics::for_width(0, 1.6);
        assert_eq!(face.content_width, 0);
        assert_eq!(face.symbol_size, 0);
    }
}
