//! Display configuration: board orientation, card rotation, container width.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Container width assumed until the first measurement arrives.
pub const PLACEHOLDER_WIDTH: f32 = 200.0;

/// Which axis the board grows along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutOrientation {
    /// Three columns, rows grow downward
    #[default]
    Portrait,
    /// Three rows, columns grow rightward
    Landscape,
}

impl LayoutOrientation {
    /// The other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Portrait => Self::Landscape,
            Self::Landscape => Self::Portrait,
        }
    }

    /// Whether this is landscape.
    #[must_use]
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Landscape)
    }

    /// Persisted name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl fmt::Display for LayoutOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutOrientation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => Err(ConfigError::InvalidSetting {
                key: "layout".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Whether cards are drawn upright or turned a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardOrientation {
    /// Unrotated, wider than tall
    #[default]
    Vertical,
    /// Rotated 90 degrees
    Horizontal,
}

impl CardOrientation {
    /// The other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Whether cards are rotated.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// Rotation applied to every card, in degrees.
    #[must_use]
    pub const fn rotation_degrees(self) -> f32 {
        match self {
            Self::Vertical => 0.0,
            Self::Horizontal => 90.0,
        }
    }

    /// Persisted name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for CardOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardOrientation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(ConfigError::InvalidSetting {
                key: "orientation".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Everything about the display that feeds the layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Board orientation
    pub layout: LayoutOrientation,
    /// Card rotation
    pub card: CardOrientation,
    /// Measured container width; `None` before the first measurement
    pub container_width: Option<f32>,
}

impl DisplayConfig {
    /// Create a config with an unmeasured container.
    #[must_use]
    pub const fn new(layout: LayoutOrientation, card: CardOrientation) -> Self {
        Self {
            layout,
            card,
            container_width: None,
        }
    }

    /// Set the measured container width.
    #[must_use]
    pub const fn with_width(mut self, width: f32) -> Self {
        self.container_width = Some(width);
        self
    }

    /// Measured width, or `placeholder` if none has arrived.
    #[must_use]
    pub fn width_or(&self, placeholder: f32) -> f32 {
        self.container_width.unwrap_or(placeholder)
    }

    /// Record a resize observation.
    pub fn observe_width(&mut self, width: f32) {
        self.container_width = Some(width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_are_involutions() {
        for layout in [LayoutOrientation::Portrait, LayoutOrientation::Landscape] {
            assert_eq!(layout.toggled().toggled(), layout);
            assert_ne!(layout.toggled(), layout);
        }
        for card in [CardOrientation::Vertical, CardOrientation::Horizontal] {
            assert_eq!(card.toggled().toggled(), card);
        }
    }

    #[test]
    fn test_parse_round_trip_names() {
        assert_eq!(
            "landscape".parse::<LayoutOrientation>().unwrap(),
            LayoutOrientation::Landscape
        );
        assert_eq!(
            "horizontal".parse::<CardOrientation>().unwrap(),
            CardOrientation::Horizontal
        );
        assert_eq!(CardOrientation::Vertical.to_string(), "vertical");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "sideways".parse::<CardOrientation>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { ref key, .. } if key == "orientation"));
    }

    #[test]
    fn test_placeholder_width_before_measurement() {
        let mut config = DisplayConfig::default();
        assert_eq!(config.width_or(PLACEHOLDER_WIDTH), PLACEHOLDER_WIDTH);
        assert_eq!(config.width_or(240.0), 240.0);
        config.observe_width(320.0);
        assert_eq!(config.width_or(PLACEHOLDER_WIDTH), 320.0);
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(CardOrientation::Vertical.rotation_degrees(), 0.0);
        assert_eq!(CardOrientation::Horizontal.rotation_degrees(), 90.0);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LayoutOrientation::Landscape).unwrap();
        assert_eq!(json, "\"landscape\"");
    }
}
