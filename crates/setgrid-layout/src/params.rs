//! Tunable layout constants.

use serde::{Deserialize, Serialize};
use setgrid_core::{ConfigError, PLACEHOLDER_WIDTH};

/// Constants shared by the sizer and the layout engine.
///
/// Every field has a default, so a TOML file only needs the values it
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutParams {
    /// Gap between the container edge and the grid, in pixels
    pub padding: f32,
    /// Long side over short side of an unrotated card
    pub aspect_ratio: f32,
    /// Minimum number of lanes along the growth axis
    pub min_growth: usize,
    /// Divider spacing as a multiple of the padding
    pub divider_factor: f32,
    /// Height of the remaining-count strip under the grid
    pub caption_height: f32,
    /// Width assumed before the container has been measured
    pub placeholder_width: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            padding: 8.0,
            aspect_ratio: 1.6,
            min_growth: 4,
            divider_factor: 2.0,
            caption_height: 19.0,
            placeholder_width: PLACEHOLDER_WIDTH,
        }
    }
}

impl LayoutParams {
    /// Set the padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the card aspect ratio.
    #[must_use]
    pub const fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Spacing inserted after the chain prefix.
    #[must_use]
    pub fn divider_spacing(&self) -> f32 {
        self.divider_factor * self.padding
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject values the sizer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("padding", self.padding),
            ("divider_factor", self.divider_factor),
            ("caption_height", self.caption_height),
            ("placeholder_width", self.placeholder_width),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidLayoutParams(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio < 1.0 {
            return Err(ConfigError::InvalidLayoutParams(format!(
                "aspect_ratio must be at least 1, got {}",
                self.aspect_ratio
            )));
        }
        if self.min_growth == 0 {
            return Err(ConfigError::InvalidLayoutParams("min_growth must be at least 1".into()));
        }
        Ok(())
    }
}
