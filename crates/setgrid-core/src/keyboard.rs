//! Shortcut layouts mapping physical keys to board slots.
//!
//! Each layout carries one key sequence per board orientation. The key at
//! position `i` selects visible slot `i`. Portrait sequences read row by row
//! (three keys per row), landscape sequences read column by column, so the
//! keys sit on the keyboard roughly where the cards sit on screen.
//!
//! Custom tables can be loaded from TOML or YAML:
//!
//! ```toml
//! [layouts.Custom]
//! portrait = "123qweasdzxcrtyfghvbn"
//! landscape = "qazwsxedcrfvtgbyhnujm"
//! orientation_key = ";"
//! layout_key = "'"
//! ```

use crate::display::LayoutOrientation;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Built-in regional layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum KeyboardLayoutId {
    /// US/UK QWERTY
    #[default]
    #[serde(rename = "QWERTY")]
    Qwerty,
    /// French AZERTY
    #[serde(rename = "AZERTY")]
    Azerty,
    /// German QWERTZ
    #[serde(rename = "QWERTZ")]
    Qwertz,
    /// Dvorak
    Dvorak,
    /// Colemak
    Colemak,
}

impl KeyboardLayoutId {
    /// All built-in layouts.
    pub const ALL: [Self; 5] = [
        Self::Qwerty,
        Self::Azerty,
        Self::Qwertz,
        Self::Dvorak,
        Self::Colemak,
    ];

    /// Persisted identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qwerty => "QWERTY",
            Self::Azerty => "AZERTY",
            Self::Qwertz => "QWERTZ",
            Self::Dvorak => "Dvorak",
            Self::Colemak => "Colemak",
        }
    }

    /// The shortcut table for this layout.
    #[must_use]
    pub fn layout(self) -> KeyboardLayout {
        let (portrait, landscape, orientation_key, layout_key) = match self {
            Self::Qwerty => ("123qweasdzxcrtyfghvbn", "qazwsxedcrfvtgbyhnujm", ';', '\''),
            Self::Azerty => ("&é\"azeqsdwxcrtyfghvbn", "aqwzsxedcrfvtgbyhnuj,", 'm', 'ù'),
            Self::Qwertz => ("123qweasdyxcrtzfghvbn", "qaywsxedcrfvtgbzhnujm", 'ö', 'ä'),
            Self::Dvorak => ("123',.aoe;qjpyfuidkxb", "'a;,oq.ejpukyixfdbghm", 's', '-'),
            Self::Colemak => ("123qwfarszxcpgjtdhvbk", "qazwrxfscptvgdbjhklnm", 'o', ';'),
        };
        KeyboardLayout::new(portrait, landscape, orientation_key, layout_key)
    }
}

impl fmt::Display for KeyboardLayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyboardLayoutId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownKeyboardLayout(s.to_string()))
    }
}

/// Shortcut keys for board slots plus the two toggle keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    /// Slot keys for the portrait board, row by row
    pub portrait: String,
    /// Slot keys for the landscape board, column by column
    pub landscape: String,
    /// Rotates cards
    pub orientation_key: char,
    /// Switches portrait/landscape
    pub layout_key: char,
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        KeyboardLayoutId::default().layout()
    }
}

impl KeyboardLayout {
    /// Create a layout.
    #[must_use]
    pub fn new(
        portrait: impl Into<String>,
        landscape: impl Into<String>,
        orientation_key: char,
        layout_key: char,
    ) -> Self {
        Self {
            portrait: portrait.into(),
            landscape: landscape.into(),
            orientation_key,
            layout_key,
        }
    }

    /// Key sequence for the given board orientation.
    #[must_use]
    pub fn shortcuts(&self, layout: LayoutOrientation) -> &str {
        match layout {
            LayoutOrientation::Portrait => &self.portrait,
            LayoutOrientation::Landscape => &self.landscape,
        }
    }

    /// Slot index bound to `key` in the given orientation.
    #[must_use]
    pub fn slot_for(&self, layout: LayoutOrientation, key: char) -> Option<usize> {
        self.shortcuts(layout).chars().position(|c| c == key)
    }

    /// Key bound to slot `index` in the given orientation.
    #[must_use]
    pub fn key_for(&self, layout: LayoutOrientation, index: usize) -> Option<char> {
        self.shortcuts(layout).chars().nth(index)
    }

    /// Check the table is unambiguous.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidKeyboardLayout {
            name: name.to_string(),
            reason,
        };

        if self.orientation_key == self.layout_key {
            return Err(invalid(format!(
                "orientation and layout toggles share the key {:?}",
                self.orientation_key
            )));
        }
        for toggle in [self.orientation_key, self.layout_key] {
            if !is_lowercase(toggle) {
                return Err(invalid(format!("toggle key {toggle:?} is not lowercase")));
            }
        }

        for orientation in [LayoutOrientation::Portrait, LayoutOrientation::Landscape] {
            let sequence = self.shortcuts(orientation);
            if sequence.is_empty() {
                return Err(invalid(format!("{orientation} sequence is empty")));
            }
            let mut seen = BTreeSet::new();
            for c in sequence.chars() {
                if !is_lowercase(c) {
                    return Err(invalid(format!("{orientation} key {c:?} is not lowercase")));
                }
                if !seen.insert(c) {
                    return Err(invalid(format!("{orientation} key {c:?} is bound twice")));
                }
                if c == self.orientation_key || c == self.layout_key {
                    return Err(invalid(format!(
                        "{orientation} key {c:?} is also a toggle key"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn is_lowercase(c: char) -> bool {
    let mut lower = c.to_lowercase();
    lower.next() == Some(c) && lower.next().is_none()
}

/// Named shortcut layouts, built-in or loaded from a file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyboardLayoutTable {
    /// Layouts by name
    pub layouts: BTreeMap<String, KeyboardLayout>,
}

impl KeyboardLayoutTable {
    /// The built-in regional layouts.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            layouts: KeyboardLayoutId::ALL
                .into_iter()
                .map(|id| (id.as_str().to_string(), id.layout()))
                .collect(),
        }
    }

    /// Parse and validate a TOML table.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let table: Self = toml::from_str(source)?;
        table.validate()?;
        Ok(table)
    }

    /// Parse and validate a YAML table.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let table: Self = serde_yaml_ng::from_str(source)?;
        table.validate()?;
        Ok(table)
    }

    /// Add every layout of `other`, replacing same-named entries.
    pub fn merge(&mut self, other: Self) {
        self.layouts.extend(other.layouts);
    }

    /// Validate every layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layouts
            .iter()
            .try_for_each(|(name, layout)| layout.validate(name))
    }

    /// Look up a layout by name.
    pub fn get(&self, name: &str) -> Result<&KeyboardLayout, ConfigError> {
        self.layouts
            .get(name)
            .ok_or_else(|| ConfigError::UnknownKeyboardLayout(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layouts_are_valid() {
        for id in KeyboardLayoutId::ALL {
            let layout = id.layout();
            layout.validate(id.as_str()).unwrap();
            assert_eq!(layout.portrait.chars().count(), 21, "{id} portrait");
            assert_eq!(layout.landscape.chars().count(), 21, "{id} landscape");
        }
    }

    #[test]
    fn test_slot_lookup() {
        let qwerty = KeyboardLayoutId::Qwerty.layout();
        assert_eq!(qwerty.slot_for(LayoutOrientation::Portrait, '1'), Some(0));
        assert_eq!(qwerty.slot_for(LayoutOrientation::Portrait, 'q'), Some(3));
        assert_eq!(qwerty.slot_for(LayoutOrientation::Landscape, 'q'), Some(0));
        assert_eq!(qwerty.slot_for(LayoutOrientation::Landscape, 'w'), Some(3));
        assert_eq!(qwerty.slot_for(LayoutOrientation::Portrait, ';'), None);
        assert_eq!(qwerty.key_for(LayoutOrientation::Portrait, 20), Some('n'));
        assert_eq!(qwerty.key_for(LayoutOrientation::Portrait, 21), None);
    }

    #[test]
    fn test_slot_lookup_counts_chars_not_bytes() {
        let azerty = KeyboardLayoutId::Azerty.layout();
        assert_eq!(azerty.slot_for(LayoutOrientation::Portrait, 'é'), Some(1));
        assert_eq!(azerty.slot_for(LayoutOrientation::Portrait, '"'), Some(2));
        assert_eq!(azerty.slot_for(LayoutOrientation::Portrait, 'a'), Some(3));
    }

    #[test]
    fn test_layout_id_parse() {
        assert_eq!("qwertz".parse::<KeyboardLayoutId>().unwrap(), KeyboardLayoutId::Qwertz);
        assert_eq!("Dvorak".parse::<KeyboardLayoutId>().unwrap(), KeyboardLayoutId::Dvorak);
        let err = "Klingon".parse::<KeyboardLayoutId>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKeyboardLayout(ref s) if s == "Klingon"));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let layout = KeyboardLayout::new("qwq", "abc", ';', '\'');
        let err = layout.validate("broken").unwrap_err();
        assert!(err.to_string().contains("bound twice"));
    }

    #[test]
    fn test_validate_rejects_toggle_in_sequence() {
        let layout = KeyboardLayout::new("qw;", "abc", ';', '\'');
        assert!(layout.validate("broken").is_err());
    }

    #[test]
    fn test_validate_rejects_uppercase_and_shared_toggle() {
        assert!(KeyboardLayout::new("qwE", "abc", ';', '\'').validate("x").is_err());
        assert!(KeyboardLayout::new("qwe", "abc", 'M', '\'').validate("x").is_err());
        assert!(KeyboardLayout::new("qwe", "abc", ';', ';').validate("x").is_err());
        assert!(KeyboardLayout::new("", "abc", ';', '\'').validate("x").is_err());
    }

    #[test]
    fn test_table_from_toml() {
        let source = r#"
[layouts.Numpad]
portrait = "789456123"
landscape = "741852963"
orientation_key = "o"
layout_key = "l"
"#;
        let table = KeyboardLayoutTable::from_toml_str(source).unwrap();
        let numpad = table.get("Numpad").unwrap();
        assert_eq!(numpad.slot_for(LayoutOrientation::Portrait, '1'), Some(6));
        assert!(table.get("QWERTY").is_err());
    }

    #[test]
    fn test_table_from_yaml() {
        let source = "layouts:\n  Tiny:\n    portrait: abc\n    landscape: cba\n    orientation_key: x\n    layout_key: y\n";
        let table = KeyboardLayoutTable::from_yaml_str(source).unwrap();
        assert_eq!(table.get("Tiny").unwrap().layout_key, 'y');
    }

    #[test]
    fn test_table_rejects_invalid_layout() {
        let source = r#"
[layouts.Bad]
portrait = "aab"
landscape = "abc"
orientation_key = "o"
layout_key = "l"
"#;
        let err = KeyboardLayoutTable::from_toml_str(source).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyboardLayout { ref name, .. } if name == "Bad"));
    }

    #[test]
    fn test_table_merge_overrides_standard() {
        let mut table = KeyboardLayoutTable::standard();
        assert_eq!(table.layouts.len(), 5);
        let mut custom = KeyboardLayoutTable::default();
        custom
            .layouts
            .insert("QWERTY".to_string(), KeyboardLayout::new("abc", "abc", 'x', 'y'));
        table.merge(custom);
        assert_eq!(table.get("QWERTY").unwrap().portrait, "abc");
    }
}
