//! Keyboard events and the board actions they produce.

use crate::card::CardId;
use serde::{Deserialize, Serialize};

/// A physical key, as reported by the host's key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Escape key
    Escape,
    /// Enter/Return key
    Enter,
    /// A key producing a single character (space included)
    Char(char),
}

impl Key {
    /// Space bar.
    pub const SPACE: Self = Self::Char(' ');

    /// Parse a host key name such as `"Escape"`, `" "` or `"q"`.
    ///
    /// Returns `None` for names the engine has no use for.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Self::Char(c));
        }
        match name {
            "Escape" | "Esc" => Some(Self::Escape),
            "Enter" => Some(Self::Enter),
            "Space" | "Spacebar" => Some(Self::SPACE),
            _ => None,
        }
    }

    /// Lower-cased character for single-character keys.
    #[must_use]
    pub fn lowercase_char(self) -> Option<char> {
        match self {
            Self::Char(c) => {
                let mut lower = c.to_lowercase();
                match (lower.next(), lower.next()) {
                    (Some(l), None) => Some(l),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Control key
    pub ctrl: bool,
    /// Alt key (Option on Mac)
    pub alt: bool,
    /// Shift key
    pub shift: bool,
    /// Meta key (Windows key, Cmd on Mac)
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self::new(false, false, false, false);

    /// Ctrl only.
    pub const CTRL: Self = Self::new(true, false, false, false);

    /// Alt only.
    pub const ALT: Self = Self::new(false, true, false, false);

    /// Shift only.
    pub const SHIFT: Self = Self::new(false, false, true, false);

    /// Meta only.
    pub const META: Self = Self::new(false, false, false, true);

    /// Create custom modifiers.
    #[must_use]
    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            meta,
        }
    }

    /// Check if any modifier is pressed.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }
}

/// A key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The key pressed
    pub key: Key,
    /// Modifiers held at the time
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create an event.
    #[must_use]
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed on its own.
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// A single character pressed on its own.
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::plain(Key::Char(c))
    }
}

/// Actions emitted towards the game-state controller and settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardAction {
    /// Toggle selection of a visible card
    SelectCard(CardId),
    /// Drop the current selection
    ClearSelection,
    /// Rotate cards between vertical and horizontal
    ToggleCardOrientation,
    /// Switch the board between portrait and landscape
    ToggleLayoutOrientation,
}

/// Feedback sounds requested alongside an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Played when the board geometry is toggled
    LayoutChange,
}

/// Result of one dispatch pass over a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyOutcome {
    /// Action to forward, if any
    pub action: Option<BoardAction>,
    /// Whether the host should suppress its default handling
    pub prevent_default: bool,
    /// Sound to play, if sound is enabled
    pub sound: Option<SoundCue>,
}

impl KeyOutcome {
    /// The event was not for us.
    pub const IGNORED: Self = Self {
        action: None,
        prevent_default: false,
        sound: None,
    };

    /// The key is ours but maps to nothing right now.
    pub const CONSUMED: Self = Self {
        action: None,
        prevent_default: true,
        sound: None,
    };

    /// Forward an action and suppress the default.
    #[must_use]
    pub const fn action(action: BoardAction) -> Self {
        Self {
            action: Some(action),
            prevent_default: true,
            sound: None,
        }
    }

    /// Attach a sound cue.
    #[must_use]
    pub const fn with_sound(mut self, sound: Option<SoundCue>) -> Self {
        self.sound = sound;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_name(" "), Some(Key::SPACE));
        assert_eq!(Key::from_name("q"), Some(Key::Char('q')));
        assert_eq!(Key::from_name("é"), Some(Key::Char('é')));
        assert_eq!(Key::from_name("F13"), None);
        assert_eq!(Key::from_name("ArrowUp"), None);
    }

    #[test]
    fn test_lowercase_char() {
        assert_eq!(Key::Char('Q').lowercase_char(), Some('q'));
        assert_eq!(Key::Char('Ö').lowercase_char(), Some('ö'));
        assert_eq!(Key::Char(';').lowercase_char(), Some(';'));
        assert_eq!(Key::Escape.lowercase_char(), None);
    }

    #[test]
    fn test_modifiers_any() {
        assert!(!Modifiers::NONE.any());
        assert!(Modifiers::SHIFT.any());
        assert!(Modifiers::new(false, false, false, true).any());
    }

    #[test]
    fn test_outcome_constructors() {
        let outcome = KeyOutcome::action(BoardAction::ClearSelection);
        assert!(outcome.prevent_default);
        assert_eq!(outcome.sound, None);
        assert!(!KeyOutcome::IGNORED.prevent_default);
        assert!(KeyOutcome::CONSUMED.action.is_none());
        assert_eq!(KeyOutcome::default(), KeyOutcome::IGNORED);
    }
}
