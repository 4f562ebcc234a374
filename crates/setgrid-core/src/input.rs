//! Keyboard-to-action dispatch for the board.
//!
//! One flat decision list per key-down, fully determined by the current
//! configuration and board:
//!
//! 1. any modifier held: ignored, default not prevented
//! 2. Escape or space: clear the selection
//! 3. a slot shortcut for the active orientation: select that slot, or
//!    nothing if the board has fewer slots
//! 4. the orientation key: rotate cards
//! 5. the layout key: switch portrait/landscape
//! 6. anything else: ignored

use crate::card::CardId;
use crate::display::LayoutOrientation;
use crate::error::ConfigError;
use crate::event::{BoardAction, Key, KeyEvent, KeyOutcome, SoundCue};
use crate::keyboard::{KeyboardLayout, KeyboardLayoutId};
use crate::settings::{SettingsStore, KEYBOARD_LAYOUT_KEY, VOLUME_KEY};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shared input settings, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Active shortcut table
    pub keyboard_layout: KeyboardLayout,
    /// Whether toggles play a feedback sound
    pub sound: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            keyboard_layout: KeyboardLayout::default(),
            sound: true,
        }
    }
}

impl InputConfig {
    /// Config for a built-in layout.
    #[must_use]
    pub fn new(layout: KeyboardLayoutId, sound: bool) -> Self {
        Self {
            keyboard_layout: layout.layout(),
            sound,
        }
    }

    /// Read the keyboard layout and volume settings.
    ///
    /// An unknown layout identifier is a configuration error; a missing one
    /// falls back to QWERTY.
    pub fn from_settings(store: &dyn SettingsStore) -> Result<Self, ConfigError> {
        let layout = match store.get(KEYBOARD_LAYOUT_KEY) {
            Some(name) => name.parse()?,
            None => KeyboardLayoutId::default(),
        };
        let sound = store.get(VOLUME_KEY).map_or(true, |volume| volume == "on");
        Ok(Self::new(layout, sound))
    }
}

/// What the dispatcher needs to know about the board at key time.
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    /// Visible slots in display order (chain prefix first)
    pub board: &'a [CardId],
    /// Current board orientation
    pub layout: LayoutOrientation,
}

impl<'a> DispatchContext<'a> {
    /// Create a context.
    #[must_use]
    pub const fn new(board: &'a [CardId], layout: LayoutOrientation) -> Self {
        Self { board, layout }
    }
}

/// Translates key-down events into [`BoardAction`]s.
///
/// The owner subscribes the dispatcher when the board is shown and
/// unsubscribes it when the board goes away; nothing is torn down implicitly.
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    config: InputConfig,
    subscribed: bool,
}

impl InputDispatcher {
    /// Create an unsubscribed dispatcher.
    #[must_use]
    pub const fn new(config: InputConfig) -> Self {
        Self {
            config,
            subscribed: false,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Replace the configuration (e.g. the user picked another keyboard layout).
    pub fn set_config(&mut self, config: InputConfig) {
        self.config = config;
    }

    /// Start receiving key events.
    pub fn subscribe(&mut self) {
        debug!("input dispatcher subscribed");
        self.subscribed = true;
    }

    /// Stop receiving key events.
    pub fn unsubscribe(&mut self) {
        debug!("input dispatcher unsubscribed");
        self.subscribed = false;
    }

    /// Whether key events are currently handled.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Run one dispatch pass over a key-down event.
    #[must_use]
    pub fn handle_key(&self, event: &KeyEvent, ctx: &DispatchContext<'_>) -> KeyOutcome {
        if !self.subscribed || event.modifiers.any() {
            return KeyOutcome::IGNORED;
        }

        if matches!(event.key, Key::Escape | Key::SPACE) {
            debug!(key = ?event.key, "clear selection");
            return KeyOutcome::action(BoardAction::ClearSelection);
        }

        let Some(c) = event.key.lowercase_char() else {
            return KeyOutcome::IGNORED;
        };
        let layout = &self.config.keyboard_layout;

        if let Some(index) = layout.slot_for(ctx.layout, c) {
            return match ctx.board.get(index) {
                Some(&card) => {
                    debug!(key = %c, index, %card, "select card");
                    KeyOutcome::action(BoardAction::SelectCard(card))
                }
                None => {
                    debug!(key = %c, index, slots = ctx.board.len(), "shortcut has no slot");
                    KeyOutcome::CONSUMED
                }
            };
        }

        let toggle = if c == layout.orientation_key {
            BoardAction::ToggleCardOrientation
        } else if c == layout.layout_key {
            BoardAction::ToggleLayoutOrientation
        } else {
            return KeyOutcome::IGNORED;
        };
        debug!(key = %c, action = ?toggle, "toggle");
        KeyOutcome::action(toggle).with_sound(self.sound_cue())
    }

    fn sound_cue(&self) -> Option<SoundCue> {
        self.config.sound.then_some(SoundCue::LayoutChange)
    }
}
