//! Core types for the setgrid card board.
//!
//! This crate holds everything the board needs that is not geometry:
//! - Card identities and game state: [`CardId`], [`BoardState`], [`SelectionState`]
//! - Display toggles: [`LayoutOrientation`], [`CardOrientation`], [`DisplayConfig`]
//! - Per-card targets produced by the layout: [`CardVisualState`]
//! - Spring animation: [`AnimationDriver`], [`Spring`]
//! - Keyboard input: [`InputDispatcher`], [`KeyboardLayout`]
//! - Persisted settings: [`SettingsStore`], [`FileSettings`], [`DisplaySettings`]

pub mod animation;
mod card;
mod display;
mod error;
mod event;
mod geometry;
pub mod input;
pub mod keyboard;
pub mod settings;
mod visual;

pub use animation::{AnimationConfig, AnimationDriver, RenderState, Spring, SpringConfig};
pub use card::{BoardState, CardId, CardSource, CardUniverse, GameMode, SelectionState};
pub use display::{CardOrientation, DisplayConfig, LayoutOrientation, PLACEHOLDER_WIDTH};
pub use error::{BoardError, ConfigError, SettingsError};
pub use event::{BoardAction, Key, KeyEvent, KeyOutcome, Modifiers, SoundCue};
pub use geometry::{Point, Rect, Size};
pub use input::{DispatchContext, InputConfig, InputDispatcher};
pub use keyboard::{KeyboardLayout, KeyboardLayoutId, KeyboardLayoutTable};
pub use settings::{DisplaySettings, FileSettings, MemorySettings, SettingsStore};
pub use visual::{CardFaceMetrics, CardVisualState, VisualMap};
