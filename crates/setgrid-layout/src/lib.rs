#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
//! Grid sizing and per-card layout for the setgrid board.
//!
//! Both stages are pure functions of their inputs:
//!
//! - [`GridSizer`] turns a card count and [`DisplayConfig`](setgrid_core::DisplayConfig)
//!   into a [`GridGeometry`]: lanes, card size and container height.
//! - [`LayoutEngine`] turns game state into a [`BoardLayout`]: one target
//!   [`CardVisualState`](setgrid_core::CardVisualState) per card in the
//!   universe, plus the chain divider and remaining-count caption.
//!
//! Feed [`BoardLayout`] into an [`AnimationDriver`](setgrid_core::AnimationDriver)
//! with [`BoardLayout::retarget`].

mod engine;
mod params;
mod sizer;

pub use engine::{BoardLayout, Caption, ChainDivider, DividerOrientation, LayoutEngine};
pub use params::LayoutParams;
pub use sizer::{GridGeometry, GridSizer, LANES};
