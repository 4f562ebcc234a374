//! Spring-driven card animation.
//!
//! The layout produces fresh target states on every recomputation; the
//! [`AnimationDriver`] keeps one set of springs per card identity and moves
//! the rendered values toward whatever the latest targets are. It never
//! schedules itself: the host calls [`AnimationDriver::tick`] from its frame
//! loop and [`AnimationDriver::set_targets`] whenever the layout changes.

use crate::card::CardId;
use crate::geometry::Point;
use crate::visual::{CardVisualState, VisualMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Largest integration step; longer frames are split.
const MAX_STEP: f64 = 0.001;

// =============================================================================
// SpringConfig - Spring Physics Parameters
// =============================================================================

/// Spring physics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Mass of the object (affects inertia)
    pub mass: f64,
    /// Spring tension (affects speed)
    pub tension: f64,
    /// Friction (affects bounciness)
    pub friction: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::BOARD
    }
}

impl SpringConfig {
    /// Card movement: settles in well under a second with negligible overshoot.
    pub const BOARD: Self = Self {
        mass: 1.0,
        tension: 64.0,
        friction: 14.0,
    };

    /// Create custom spring config.
    #[must_use]
    pub const fn custom(mass: f64, tension: f64, friction: f64) -> Self {
        Self {
            mass,
            tension,
            friction,
        }
    }

    /// Calculate damping ratio.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.friction / (2.0 * (self.mass * self.tension).sqrt())
    }

    /// Whether spring is underdamped (will oscillate).
    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }

    /// Fraction of the travel distance by which the first swing overshoots.
    #[must_use]
    pub fn overshoot(&self) -> f64 {
        let zeta = self.damping_ratio();
        if zeta >= 1.0 {
            0.0
        } else {
            (-zeta * std::f64::consts::PI / zeta.mul_add(-zeta, 1.0).sqrt()).exp()
        }
    }
}

// =============================================================================
// Spring - Animated Spring Value
// =============================================================================

/// A spring-animated value.
#[derive(Debug, Clone)]
pub struct Spring {
    /// Current value
    pub value: f64,
    /// Target value
    pub target: f64,
    /// Current velocity
    pub velocity: f64,
    /// Spring configuration
    pub config: SpringConfig,
    /// Whether animation is complete
    pub at_rest: bool,
    /// Precision threshold for settling
    pub precision: f64,
    /// Stop at the target instead of swinging past it
    pub clamp: bool,
}

impl Spring {
    /// Create a new spring at an initial value.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self {
            value: initial,
            target: initial,
            velocity: 0.0,
            config: SpringConfig::default(),
            at_rest: true,
            precision: 0.01,
            clamp: false,
        }
    }

    /// Set spring configuration.
    #[must_use]
    pub const fn with_config(mut self, config: SpringConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the settling threshold.
    #[must_use]
    pub const fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Snap to the target on the first crossing.
    #[must_use]
    pub const fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Set target value. Value and velocity carry over, so a retarget never jumps.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > f64::EPSILON {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Update spring physics for a time step (dt in seconds).
    pub fn update(&mut self, dt: f64) {
        let mut remaining = dt.max(0.0);
        while !self.at_rest && remaining > 0.0 {
            let step = remaining.min(MAX_STEP);
            self.step(step);
            remaining -= step;
        }
    }

    fn step(&mut self, dt: f64) {
        // Spring force: F = -k * x
        let displacement = self.value - self.target;
        let spring_force = -self.config.tension * displacement;

        // Damping force: F = -c * v
        let damping_force = -self.config.friction * self.velocity;

        let acceleration = (spring_force + damping_force) / self.config.mass;

        // Semi-implicit Euler
        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;

        let crossed = (self.value - self.target).signum() != displacement.signum();
        if self.clamp && crossed && displacement != 0.0 {
            self.settle();
            return;
        }

        let displacement = self.value - self.target;
        if displacement.abs() < self.precision && self.velocity.abs() < self.precision {
            self.settle();
        }
    }

    fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }
}

// =============================================================================
// AnimationDriver - one spring set per card
// =============================================================================

/// Tunables for the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Spring used for position, opacity and rotation
    pub spring: SpringConfig,
    /// Settling threshold for positions and rotation, in pixels/degrees
    pub position_precision: f64,
    /// Settling threshold for opacity
    pub opacity_precision: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::BOARD,
            position_precision: 0.01,
            opacity_precision: 0.001,
        }
    }
}

#[derive(Debug, Clone)]
struct AnimatedCard {
    x: Spring,
    y: Spring,
    opacity: Spring,
    rotation: Spring,
    target: CardVisualState,
}

impl AnimatedCard {
    fn at(target: CardVisualState, rotation: f32, config: &AnimationConfig) -> Self {
        let spring = |initial: f32, precision: f64| {
            Spring::new(f64::from(initial))
                .with_config(config.spring)
                .with_precision(precision)
        };
        Self {
            x: spring(target.position.x, config.position_precision),
            y: spring(target.position.y, config.position_precision),
            opacity: spring(target.opacity, config.opacity_precision).with_clamp(true),
            rotation: spring(rotation, config.position_precision),
            target,
        }
    }

    fn retarget(&mut self, target: CardVisualState, rotation: f32) {
        self.x.set_target(f64::from(target.position.x));
        self.y.set_target(f64::from(target.position.y));
        self.opacity.set_target(f64::from(target.opacity));
        self.rotation.set_target(f64::from(rotation));
        self.target = target;
    }

    fn update(&mut self, dt: f64) {
        self.x.update(dt);
        self.y.update(dt);
        self.opacity.update(dt);
        self.rotation.update(dt);
    }

    fn at_rest(&self) -> bool {
        self.x.at_rest && self.y.at_rest && self.opacity.at_rest && self.rotation.at_rest
    }

    fn render(&self, card: CardId) -> RenderState {
        let opacity = self.opacity.value.clamp(0.0, 1.0) as f32;
        let visible = opacity > 0.0;
        RenderState {
            card,
            position: Point::new(self.x.value as f32, self.y.value as f32),
            opacity,
            rotation: self.rotation.value as f32,
            visible,
            interactive: visible && self.target.in_play,
            z_index: i32::from(!self.opacity.at_rest),
            hinted: self.target.hinted,
            active: self.target.active,
        }
    }
}

/// Live values handed to the renderer for one card on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// Card identity
    pub card: CardId,
    /// Current top-left of the unrotated card box
    pub position: Point,
    /// Current opacity in `0.0..=1.0`
    pub opacity: f32,
    /// Current rotation in degrees
    pub rotation: f32,
    /// False once opacity reaches zero
    pub visible: bool,
    /// Accepts pointer selection
    pub interactive: bool,
    /// 1 while the card is fading in or out, 0 when settled
    pub z_index: i32,
    /// Hint highlight
    pub hinted: bool,
    /// Selection highlight
    pub active: bool,
}

/// Interpolates every card from its previous target to its latest one.
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    config: AnimationConfig,
    cards: BTreeMap<CardId, AnimatedCard>,
}

impl AnimationDriver {
    /// Create an empty driver.
    #[must_use]
    pub const fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            cards: BTreeMap::new(),
        }
    }

    /// Driver configuration.
    #[must_use]
    pub const fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Point every card at its new target.
    ///
    /// Cards seen for the first time appear at their target; cards missing
    /// from `targets` are dropped.
    pub fn set_targets(&mut self, targets: &VisualMap, rotation: f32) {
        let before = self.cards.len();
        self.cards.retain(|card, _| targets.contains_key(card));
        let dropped = before - self.cards.len();

        let mut added = 0usize;
        for (&card, &target) in targets {
            match self.cards.get_mut(&card) {
                Some(animated) => animated.retarget(target, rotation),
                None => {
                    self.cards
                        .insert(card, AnimatedCard::at(target, rotation, &self.config));
                    added += 1;
                }
            }
        }
        debug!(
            cards = self.cards.len(),
            added,
            dropped,
            animating = self.active_count(),
            "animation targets updated"
        );
    }

    /// Advance every spring by `dt` seconds and return the live values.
    pub fn tick(&mut self, dt: f64) -> Vec<RenderState> {
        for animated in self.cards.values_mut() {
            animated.update(dt);
        }
        trace!(dt, animating = self.active_count(), "animation tick");
        self.render_states()
    }

    /// Current values without advancing time.
    #[must_use]
    pub fn render_states(&self) -> Vec<RenderState> {
        self.cards
            .iter()
            .map(|(&card, animated)| animated.render(card))
            .collect()
    }

    /// Current values for one card.
    #[must_use]
    pub fn get(&self, card: CardId) -> Option<RenderState> {
        self.cards.get(&card).map(|animated| animated.render(card))
    }

    /// Whether any card is still moving.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.cards.values().any(|animated| !animated.at_rest())
    }

    /// Number of cards still moving.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.cards.values().filter(|a| !a.at_rest()).count()
    }

    /// Number of tracked cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no cards are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
