#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::FlockError;

/// Draw size of an agent, used as the wraparound margin.
pub const DEFAULT_AGENT_SIZE: f32 = 4.0;

/// Viewports narrower than this get the reduced speed limit.
pub const NARROW_VIEWPORT_WIDTH: f32 = 768.0;

/// Speed limit applied on narrow viewports
pub const NARROW_MAX_SPEED: f32 = 0.3;

/// Rule set configuration, fixed for the lifetime of a simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RuleParameters {
    /// Neighbor radius for cohesion and alignment.
    pub visual_range: f32,
    /// Extra damping applied to boid separation.
    pub reduce_factor: f32,
    pub centering_factor: f32,
    pub matching_factor: f32,
    pub max_speed: f32,
    /// Magnitude cap of the cohesion steering vector.
    pub acceleration: f32,
    pub min_distance_boid: f32,
    pub avoid_factor_boid: f32,
    pub min_distance_mouse: f32,
    pub avoid_factor_mouse: f32,
    /// Accepted for config compatibility. No rule reads it.
    pub smooth_speed: Option<f32>,
}

impl Default for RuleParameters {
    fn default() -> Self {
        Self {
            visual_range: 55.0,
            reduce_factor: 0.5,
            centering_factor: 0.05,
            matching_factor: 0.05,
            max_speed: 0.45,
            acceleration: 0.035,
            min_distance_boid: 20.0,
            avoid_factor_boid: 0.05,
            min_distance_mouse: 100.0,
            avoid_factor_mouse: 0.025,
            smooth_speed: None,
        }
    }
}

impl RuleParameters {
    /// Defaults adjusted for the viewport the flock is drawn into.
    pub fn for_viewport_width(width: f32) -> Self {
        let mut params = Self::default();
        if width < NARROW_VIEWPORT_WIDTH {
            params.max_speed = NARROW_MAX_SPEED;
        }
        params
    }

    /// Rejects non-positive max speed and negative or non-finite factors.
    pub fn validate(&self) -> Result<(), FlockError> {
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(FlockError::InvalidConfiguration {
                parameter: "max_speed",
                value: self.max_speed,
            });
        }

        let non_negative = [
            ("visual_range", self.visual_range),
            ("reduce_factor", self.reduce_factor),
            ("centering_factor", self.centering_factor),
            ("matching_factor", self.matching_factor),
            ("acceleration", self.acceleration),
            ("min_distance_boid", self.min_distance_boid),
            ("avoid_factor_boid", self.avoid_factor_boid),
            ("min_distance_mouse", self.min_distance_mouse),
            ("avoid_factor_mouse", self.avoid_factor_mouse),
        ];
        for (parameter, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FlockError::InvalidConfiguration { parameter, value });
            }
        }

        Ok(())
    }
}

/// World extent agents are spawned into and wrap around.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    /// Distance past an edge before an agent reappears on the other side.
    #[cfg_attr(feature = "serde", serde(default = "default_margin"))]
    pub margin: f32,
}

#[cfg(feature = "serde")]
fn default_margin() -> f32 {
    DEFAULT_AGENT_SIZE
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            margin: DEFAULT_AGENT_SIZE,
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        let valid = self.width.is_finite()
            && self.height.is_finite()
            && self.margin.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && self.margin >= 0.0;
        if valid {
            Ok(())
        } else {
            Err(FlockError::InvalidBounds {
                width: self.width,
                height: self.height,
                margin: self.margin,
            })
        }
    }
}
