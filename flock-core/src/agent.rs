#[cfg(feature = "std")]
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::params::Bounds;
use crate::vector::Vector2D;

/// A single boid
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Agent {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Orientation for drawing, derived from velocity after every step.
    pub heading: f32,
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            heading: velocity.heading(),
        }
    }

    /// Random position inside `bounds`, random velocity in `[-1, 1]` per axis.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..bounds.width),
            rng.gen_range(0.0..bounds.height),
        );
        let velocity = Vector2D::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        Self::new(position, velocity)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// Toroidal wrap with the bounds margin as overshoot allowance.
    pub fn wrap_edges(&mut self, bounds: &Bounds) {
        self.position.x = wrap_axis(self.position.x, bounds.width, bounds.margin);
        self.position.y = wrap_axis(self.position.y, bounds.height, bounds.margin);
    }

    pub fn update_heading(&mut self) {
        self.heading = self.velocity.heading();
    }
}

fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    if value > extent + margin {
        -margin
    } else if value < -margin {
        extent + margin
    } else {
        value
    }
}
