#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking ("boids") simulation core.
//!
//! [`FlockSimulator`] owns a fixed population of [`Agent`]s and an optional
//! repulsor point. A driver calls [`FlockSimulator::step`] once per frame and
//! reads agent positions and headings back for drawing.

extern crate alloc;

pub mod agent;
pub mod behavior;
pub mod error;
pub mod params;
pub mod simulator;
pub mod vector;

pub use agent::Agent;
pub use error::FlockError;
pub use params::{Bounds, RuleParameters, DEFAULT_AGENT_SIZE, NARROW_VIEWPORT_WIDTH};
pub use simulator::FlockSimulator;
pub use vector::Vector2D;
