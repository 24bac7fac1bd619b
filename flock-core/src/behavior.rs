//! Steering rules.
//!
//! Each rule reads the agent being updated plus a snapshot of the whole flock
//! taken at step start, and returns the velocity change it contributes. The
//! snapshot includes the agent itself, so cohesion and alignment averages
//! count it as a neighbor. Those two rules stay silent while no other agent
//! is within visual range.

use crate::agent::Agent;
use crate::params::RuleParameters;
use crate::vector::Vector2D;

/// Sums `pick` over every agent within visual range, the agent itself
/// included. Returns `None` unless at least one *other* agent is in range.
fn neighborhood<F>(
    agent: &Agent,
    index: usize,
    flock: &[Agent],
    params: &RuleParameters,
    pick: F,
) -> Option<(Vector2D, usize)>
where
    F: Fn(&Agent) -> Vector2D,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;
    let mut others = 0;

    for (i, other) in flock.iter().enumerate() {
        if i == index || agent.position.distance(&other.position) < params.visual_range {
            sum += pick(other);
            count += 1;
            if i != index {
                others += 1;
            }
        }
    }

    (others > 0).then_some((sum, count))
}

/// Steers toward the centroid of agents within visual range.
///
/// The steering direction is `normalize(normalize(centroid - position) - position)`,
/// capped at the acceleration limit and then at max speed, and scaled by the
/// centering factor.
pub fn cohesion(
    agent: &Agent,
    index: usize,
    flock: &[Agent],
    params: &RuleParameters,
) -> Vector2D {
    let Some((sum, count)) = neighborhood(agent, index, flock, params, |other| other.position)
    else {
        return Vector2D::zero();
    };

    let centroid = sum / count as f32;
    let desired = (centroid - agent.position).normalize();
    let steering = (desired - agent.position)
        .normalize()
        .limit(params.acceleration)
        .limit(params.max_speed);

    steering * params.centering_factor
}

/// Pushes away from every other agent closer than `min_distance_boid`.
///
/// `index` is the agent's slot in `flock` and is skipped.
pub fn separation(
    agent: &Agent,
    index: usize,
    flock: &[Agent],
    params: &RuleParameters,
) -> Vector2D {
    let mut away = Vector2D::zero();

    for (i, other) in flock.iter().enumerate() {
        if i == index {
            continue;
        }
        if agent.position.distance(&other.position) < params.min_distance_boid {
            away += agent.position - other.position;
        }
    }

    away.normalize() * (params.avoid_factor_boid * params.reduce_factor)
}

/// Pushes away from the repulsor when it is set and closer than `min_distance_mouse`.
pub fn avoid_repulsor(
    agent: &Agent,
    repulsor: Option<Vector2D>,
    params: &RuleParameters,
) -> Vector2D {
    match repulsor {
        Some(point) if agent.position.distance(&point) < params.min_distance_mouse => {
            (agent.position - point).normalize() * params.avoid_factor_mouse
        }
        _ => Vector2D::zero(),
    }
}

/// Blends velocity toward the mean velocity of agents within visual range.
pub fn alignment(
    agent: &Agent,
    index: usize,
    flock: &[Agent],
    params: &RuleParameters,
) -> Vector2D {
    let Some((sum, count)) = neighborhood(agent, index, flock, params, |other| other.velocity)
    else {
        return Vector2D::zero();
    };

    let average = sum / count as f32;
    (average - agent.velocity) * params.matching_factor
}

/// Caps speed at `max_speed` and lifts anything under half of it to 75%.
///
/// A stationary velocity is returned unchanged.
pub fn clamp_speed(velocity: Vector2D, params: &RuleParameters) -> Vector2D {
    let speed = velocity.magnitude();
    if speed > params.max_speed {
        velocity.with_magnitude(params.max_speed)
    } else if speed > 0.0 && speed < params.max_speed / 2.0 {
        velocity.with_magnitude(params.max_speed * 0.75)
    } else {
        velocity
    }
}

/// Runs every rule in order and returns the agent's new velocity.
pub fn steer(
    agent: &Agent,
    index: usize,
    flock: &[Agent],
    repulsor: Option<Vector2D>,
    params: &RuleParameters,
) -> Vector2D {
    let mut current = *agent;
    current.velocity += cohesion(&current, index, flock, params);
    current.velocity += separation(&current, index, flock, params);
    current.velocity += avoid_repulsor(&current, repulsor, params);
    current.velocity += alignment(&current, index, flock, params);
    clamp_speed(current.velocity, params)
}
