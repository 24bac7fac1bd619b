use alloc::vec::Vec;

#[cfg(feature = "std")]
use rand::Rng;

use crate::agent::Agent;
use crate::behavior;
use crate::error::FlockError;
use crate::params::{Bounds, RuleParameters};
use crate::vector::Vector2D;

/// A fixed population of agents advanced one frame at a time.
///
/// Rules read a snapshot of the flock taken at the start of each step, so the
/// outcome of a step does not depend on agent order.
#[derive(Debug, Clone)]
pub struct FlockSimulator {
    agents: Vec<Agent>,
    snapshot: Vec<Agent>,
    bounds: Bounds,
    params: RuleParameters,
    repulsor: Option<Vector2D>,
}

impl FlockSimulator {
    /// Spawns `agent_count` agents at random positions inside `bounds`.
    #[cfg(feature = "std")]
    pub fn new(
        agent_count: usize,
        bounds: Bounds,
        params: RuleParameters,
    ) -> Result<Self, FlockError> {
        Self::with_rng(agent_count, bounds, params, &mut rand::thread_rng())
    }

    #[cfg(feature = "std")]
    pub fn with_rng<R: Rng + ?Sized>(
        agent_count: usize,
        bounds: Bounds,
        params: RuleParameters,
        rng: &mut R,
    ) -> Result<Self, FlockError> {
        // Validate before spawning; gen_range panics on an empty range.
        params.validate()?;
        bounds.validate()?;
        let agents = (0..agent_count)
            .map(|_| Agent::random(rng, &bounds))
            .collect();
        Self::from_agents(agents, bounds, params)
    }

    /// Builds a simulator around explicitly placed agents.
    pub fn from_agents(
        agents: Vec<Agent>,
        bounds: Bounds,
        params: RuleParameters,
    ) -> Result<Self, FlockError> {
        params.validate()?;
        bounds.validate()?;

        log::debug!(
            "flock created: {} agents in {}x{}, max speed {}",
            agents.len(),
            bounds.width,
            bounds.height,
            params.max_speed
        );

        Ok(Self {
            snapshot: Vec::with_capacity(agents.len()),
            agents,
            bounds,
            params,
            repulsor: None,
        })
    }

    /// Advances every agent by one frame.
    pub fn step(&mut self) {
        self.snapshot.clear();
        self.snapshot.extend_from_slice(&self.agents);

        for (index, agent) in self.agents.iter_mut().enumerate() {
            agent.integrate();
            agent.velocity =
                behavior::steer(agent, index, &self.snapshot, self.repulsor, &self.params);
            agent.wrap_edges(&self.bounds);
            agent.update_heading();
        }
    }

    /// Sets or clears the point agents steer away from.
    pub fn set_repulsor(&mut self, point: Option<Vector2D>) {
        self.repulsor = point;
    }

    pub fn clear_repulsor(&mut self) {
        self.set_repulsor(None);
    }

    pub fn repulsor(&self) -> Option<Vector2D> {
        self.repulsor
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn parameters(&self) -> &RuleParameters {
        &self.params
    }
}
