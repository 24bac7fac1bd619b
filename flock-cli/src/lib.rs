use anyhow::{bail, Context, Result};
use flock_core::{Agent, Bounds, FlockSimulator, RuleParameters, Vector2D};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a headless run needs
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub agents: usize,
    pub bounds: Bounds,
    pub params: RuleParameters,
    pub steps: u64,
    pub pointer: Option<Vector2D>,
    /// Log stats every this many steps; 0 disables periodic reports.
    pub report_every: u64,
    pub snapshot: Option<PathBuf>,
}

/// Reads rule parameters from a JSON file. Missing fields keep their defaults.
pub fn load_parameters(path: &Path) -> Result<RuleParameters> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let params: RuleParameters = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(params)
}

/// Parses an `x,y` pair such as `400,300`.
pub fn parse_point(value: &str) -> Result<Vector2D> {
    let Some((x, y)) = value.split_once(',') else {
        bail!("Expected a point as 'x,y', got '{}'", value);
    };
    let x: f32 = x.trim().parse().context("Invalid x coordinate")?;
    let y: f32 = y.trim().parse().context("Invalid y coordinate")?;
    Ok(Vector2D::new(x, y))
}

/// Aggregate motion statistics for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlockStats {
    pub agents: usize,
    pub mean_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub centroid: Vector2D,
    /// Length of the mean heading unit vector: 1 when everyone flies the
    /// same way, near 0 when headings cancel out.
    pub polarization: f32,
}

impl FlockStats {
    pub fn measure(flock: &FlockSimulator) -> Self {
        let agents = flock.agents();
        if agents.is_empty() {
            return Self {
                agents: 0,
                mean_speed: 0.0,
                min_speed: 0.0,
                max_speed: 0.0,
                centroid: Vector2D::zero(),
                polarization: 0.0,
            };
        }

        let n = agents.len() as f32;
        let mut speed_sum = 0.0;
        let mut min_speed = f32::INFINITY;
        let mut max_speed: f32 = 0.0;
        let mut position_sum = Vector2D::zero();
        let mut heading_sum = Vector2D::zero();

        for agent in agents {
            let speed = agent.speed();
            speed_sum += speed;
            min_speed = min_speed.min(speed);
            max_speed = max_speed.max(speed);
            position_sum += agent.position;
            heading_sum += agent.velocity.normalize();
        }

        Self {
            agents: agents.len(),
            mean_speed: speed_sum / n,
            min_speed,
            max_speed,
            centroid: position_sum / n,
            polarization: (heading_sum / n).magnitude(),
        }
    }
}

/// Full simulator state written out at the end of a run.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub step: u64,
    pub bounds: &'a Bounds,
    pub parameters: &'a RuleParameters,
    pub repulsor: Option<Vector2D>,
    pub agents: &'a [Agent],
}

impl<'a> Snapshot<'a> {
    pub fn capture(flock: &'a FlockSimulator, step: u64) -> Self {
        Self {
            step,
            bounds: flock.bounds(),
            parameters: flock.parameters(),
            repulsor: flock.repulsor(),
            agents: flock.agents(),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        Ok(())
    }
}

fn report(step: u64, stats: &FlockStats) {
    log::info!(
        "step {:>6}: speed {:.3} [{:.3}, {:.3}], polarization {:.3}, centroid ({:.1}, {:.1})",
        step,
        stats.mean_speed,
        stats.min_speed,
        stats.max_speed,
        stats.polarization,
        stats.centroid.x,
        stats.centroid.y
    );
}

/// Runs the simulation headless and returns the stats of the final frame.
pub fn run(config: &RunConfig) -> Result<FlockStats> {
    let mut flock = FlockSimulator::new(config.agents, config.bounds, config.params)
        .context("Failed to create flock")?;
    flock.set_repulsor(config.pointer);

    log::info!(
        "Running {} agents for {} steps in {}x{}",
        config.agents,
        config.steps,
        config.bounds.width,
        config.bounds.height
    );
    if let Some(pointer) = config.pointer {
        log::info!("Repulsor at ({}, {})", pointer.x, pointer.y);
    }

    for step in 1..=config.steps {
        flock.step();

        if config.report_every > 0 && step % config.report_every == 0 {
            report(step, &FlockStats::measure(&flock));
        } else {
            log::trace!("step {} done", step);
        }
    }

    let stats = FlockStats::measure(&flock);
    report(config.steps, &stats);

    if let Some(path) = &config.snapshot {
        Snapshot::capture(&flock, config.steps).write_to(path)?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("400,300").unwrap(), Vector2D::new(400.0, 300.0));
        assert_eq!(parse_point(" 1.5 , -2 ").unwrap(), Vector2D::new(1.5, -2.0));
        assert!(parse_point("400").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_stats_of_empty_flock() {
        let flock =
            FlockSimulator::from_agents(Vec::new(), Bounds::new(10.0, 10.0), Default::default())
                .unwrap();
        let stats = FlockStats::measure(&flock);
        assert_eq!(stats.agents, 0);
        assert_eq!(stats.polarization, 0.0);
    }

    #[test]
    fn test_stats_of_aligned_flock() {
        let agents = vec![
            Agent::new(Vector2D::new(0.0, 0.0), Vector2D::new(0.3, 0.0)),
            Agent::new(Vector2D::new(10.0, 20.0), Vector2D::new(0.4, 0.0)),
        ];
        let flock =
            FlockSimulator::from_agents(agents, Bounds::new(100.0, 100.0), Default::default())
                .unwrap();
        let stats = FlockStats::measure(&flock);

        assert!((stats.polarization - 1.0).abs() < 1e-6);
        assert!((stats.mean_speed - 0.35).abs() < 1e-6);
        assert!((stats.min_speed - 0.3).abs() < 1e-6);
        assert!((stats.max_speed - 0.4).abs() < 1e-6);
        assert_eq!(stats.centroid, Vector2D::new(5.0, 10.0));
    }

    #[test]
    fn test_stats_of_opposed_flock() {
        let agents = vec![
            Agent::new(Vector2D::new(0.0, 0.0), Vector2D::new(0.3, 0.0)),
            Agent::new(Vector2D::new(50.0, 50.0), Vector2D::new(-0.3, 0.0)),
        ];
        let flock =
            FlockSimulator::from_agents(agents, Bounds::new(100.0, 100.0), Default::default())
                .unwrap();
        assert!(FlockStats::measure(&flock).polarization < 1e-6);
    }
}
