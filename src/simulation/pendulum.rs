//! Ring of particles joined by springs, hanging from particle 0
//!
//! Particle `i` links to `(i + 1) mod n`, so the last particle closes the
//! ring back onto the anchor.

use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::simulation::forces::{EvalContext, ForceSet, ForceTerm};
use crate::simulation::particle_system::ParticleSystem;
use crate::simulation::states::NVec3;

pub const PENDULUM_MASS: f64 = 1.0;
pub const PENDULUM_DRAG: f64 = 0.5;
pub const PENDULUM_SPRING_LENGTH: f64 = 1.0;
pub const PENDULUM_SPRING_STIFFNESS: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct PendulumSystem {
    pub base: ParticleSystem,
    pub mass: f64,
    forces: ForceSet,
}

impl PendulumSystem {
    /// Build a pendulum of `num_particles` (at least 2) particles
    pub fn new(num_particles: usize) -> SimResult<Self> {
        if num_particles < 2 {
            return Err(SimError::InvalidParticleCount { count: num_particles, min: 2 });
        }

        let n = num_particles as f64;
        let positions: Vec<NVec3> = (0..num_particles)
            .map(|i| {
                if i == 0 {
                    NVec3::zeros()
                } else {
                    let i = i as f64;
                    NVec3::new(i - n / 2.0, -i, 0.0)
                }
            })
            .collect();

        let mut base = ParticleSystem::from_positions(&positions);
        for i in 0..num_particles {
            let j = base.wrap(i + 1);
            base.add_spring(i, j, PENDULUM_SPRING_LENGTH, PENDULUM_SPRING_STIFFNESS)?;
        }
        base.add_fixed_particle(0)?;

        let forces = ForceSet::new()
            .with(ForceTerm::Gravity)
            .with(ForceTerm::Drag { coefficient: PENDULUM_DRAG })
            .with(ForceTerm::Springs)
            .with(ForceTerm::Fixed);

        debug!(particles = num_particles, springs = base.springs().len(), "built pendulum");

        Ok(Self { base, mass: PENDULUM_MASS, forces })
    }

    pub fn eval_f(&self, state: &[NVec3], ctx: &mut EvalContext<'_>) -> Vec<NVec3> {
        self.forces.accumulate(&self.base, state, self.mass, ctx)
    }

    pub fn state(&self) -> &[NVec3] {
        self.base.state()
    }

    pub fn set_state(&mut self, new_state: Vec<NVec3>) -> SimResult<()> {
        self.base.set_state(new_state)
    }
}
