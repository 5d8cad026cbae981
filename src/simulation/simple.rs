//! Single particle circling the origin
//!
//! The derivative ignores the force terms entirely and follows the
//! analytic field `(-y, x, 0)`, a test case for integrator accuracy.

use crate::error::SimResult;
use crate::simulation::forces::EvalContext;
use crate::simulation::particle_system::ParticleSystem;
use crate::simulation::states::{position, NVec3};

#[derive(Debug, Clone)]
pub struct SimpleSystem {
    pub base: ParticleSystem,
}

impl SimpleSystem {
    pub fn new() -> Self {
        Self {
            base: ParticleSystem::from_positions(&[NVec3::new(0.5, 0.5, 0.0)]),
        }
    }

    pub fn eval_f(&self, state: &[NVec3], _ctx: &mut EvalContext<'_>) -> Vec<NVec3> {
        let mut f = Vec::with_capacity(state.len());
        for i in 0..self.base.num_particles() {
            let x = position(state, i);
            f.push(NVec3::new(-x.y, x.x, 0.0));
            f.push(NVec3::zeros());
        }
        f
    }

    pub fn state(&self) -> &[NVec3] {
        self.base.state()
    }

    pub fn set_state(&mut self, new_state: Vec<NVec3>) -> SimResult<()> {
        self.base.set_state(new_state)
    }
}

impl Default for SimpleSystem {
    fn default() -> Self {
        Self::new()
    }
}
