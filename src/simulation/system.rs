//! Closed set of simulated systems
//!
//! `System` dispatches the integrator-facing contract (`eval_f`, `state`,
//! `set_state`) to one of the concrete variants.

use crate::error::SimResult;
use crate::simulation::cloth::ClothSystem;
use crate::simulation::forces::EvalContext;
use crate::simulation::particle_system::ParticleSystem;
use crate::simulation::pendulum::PendulumSystem;
use crate::simulation::simple::SimpleSystem;
use crate::simulation::states::NVec3;

#[derive(Debug, Clone)]
pub enum System {
    Simple(SimpleSystem),
    Pendulum(PendulumSystem),
    Cloth(ClothSystem),
}

impl System {
    /// Time derivative of `state`; never mutates the system or the state
    pub fn eval_f(&self, state: &[NVec3], ctx: &mut EvalContext<'_>) -> Vec<NVec3> {
        match self {
            System::Simple(s) => s.eval_f(state, ctx),
            System::Pendulum(s) => s.eval_f(state, ctx),
            System::Cloth(s) => s.eval_f(state, ctx),
        }
    }

    pub fn state(&self) -> &[NVec3] {
        self.base().state()
    }

    pub fn set_state(&mut self, new_state: Vec<NVec3>) -> SimResult<()> {
        match self {
            System::Simple(s) => s.set_state(new_state),
            System::Pendulum(s) => s.set_state(new_state),
            System::Cloth(s) => s.set_state(new_state),
        }
    }

    /// Shared storage and topology
    pub fn base(&self) -> &ParticleSystem {
        match self {
            System::Simple(s) => &s.base,
            System::Pendulum(s) => &s.base,
            System::Cloth(s) => &s.base,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            System::Simple(_) => "simple",
            System::Pendulum(_) => "pendulum",
            System::Cloth(_) => "cloth",
        }
    }
}

impl From<SimpleSystem> for System {
    fn from(s: SimpleSystem) -> Self {
        System::Simple(s)
    }
}

impl From<PendulumSystem> for System {
    fn from(s: PendulumSystem) -> Self {
        System::Pendulum(s)
    }
}

impl From<ClothSystem> for System {
    fn from(s: ClothSystem) -> Self {
        System::Cloth(s)
    }
}
