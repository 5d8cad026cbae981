//! Force terms composed into a derivative
//!
//! A concrete system lists the terms it wants in a [`ForceSet`]; the set
//! seeds the derivative with `init_f` and then lets every term add its
//! contribution in insertion order, delegating to the primitives on
//! [`ParticleSystem`].

use rand::{Rng, RngCore};

use crate::simulation::particle_system::ParticleSystem;
use crate::simulation::states::{particle_count, NVec3};
use crate::simulation::toggles::Toggles;

/// Per-call inputs that are not part of the state vector
/// - `toggles`: switches owned by the driver, read-only here
/// - `rng`: randomness source consumed by wind
pub struct EvalContext<'a> {
    pub toggles: &'a Toggles,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> EvalContext<'a> {
    pub fn new(toggles: &'a Toggles, rng: &'a mut dyn RngCore) -> Self {
        Self { toggles, rng }
    }

    /// Uniform sample in [-0.5, 0.5)
    pub fn uniform_centered(&mut self) -> f64 {
        self.rng.gen::<f64>() - 0.5
    }
}

/// One contributor to the derivative
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceTerm {
    Gravity,
    Drag { coefficient: f64 },
    Springs,
    Wind { magnitude: f64 },
    Collision,
    SelfCollision { cell_size: f64 }, // runs only when toggled on
    Fixed,
}

/// Ordered collection of force terms
#[derive(Debug, Clone, Default)]
pub struct ForceSet {
    terms: Vec<ForceTerm>,
}

impl ForceSet {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Append a term
    pub fn with(mut self, term: ForceTerm) -> Self {
        self.terms.push(term);
        self
    }

    /// Derivative of `state` for `sys`, every particle weighing `mass`
    pub fn accumulate(&self, sys: &ParticleSystem, state: &[NVec3], mass: f64, ctx: &mut EvalContext<'_>) -> Vec<NVec3> {
        debug_assert_eq!(particle_count(state), sys.num_particles());

        let mut f = Vec::new();
        sys.init_f(state, &mut f);

        for term in &self.terms {
            match *term {
                ForceTerm::Gravity => sys.apply_gravity_forces(state, &mut f),
                ForceTerm::Drag { coefficient } => sys.apply_drag_forces(state, &mut f, coefficient, mass),
                ForceTerm::Springs => sys.apply_spring_forces(state, &mut f, mass),
                ForceTerm::Wind { magnitude } => sys.apply_wind_forces(state, &mut f, magnitude, mass, ctx),
                ForceTerm::Collision => sys.apply_collision_forces(state, &mut f),
                ForceTerm::SelfCollision { cell_size } => {
                    if ctx.toggles.self_collision {
                        sys.apply_self_collision_forces(state, &mut f, cell_size, mass);
                    }
                }
                ForceTerm::Fixed => sys.apply_fixed_particles(state, &mut f, ctx.toggles),
            }
        }
        f
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_set_only_seeds_velocities() {
        let mut sys = ParticleSystem::from_positions(&[NVec3::zeros()]);
        sys.set_state(vec![NVec3::zeros(), NVec3::new(1.0, 2.0, 3.0)]).unwrap();

        let toggles = Toggles::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = EvalContext::new(&toggles, &mut rng);

        let state = sys.state().to_vec();
        let f = ForceSet::new().accumulate(&sys, &state, 1.0, &mut ctx);
        assert_eq!(f, vec![NVec3::new(1.0, 2.0, 3.0), NVec3::zeros()]);
    }

    #[test]
    fn gravity_and_drag_combine() {
        let mut sys = ParticleSystem::from_positions(&[NVec3::zeros()]);
        sys.set_state(vec![NVec3::zeros(), NVec3::new(2.0, 0.0, 0.0)]).unwrap();

        let toggles = Toggles::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = EvalContext::new(&toggles, &mut rng);

        let set = ForceSet::new().with(ForceTerm::Gravity).with(ForceTerm::Drag { coefficient: 0.5 });
        let state = sys.state().to_vec();
        let f = set.accumulate(&sys, &state, 2.0, &mut ctx);
        assert_eq!(f[1], NVec3::new(-0.5, -9.8, 0.0));
    }
}
