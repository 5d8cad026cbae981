//! Shared particle-system storage and force primitives
//!
//! [`ParticleSystem`] owns the state vector together with the topology
//! fixed at construction (springs, anchored particles, obstacles).
//! The `apply_*` methods are the building blocks every concrete system
//! composes into its derivative. Each one reads `state` only and adds its
//! contribution into the derivative buffer `f`, so their order never
//! changes what an individual term computes.

use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::simulation::forces::EvalContext;
use crate::simulation::params::ForceParams;
use crate::simulation::spring::{Sphere, Spring};
use crate::simulation::states::{position, rest_state, velocity, Axis, NVec3};
use crate::simulation::toggles::Toggles;

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    num_particles: usize,
    state: Vec<NVec3>,
    springs: Vec<Spring>,
    fixed_particles: Vec<usize>,
    obstacles: Vec<Sphere>,
    pub params: ForceParams,
}

impl ParticleSystem {
    /// Create a system with one particle per position, all at rest
    pub fn from_positions(positions: &[NVec3]) -> Self {
        Self {
            num_particles: positions.len(),
            state: rest_state(positions),
            springs: Vec::new(),
            fixed_particles: Vec::new(),
            obstacles: Vec::new(),
            params: ForceParams::default(),
        }
    }

    pub fn num_particles(&self) -> usize {
        self.num_particles
    }

    /// Current state vector
    pub fn state(&self) -> &[NVec3] {
        &self.state
    }

    /// Replace the state wholesale; the length may never change
    pub fn set_state(&mut self, new_state: Vec<NVec3>) -> SimResult<()> {
        if new_state.len() != self.state.len() {
            return Err(SimError::StateLengthMismatch {
                expected: self.state.len(),
                got: new_state.len(),
            });
        }
        self.state = new_state;
        Ok(())
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn fixed_particles(&self) -> &[usize] {
        &self.fixed_particles
    }

    pub fn obstacles(&self) -> &[Sphere] {
        &self.obstacles
    }

    /// Wrap an index around the particle count (ring topologies)
    pub fn wrap(&self, i: usize) -> usize {
        i % self.num_particles
    }

    fn check_index(&self, index: usize) -> SimResult<()> {
        if index >= self.num_particles {
            return Err(SimError::ParticleOutOfBounds { index, count: self.num_particles });
        }
        Ok(())
    }

    /// Connect `i` and `j`; rejects endpoints that start on top of each other
    pub fn add_spring(&mut self, i: usize, j: usize, rest_length: f64, stiffness: f64) -> SimResult<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        let d = position(&self.state, i) - position(&self.state, j);
        if d.norm() <= self.params.eps {
            return Err(SimError::DegenerateGeometry { i, j });
        }
        self.springs.push(Spring::new(i, j, rest_length, stiffness));
        Ok(())
    }

    pub fn add_fixed_particle(&mut self, i: usize) -> SimResult<()> {
        self.check_index(i)?;
        self.fixed_particles.push(i);
        Ok(())
    }

    pub fn add_obstacle(&mut self, center: NVec3, radius: f64) -> SimResult<()> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidObstacle { radius });
        }
        self.obstacles.push(Sphere::new(center, radius));
        Ok(())
    }

    /// Position of the middle anchored particle, which steers the swing sweep
    pub fn swing_anchor(&self, state: &[NVec3]) -> Option<NVec3> {
        let n = self.fixed_particles.len();
        (n > 0).then(|| position(state, self.fixed_particles[n / 2]))
    }

    // =====================================================================
    // force primitives
    // =====================================================================

    /// Seed the derivative: position slots take the velocity, velocity slots start at zero
    pub fn init_f(&self, state: &[NVec3], f: &mut Vec<NVec3>) {
        f.clear();
        f.reserve(2 * self.num_particles);
        for i in 0..self.num_particles {
            f.push(velocity(state, i));
            f.push(NVec3::zeros());
        }
    }

    pub fn apply_gravity_forces(&self, _state: &[NVec3], f: &mut [NVec3]) {
        let g = self.params.gravity;
        for i in 0..self.num_particles {
            f[2 * i + 1] += g;
        }
    }

    /// Linear drag: `a -= v * c / m`
    pub fn apply_drag_forces(&self, state: &[NVec3], f: &mut [NVec3], drag_coefficient: f64, mass: f64) {
        for i in 0..self.num_particles {
            f[2 * i + 1] -= velocity(state, i) * drag_coefficient / mass;
        }
    }

    pub fn apply_spring_forces(&self, state: &[NVec3], f: &mut [NVec3], mass: f64) {
        for s in &self.springs {
            let p_i = position(state, s.i);
            let p_j = position(state, s.j);
            f[2 * s.i + 1] += s.force(p_i, p_j) / mass;
            f[2 * s.j + 1] += s.force(p_j, p_i) / mass;
        }
    }

    /// Gusty wind, one random draw pair per call shared by all particles
    ///
    /// z follows the first draw scaled by `i / n`, x the second, which tilts
    /// the gust across the particle ordering. Disabled wind returns before
    /// touching the RNG.
    pub fn apply_wind_forces(&self, _state: &[NVec3], f: &mut [NVec3], magnitude: f64, mass: f64, ctx: &mut EvalContext<'_>) {
        if !ctx.toggles.wind {
            return;
        }
        let gust_z = ctx.uniform_centered();
        let gust_x = ctx.uniform_centered();
        let n = self.num_particles as f64;
        for i in 0..self.num_particles {
            let wind = NVec3::new(magnitude * gust_x, 0.0, magnitude * (i as f64) / n * gust_z);
            f[2 * i + 1] += wind / mass;
        }
    }

    /// Penalty response against every obstacle
    ///
    /// Active within `radius + collision_margin` of the center. The push out
    /// is `k / depth` with depth measured in `collision_depth_scale` units
    /// and floored at `collision_depth_floor`, so it saturates instead of
    /// diverging. Normal velocity is damped and tangential velocity feels a
    /// constant-magnitude friction; with no tangential motion the friction is skipped.
    pub fn apply_collision_forces(&self, state: &[NVec3], f: &mut [NVec3]) {
        let p = &self.params;
        for obstacle in &self.obstacles {
            for i in 0..self.num_particles {
                let x = position(state, i);
                let v = velocity(state, i);

                let dist = (x - obstacle.center).norm();
                if dist >= obstacle.radius + p.collision_margin {
                    continue;
                }
                // inward normal, undefined at the exact center
                let Some(n) = (obstacle.center - x).try_normalize(p.eps) else {
                    continue;
                };
                let depth = ((dist - obstacle.radius) / p.collision_depth_scale).max(p.collision_depth_floor);
                let v_paral = v.dot(&n) * n;
                let v_perp = v - v_paral;

                let mut force = -p.collision_k / depth * n - p.collision_c_paral * v_paral;
                if let Some(t) = v_perp.try_normalize(p.eps) {
                    force -= p.collision_c_perp * t;
                }
                f[2 * i + 1] += force;
            }
        }
    }

    /// Contact springs between particles sharing a cell of a coarse wrapped grid
    ///
    /// Cells are `cell_size` wide and wrap every `self_collision_cells` along
    /// each axis, using floor division so negative coordinates land in their
    /// own cells.
    pub fn apply_self_collision_forces(&self, state: &[NVec3], f: &mut [NVec3], cell_size: f64, mass: f64) {
        let p = &self.params;
        let cells = p.self_collision_cells.max(1);
        let mut grid: Vec<Vec<usize>> = vec![Vec::new(); cells * cells * cells];
        let contact = Spring::new(0, 0, p.self_collision_rest * cell_size, p.self_collision_stiffness * cell_size);
        let reach = p.self_collision_distance * cell_size;

        let cell_of = |x: f64| ((x / cell_size).floor() as i64).rem_euclid(cells as i64) as usize;

        for i in 0..self.num_particles {
            let p_i = position(state, i);
            let key = (cell_of(p_i.x) * cells + cell_of(p_i.y)) * cells + cell_of(p_i.z);
            let cell = &mut grid[key];

            for &j in cell.iter() {
                let p_j = position(state, j);
                if (p_i - p_j).norm() < reach {
                    trace!(i, j, occupancy = cell.len(), "self collision");
                    f[2 * i + 1] += contact.force(p_i, p_j) / mass;
                    f[2 * j + 1] += contact.force(p_j, p_i) / mass;
                }
            }
            cell.push(i);
        }
    }

    /// Freeze anchored particles, then add the swing drive on enabled axes
    ///
    /// The drive lands in the position slot, so anchors sweep at constant
    /// speed while their velocity slot stays zero. The sweep direction is
    /// turned by the driver once the middle anchor passes `swing_length`.
    pub fn apply_fixed_particles(&self, state: &[NVec3], f: &mut [NVec3], toggles: &Toggles) {
        debug_assert_eq!(state.len(), f.len());
        let p = &self.params;
        for &i in &self.fixed_particles {
            f[2 * i] = NVec3::zeros();
            f[2 * i + 1] = NVec3::zeros();

            for axis in Axis::ALL {
                let swing = toggles.swing(axis);
                if swing.enabled {
                    f[2 * i] += swing.drive(p.swing_force) * axis.unit();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> ParticleSystem {
        ParticleSystem::from_positions(&[NVec3::zeros(), NVec3::new(0.0, -1.0, 0.0)])
    }

    #[test]
    fn spring_on_coincident_particles_is_rejected() {
        let mut sys = ParticleSystem::from_positions(&[NVec3::zeros(), NVec3::zeros()]);
        assert!(matches!(sys.add_spring(0, 1, 1.0, 1.0), Err(SimError::DegenerateGeometry { i: 0, j: 1 })));
    }

    #[test]
    fn out_of_bounds_indices_are_rejected() {
        let mut sys = pair();
        assert!(matches!(sys.add_fixed_particle(2), Err(SimError::ParticleOutOfBounds { index: 2, count: 2 })));
        assert!(sys.add_spring(0, 5, 1.0, 1.0).is_err());
    }

    #[test]
    fn zero_radius_obstacle_is_rejected() {
        let mut sys = pair();
        assert!(sys.add_obstacle(NVec3::zeros(), 0.0).is_err());
        assert!(sys.add_obstacle(NVec3::zeros(), f64::NAN).is_err());
        assert!(sys.add_obstacle(NVec3::zeros(), 1.0).is_ok());
    }

    #[test]
    fn set_state_keeps_length() {
        let mut sys = pair();
        assert!(sys.set_state(vec![NVec3::zeros(); 3]).is_err());
        assert!(sys.set_state(vec![NVec3::zeros(); 4]).is_ok());
    }

    #[test]
    fn self_collision_grid_separates_mirrored_cells() {
        // |x| hashing would alias these into one cell
        let sys = ParticleSystem::from_positions(&[NVec3::new(-0.05, 0.05, 0.05), NVec3::new(0.05, 0.05, 0.05)]);
        let state = sys.state().to_vec();
        let mut f = Vec::new();
        sys.init_f(&state, &mut f);
        sys.apply_self_collision_forces(&state, &mut f, 0.2, 1.0);
        assert_eq!(f[1], NVec3::zeros());
        assert_eq!(f[3], NVec3::zeros());
    }

    #[test]
    fn self_collision_pushes_close_pair_apart() {
        let sys = ParticleSystem::from_positions(&[NVec3::new(0.01, 0.01, 0.01), NVec3::new(0.05, 0.01, 0.01)]);
        let state = sys.state().to_vec();
        let mut f = Vec::new();
        sys.init_f(&state, &mut f);
        sys.apply_self_collision_forces(&state, &mut f, 0.2, 1.0);
        assert!(f[1].x < 0.0);
        assert!(f[3].x > 0.0);
    }
}
