//! Tuning constants for the force model
//!
//! `ForceParams` holds every constant the force terms use:
//! - gravity,
//! - penalty collision gains and activation thresholds,
//! - swing drive magnitude and sweep length,
//! - self-collision grid and contact spring settings,
//! - the epsilon under which a distance or speed counts as degenerate

use crate::simulation::states::NVec3;

#[derive(Debug, Clone)]
pub struct ForceParams {
    pub gravity: NVec3, // constant gravitational acceleration
    pub collision_k: f64, // penalty stiffness of the obstacle response
    pub collision_c_paral: f64, // damping along the contact normal
    pub collision_c_perp: f64, // friction tangential to the contact normal
    pub collision_margin: f64, // response starts at radius + margin
    pub collision_depth_scale: f64, // depth is measured in units of this length
    pub collision_depth_floor: f64, // scaled depth never drops below this
    pub swing_force: f64, // magnitude of the driven sweep on fixed particles
    pub swing_length: f64, // sweep turns around past +/- this displacement
    pub self_collision_cells: usize, // grid cells per axis
    pub self_collision_distance: f64, // contact distance, in units of cell size
    pub self_collision_rest: f64, // contact spring rest length, in units of cell size
    pub self_collision_stiffness: f64, // contact spring stiffness, per unit cell size
    pub eps: f64, // degeneracy threshold
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            gravity: NVec3::new(0.0, -9.8, 0.0),
            collision_k: 160.0,
            collision_c_paral: 40.0,
            collision_c_perp: 5.0,
            collision_margin: 0.1,
            collision_depth_scale: 1e-2,
            collision_depth_floor: 1.0,
            swing_force: 5.0,
            swing_length: 8.0,
            self_collision_cells: 5,
            self_collision_distance: 1.5,
            self_collision_rest: 1.0,
            self_collision_stiffness: 1000.0,
            eps: 1e-9,
        }
    }
}
