//! Connector and obstacle primitives
//!
//! - [`Spring`]: linear Hookean link between two particle indices
//! - [`Sphere`]: static spherical obstacle for penalty collisions

use crate::simulation::states::NVec3;

/// Separation under which a spring has no usable direction
const MIN_SEPARATION: f64 = 1e-12;

/// Undamped linear spring between particles `i` and `j`
/// Damping is global (drag), not per spring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub i: usize,
    pub j: usize,
    pub rest_length: f64,
    pub stiffness: f64,
}

impl Spring {
    pub fn new(i: usize, j: usize, rest_length: f64, stiffness: f64) -> Self {
        Self { i, j, rest_length, stiffness }
    }

    /// Force on the particle at `p_i` from its partner at `p_j`
    ///
    /// `F = -k * (|p_i - p_j| - L) * (p_i - p_j) / |p_i - p_j|`
    ///
    /// Stretched springs pull `p_i` toward `p_j`, compressed springs push it away.
    /// Coincident endpoints have no direction and yield zero force.
    pub fn force(&self, p_i: NVec3, p_j: NVec3) -> NVec3 {
        let d = p_i - p_j;
        match d.try_normalize(MIN_SEPARATION) {
            Some(dir) => -self.stiffness * (d.norm() - self.rest_length) * dir,
            None => NVec3::zeros(),
        }
    }

    /// True if the spring touches particle `k`
    pub fn connects(&self, k: usize) -> bool {
        self.i == k || self.j == k
    }
}

/// Static sphere used as a collision obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: NVec3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: NVec3, radius: f64) -> Self {
        Self { center, radius }
    }
}
