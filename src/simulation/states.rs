//! Core state types for the particle simulation.
//!
//! A state is a flat list of `NVec3` with two entries per particle:
//! - `state[2 * i]`     position of particle `i`
//! - `state[2 * i + 1]` velocity of particle `i`
//!
//! The derivative returned by `eval_f` has the same layout
//! (velocity, acceleration) per particle.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// Position of particle `i` in `state`
#[inline]
pub fn position(state: &[NVec3], i: usize) -> NVec3 {
    state[2 * i]
}

/// Velocity of particle `i` in `state`
#[inline]
pub fn velocity(state: &[NVec3], i: usize) -> NVec3 {
    state[2 * i + 1]
}

/// Number of particles described by `state`
#[inline]
pub fn particle_count(state: &[NVec3]) -> usize {
    state.len() / 2
}

/// Build a state from positions, every particle at rest
pub fn rest_state(positions: &[NVec3]) -> Vec<NVec3> {
    let mut state = Vec::with_capacity(2 * positions.len());
    for p in positions {
        state.push(*p); // x
        state.push(NVec3::zeros()); // v
    }
    state
}

/// World axis, used for swing driving and geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> NVec3 {
        match self {
            Axis::X => NVec3::x(),
            Axis::Y => NVec3::y(),
            Axis::Z => NVec3::z(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_state_interleaves_zero_velocities() {
        let s = rest_state(&[NVec3::new(1.0, 2.0, 3.0), NVec3::new(4.0, 5.0, 6.0)]);
        assert_eq!(s.len(), 4);
        assert_eq!(particle_count(&s), 2);
        assert_eq!(position(&s, 1), NVec3::new(4.0, 5.0, 6.0));
        assert_eq!(velocity(&s, 0), NVec3::zeros());
    }

    #[test]
    fn axis_units_match_index() {
        for axis in Axis::ALL {
            assert_eq!(axis.unit()[axis.index()], 1.0);
        }
    }
}
