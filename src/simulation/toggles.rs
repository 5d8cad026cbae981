//! Interactive switches read by `eval_f`
//!
//! `Toggles` is owned by the driving loop and handed to every derivative
//! evaluation as an immutable value. Wind, self-collision and per-axis
//! swing can be flipped between steps without touching the system itself.

use crate::simulation::states::{Axis, NVec3};

/// Swing drive state for one world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwingAxis {
    pub enabled: bool,
    pub forward: bool, // true: sweeping toward -axis
}

impl Default for SwingAxis {
    fn default() -> Self {
        Self { enabled: false, forward: true }
    }
}

impl SwingAxis {
    /// Signed drive along the axis: toward `-axis` while sweeping forward,
    /// toward `+axis` otherwise
    ///
    /// Depends on the stored direction only, so every stage of a multi-stage
    /// integrator sees the same drive. [`Toggles::advance_swing`] turns it
    /// around once the midpoint passes `+/- length`.
    pub fn drive(&self, magnitude: f64) -> f64 {
        if self.forward {
            -magnitude
        } else {
            magnitude
        }
    }

    fn turned(&self, p: f64, length: f64) -> bool {
        (self.forward && p <= -length) || (!self.forward && p >= length)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toggles {
    pub wind: bool,
    pub swing: [SwingAxis; 3],
    pub self_collision: bool,
}

impl Toggles {
    pub fn toggle_wind(&mut self) {
        self.wind = !self.wind;
    }

    pub fn toggle_swing(&mut self, axis: Axis) {
        let s = &mut self.swing[axis.index()];
        s.enabled = !s.enabled;
    }

    pub fn toggle_self_collision(&mut self) {
        self.self_collision = !self.self_collision;
    }

    pub fn swing(&self, axis: Axis) -> SwingAxis {
        self.swing[axis.index()]
    }

    pub fn any_swing(&self) -> bool {
        self.swing.iter().any(|s| s.enabled)
    }

    /// Flip the sweep direction of every enabled axis whose turning point
    /// `p_mid` has reached. Called once per accepted step.
    pub fn advance_swing(&mut self, p_mid: NVec3, length: f64) {
        for axis in Axis::ALL {
            let s = &mut self.swing[axis.index()];
            if s.enabled && s.turned(p_mid[axis.index()], length) {
                s.forward = !s.forward;
                tracing::debug!(?axis, forward = s.forward, "swing turned");
            }
        }
    }
}
