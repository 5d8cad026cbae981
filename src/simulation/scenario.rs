//! Build and drive simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - the system being simulated (`System`)
//! - the interactive switches (`Toggles`)
//! - the integrator choice and step settings
//! - the seeded RNG that feeds wind
//!
//! `Scenario` is the driving loop: it owns the switches, calls the
//! integrator, and advances the swing sweep between steps.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::configuration::config::{EngineConfig, IntegratorConfig, ScenarioConfig, SystemConfig, TogglesConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::cloth::ClothSystem;
use crate::simulation::forces::EvalContext;
use crate::simulation::integrator;
use crate::simulation::pendulum::PendulumSystem;
use crate::simulation::simple::SimpleSystem;
use crate::simulation::states::{Axis, NVec3};
use crate::simulation::system::System;
use crate::simulation::toggles::Toggles;

pub struct Scenario {
    pub system: System,
    pub toggles: Toggles,
    pub integrator: IntegratorConfig,
    pub h: f64,
    pub t_end: f64,
    pub t: f64,
    pub steps: usize,
    pub frame_every: usize,
    rng: StdRng,
}

impl Scenario {
    /// Rejects step sizes that are not positive and finite, and non-finite end times
    pub fn new(system: System, toggles: Toggles, engine: &EngineConfig) -> SimResult<Self> {
        if !(engine.h.is_finite() && engine.h > 0.0 && engine.t_end.is_finite()) {
            return Err(SimError::InvalidStep { h: engine.h, t_end: engine.t_end });
        }
        Ok(Self {
            system,
            toggles,
            integrator: engine.integrator,
            h: engine.h,
            t_end: engine.t_end,
            t: 0.0,
            steps: 0,
            frame_every: engine.frame_every.max(1),
            rng: StdRng::seed_from_u64(engine.seed),
        })
    }

    pub fn build_scenario(cfg: &ScenarioConfig) -> SimResult<Self> {
        let system = build_system(&cfg.system)?;
        let toggles = build_toggles(&cfg.toggles);

        info!(
            system = system.name(),
            particles = system.base().num_particles(),
            springs = system.base().springs().len(),
            integrator = ?cfg.engine.integrator,
            h = cfg.engine.h,
            "scenario ready"
        );

        Self::new(system, toggles, &cfg.engine)
    }

    /// Derivative of the current state under the current switches
    pub fn derivative(&mut self) -> Vec<NVec3> {
        let mut ctx = EvalContext::new(&self.toggles, &mut self.rng);
        self.system.eval_f(self.system.state(), &mut ctx)
    }

    /// Integrate one step of size `h`
    pub fn step(&mut self) -> SimResult<()> {
        let mut ctx = EvalContext::new(&self.toggles, &mut self.rng);
        integrator::step(&self.integrator, &mut self.system, &mut ctx, self.h)?;

        if self.toggles.any_swing() {
            let base = self.system.base();
            if let Some(p_mid) = base.swing_anchor(base.state()) {
                self.toggles.advance_swing(p_mid, base.params.swing_length);
            }
        }

        self.t += self.h;
        self.steps += 1;
        Ok(())
    }

    /// Step until `t_end`, handing `(t, state)` to `observer` at t = 0 and
    /// every `frame_every` steps. Returns the number of steps taken.
    pub fn run<F>(&mut self, mut observer: F) -> SimResult<usize>
    where
        F: FnMut(f64, &[NVec3]) -> SimResult<()>,
    {
        observer(self.t, self.system.state())?;

        let start = self.steps;
        // half-step slack so rounding in t never adds an extra step
        while self.t + 0.5 * self.h < self.t_end {
            self.step()?;
            if self.steps % self.frame_every == 0 {
                debug!(t = self.t, step = self.steps, "frame");
                observer(self.t, self.system.state())?;
            }
        }

        info!(steps = self.steps - start, t = self.t, "run finished");
        Ok(self.steps - start)
    }
}

pub fn build_system(cfg: &SystemConfig) -> SimResult<System> {
    let system = match *cfg {
        SystemConfig::Simple => System::from(SimpleSystem::new()),
        SystemConfig::Pendulum { particles } => System::from(PendulumSystem::new(particles)?),
        SystemConfig::Cloth { rows, cols } => System::from(ClothSystem::new(rows, cols)?),
    };
    Ok(system)
}

pub fn build_toggles(cfg: &TogglesConfig) -> Toggles {
    let mut toggles = Toggles::default();
    if cfg.wind {
        toggles.toggle_wind();
    }
    if cfg.self_collision {
        toggles.toggle_self_collision();
    }
    for axis in Axis::ALL {
        if cfg.swing[axis.index()] {
            toggles.toggle_swing(axis);
        }
    }
    toggles
}
