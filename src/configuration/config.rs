//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]  – integrator, step size, run length, seed, output cadence
//! - [`SystemConfig`]  – which system to build and its construction parameters
//! - [`TogglesConfig`] – initial state of the interactive switches
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "rk4"       # "euler", "trapezoidal" or "rk4"
//!   h: 0.005                # fixed step size
//!   t_end: 5.0              # total simulation time
//!   seed: 42                # wind RNG seed
//!   frame_every: 10         # report every n-th step
//!
//! system:
//!   kind: cloth             # simple | pendulum | cloth
//!   rows: 10
//!   cols: 10
//!
//! toggles:
//!   wind: true
//!   swing: [false, false, true]   # x, y, z
//!   self_collision: false
//! ```

use serde::Deserialize;

/// Which integrator advances the state
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorConfig {
    #[serde(rename = "euler")] // forward Euler, one evaluation per step
    Euler,

    #[serde(rename = "trapezoidal")] // Heun's method, two evaluations per step
    Trapezoidal,

    #[serde(rename = "rk4")] // classical Runge–Kutta, four evaluations per step
    Rk4,
}

/// Time stepping settings
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig,
    pub h: f64, // fixed step size
    pub t_end: f64, // stop once t reaches this
    #[serde(default)]
    pub seed: u64, // wind RNG seed, makes runs reproducible
    #[serde(default = "default_frame_every")]
    pub frame_every: usize, // observer is called every n-th step
}

fn default_frame_every() -> usize {
    1
}

/// System to build
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SystemConfig {
    Simple,
    Pendulum { particles: usize },
    Cloth { rows: usize, cols: usize },
}

/// Initial switch positions
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TogglesConfig {
    #[serde(default)]
    pub wind: bool,
    #[serde(default)]
    pub swing: [bool; 3], // x, y, z
    #[serde(default)]
    pub self_collision: bool,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub system: SystemConfig,
    #[serde(default)]
    pub toggles: TogglesConfig,
}
