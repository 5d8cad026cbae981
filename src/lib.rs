pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{Axis, NVec3};
pub use simulation::spring::{Sphere, Spring};
pub use simulation::params::ForceParams;
pub use simulation::toggles::{SwingAxis, Toggles};
pub use simulation::particle_system::ParticleSystem;
pub use simulation::forces::{EvalContext, ForceSet, ForceTerm};
pub use simulation::simple::SimpleSystem;
pub use simulation::pendulum::PendulumSystem;
pub use simulation::cloth::{ClothSystem, SpringFamily};
pub use simulation::system::System;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, IntegratorConfig, ScenarioConfig, SystemConfig, TogglesConfig};

pub use benchmark::benchmark::{bench_cloth_step, bench_eval_f};
