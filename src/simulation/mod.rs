pub mod states;
pub mod params;
pub mod spring;
pub mod toggles;
pub mod particle_system;
pub mod forces;
pub mod simple;
pub mod pendulum;
pub mod cloth;
pub mod system;
pub mod integrator;
pub mod scenario;
