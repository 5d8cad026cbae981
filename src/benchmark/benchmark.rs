use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::IntegratorConfig;
use crate::simulation::cloth::ClothSystem;
use crate::simulation::forces::EvalContext;
use crate::simulation::integrator;
use crate::simulation::system::System;
use crate::simulation::toggles::Toggles;

/// Time a single cloth derivative evaluation for growing grids
/// Paste output directly into a spreadsheet to graph
pub fn bench_eval_f() {
    println!("side,particles,springs,eval_ms,eval_self_collision_ms");

    let plain = Toggles::default();
    let mut with_contacts = Toggles::default();
    with_contacts.toggle_self_collision();

    for side in (10..=80).step_by(10) {
        let Ok(cloth) = ClothSystem::new(side, side) else {
            continue;
        };
        let state = cloth.state().to_vec();
        let mut rng = StdRng::seed_from_u64(42);

        // Small grids: average over a few evaluations to smooth noise
        let reps = if side <= 30 { 20 } else { 3 };

        let mut ctx = EvalContext::new(&plain, &mut rng);
        let _ = cloth.eval_f(&state, &mut ctx); // warm-up
        let t0 = Instant::now();
        for _ in 0..reps {
            let _ = cloth.eval_f(&state, &mut ctx);
        }
        let ms_plain = t0.elapsed().as_secs_f64() * 1000.0 / reps as f64;

        let mut ctx = EvalContext::new(&with_contacts, &mut rng);
        let t1 = Instant::now();
        for _ in 0..reps {
            let _ = cloth.eval_f(&state, &mut ctx);
        }
        let ms_contacts = t1.elapsed().as_secs_f64() * 1000.0 / reps as f64;

        println!(
            "{},{},{},{:.6},{:.6}",
            side,
            cloth.base.num_particles(),
            cloth.base.springs().len(),
            ms_plain,
            ms_contacts
        );
    }
}

/// Per-step cost of each integrator on a fixed cloth
pub fn bench_cloth_step() {
    let steps = 50;
    for method in [IntegratorConfig::Euler, IntegratorConfig::Trapezoidal, IntegratorConfig::Rk4] {
        let Ok(cloth) = ClothSystem::new(30, 30) else {
            return;
        };
        let mut sys = System::from(cloth);
        let toggles = Toggles::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut ctx = EvalContext::new(&toggles, &mut rng);

        let t0 = Instant::now();
        for _ in 0..steps {
            if integrator::step(&method, &mut sys, &mut ctx, 0.001).is_err() {
                return;
            }
        }
        let per_step = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
        println!("{:?}: {:8.6} ms/step", method, per_step);
    }
}
