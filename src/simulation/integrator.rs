//! Fixed-step explicit integrators
//!
//! Each step reads the current state, evaluates the derivative as many
//! times as the scheme needs and writes the new state back once.
//! - Euler: one evaluation
//! - Trapezoidal (Heun): two evaluations
//! - RK4: four evaluations

use crate::configuration::config::IntegratorConfig;
use crate::error::SimResult;
use crate::simulation::forces::EvalContext;
use crate::simulation::states::NVec3;
use crate::simulation::system::System;

/// `x + h * dx`, element-wise
fn offset(x: &[NVec3], dx: &[NVec3], h: f64) -> Vec<NVec3> {
    x.iter().zip(dx).map(|(a, b)| *a + h * *b).collect()
}

/// Advance by one step of size `h` using `method`
pub fn step(method: &IntegratorConfig, sys: &mut System, ctx: &mut EvalContext<'_>, h: f64) -> SimResult<()> {
    match method {
        IntegratorConfig::Euler => euler_step(sys, ctx, h),
        IntegratorConfig::Trapezoidal => trapezoidal_step(sys, ctx, h),
        IntegratorConfig::Rk4 => rk4_step(sys, ctx, h),
    }
}

/// Forward Euler: x_n+1 = x_n + h f(x_n)
pub fn euler_step(sys: &mut System, ctx: &mut EvalContext<'_>, h: f64) -> SimResult<()> {
    let x0 = sys.state().to_vec();
    let f0 = sys.eval_f(&x0, ctx);
    sys.set_state(offset(&x0, &f0, h))
}

/// Trapezoidal rule: average the slope at x_n and at the Euler guess
pub fn trapezoidal_step(sys: &mut System, ctx: &mut EvalContext<'_>, h: f64) -> SimResult<()> {
    let x0 = sys.state().to_vec();
    let f0 = sys.eval_f(&x0, ctx);

    // predictor
    let x1 = offset(&x0, &f0, h);
    let f1 = sys.eval_f(&x1, ctx);

    let half_h = 0.5 * h;
    let next = x0
        .iter()
        .zip(f0.iter().zip(&f1))
        .map(|(x, (a, b))| *x + half_h * (*a + *b))
        .collect();
    sys.set_state(next)
}

/// Classical 4th-order Runge–Kutta
pub fn rk4_step(sys: &mut System, ctx: &mut EvalContext<'_>, h: f64) -> SimResult<()> {
    let x0 = sys.state().to_vec();
    let half_h = 0.5 * h;

    let k1 = sys.eval_f(&x0, ctx);
    let k2 = sys.eval_f(&offset(&x0, &k1, half_h), ctx);
    let k3 = sys.eval_f(&offset(&x0, &k2, half_h), ctx);
    let k4 = sys.eval_f(&offset(&x0, &k3, h), ctx);

    let sixth_h = h / 6.0;
    let next = (0..x0.len())
        .map(|i| x0[i] + sixth_h * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]))
        .collect();
    sys.set_state(next)
}
