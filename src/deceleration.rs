//! Drag deceleration equation and its RK4 step.
//!
//! dv/dt = −K · m^(−1/3) · ρ_atm · v²

use crate::constants::DRAG_MASS_EXPONENT;
use crate::integrator::{rk4_stages, NoClamp, Rk4Stages};

/// Drag deceleration.
///
/// # Arguments
/// * `k` - Shape-density coefficient K
/// * `mass` - Fragment mass (kg), must be positive
/// * `rho_atm` - Atmosphere density (kg/m³)
/// * `velocity` - Fragment speed (m/s)
///
/// # Returns
/// dv/dt in m/s². Zero mass gives an infinite magnitude and negative mass NaN.
#[inline(always)]
pub fn deceleration_rate(k: f64, mass: f64, rho_atm: f64, velocity: f64) -> f64 {
    -k * mass.powf(DRAG_MASS_EXPONENT) * rho_atm * velocity * velocity
}

/// Raw (unclamped) stage increments of one drag RK4 step over velocity.
#[inline]
pub fn deceleration_stages(dt: f64, k: f64, mass: f64, rho_atm: f64, velocity: f64) -> Rk4Stages {
    rk4_stages(
        dt,
        velocity,
        |v| deceleration_rate(k, mass, rho_atm, v),
        &NoClamp,
    )
}

/// Step-averaged deceleration over one time step.
///
/// Runs RK4 over velocity with mass and atmosphere density held fixed and
/// divides the velocity change by `dt`. The caller multiplies by `dt` to get
/// Δv. No clamping: the rate only ever slows the fragment, so a step from
/// v ≥ 0 does not need stabilizing.
///
/// `dt` must be non-zero.
#[inline]
pub fn deceleration_step(dt: f64, k: f64, mass: f64, rho_atm: f64, velocity: f64) -> f64 {
    deceleration_stages(dt, k, mass, rho_atm, velocity).increment() / dt
}
