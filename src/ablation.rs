//! Mass loss (ablation) equation and its RK4 step.
//!
//! dm/dt = −K · σ · m^(2/3) · ρ_atm · v³
//!
//! Velocity and atmosphere density are frozen across the RK4 sub-stages:
//! mass and velocity are integrated separately within one outer step, which
//! makes the coupling between them first order in `dt`.

use crate::constants::ABLATION_MASS_EXPONENT;
use crate::integrator::{rk4_stages, DepletionClamp, Rk4Stages};

/// Ablation mass loss rate.
///
/// # Arguments
/// * `k` - Shape-density coefficient K (m²·kg^(−2/3))
/// * `sigma` - Ablation coefficient σ (s²/m²)
/// * `mass` - Fragment mass (kg). Must be non-negative; a negative mass has
///   no real 2/3 power and yields NaN.
/// * `rho_atm` - Atmosphere density (kg/m³)
/// * `velocity` - Fragment speed (m/s)
///
/// # Returns
/// dm/dt in kg/s, never positive for non-negative inputs
#[inline(always)]
pub fn mass_loss_rate(k: f64, sigma: f64, mass: f64, rho_atm: f64, velocity: f64) -> f64 {
    -k * sigma * mass.powf(ABLATION_MASS_EXPONENT) * rho_atm * velocity.powi(3)
}

/// Stage increments of one ablation RK4 step, after the depletion clamp.
///
/// Exposed so the clamped stages can be inspected; most callers want
/// [`mass_loss_step`].
#[inline]
pub fn mass_loss_stages(
    dt: f64,
    k: f64,
    sigma: f64,
    mass: f64,
    rho_atm: f64,
    velocity: f64,
) -> Rk4Stages {
    rk4_stages(
        dt,
        mass,
        |m| mass_loss_rate(k, sigma, m, rho_atm, velocity),
        &DepletionClamp,
    )
}

/// Mass change over one time step.
///
/// Classic RK4 over mass with the depletion clamp on the first three
/// stages. The clamp keeps the intermediate stages at non-negative mass but
/// does not bound the combined result: `mass + Δm` may still fall below zero
/// when the step removes more than the remaining mass.
///
/// # Returns
/// Δm in kg (non-positive for non-negative inputs)
#[inline]
pub fn mass_loss_step(dt: f64, k: f64, sigma: f64, mass: f64, rho_atm: f64, velocity: f64) -> f64 {
    mass_loss_stages(dt, k, sigma, mass, rho_atm, velocity).increment()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::standard_atmosphere_density;
    use approx::assert_relative_eq;

    const K: f64 = 0.04;
    const SIGMA: f64 = 2.3e-8;
    const MASS: f64 = 2e-5;
    const VELOCITY: f64 = 23570.0;
    const DT: f64 = 0.005;

    #[test]
    fn test_rate_formula() {
        let rate = mass_loss_rate(2.0, 0.5, 8.0, 3.0, 10.0);
        // -2 * 0.5 * 8^(2/3) * 3 * 10^3 = -12000
        assert_relative_eq!(rate, -12000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_rate_is_never_positive() {
        for &m in &[0.0, 1e-9, 1e-3, 1.0, 50.0] {
            for &v in &[0.0, 11_000.0, 72_000.0] {
                assert!(mass_loss_rate(K, SIGMA, m, 1e-6, v) <= 0.0);
            }
        }
    }

    #[test]
    fn test_zero_mass_has_zero_rate() {
        assert_eq!(mass_loss_rate(K, SIGMA, 0.0, 1e-6, VELOCITY), 0.0);
    }

    #[test]
    fn test_negative_mass_is_nan() {
        assert!(mass_loss_rate(K, SIGMA, -1.0, 1e-6, VELOCITY).is_nan());
    }

    #[test]
    fn test_zero_sigma_gives_no_loss() {
        let rho_atm = standard_atmosphere_density(90_000.0);
        assert_eq!(mass_loss_step(DT, K, 0.0, MASS, rho_atm, VELOCITY), 0.0);
        assert_eq!(mass_loss_step(1.0, K, 0.0, 5.0, 1.0, 70_000.0), 0.0);
    }

    #[test]
    fn test_zero_k_gives_no_loss() {
        let rho_atm = standard_atmosphere_density(90_000.0);
        assert_eq!(mass_loss_step(DT, 0.0, SIGMA, MASS, rho_atm, VELOCITY), 0.0);
    }

    #[test]
    fn test_small_step_approaches_rate() {
        let rho_atm = standard_atmosphere_density(100_000.0);
        let rate = mass_loss_rate(K, SIGMA, MASS, rho_atm, VELOCITY);

        let dt = 1e-7;
        let averaged = mass_loss_step(dt, K, SIGMA, MASS, rho_atm, VELOCITY) / dt;
        assert_relative_eq!(averaged, rate, max_relative = 1e-6);
    }

    #[test]
    fn test_first_stage_clamped_to_twice_mass() {
        // Unclamped k1 = dt * rate(m) = -1 * 1 * 1 * 1 * 1000 = -1000, far beyond -2m
        let mass = 1.0;
        let unclamped = 1.0 * mass_loss_rate(1.0, 1.0, mass, 1.0, 10.0);
        assert!(-unclamped / 2.0 > mass);

        let stages = mass_loss_stages(1.0, 1.0, 1.0, mass, 1.0, 10.0);
        assert_eq!(stages.k1, -2.0 * mass);
        assert_ne!(stages.k1, unclamped);
    }

    #[test]
    fn test_heavy_depletion_stages() {
        // k1 is clamped to -2m, which puts stage 2 at zero mass where the rate vanishes.
        // Stage 3 is back at full mass and clamps to -m; stage 4 lands on zero again.
        let mass = 0.5;
        let stages = mass_loss_stages(1.0, 1.0, 1.0, mass, 1.0, 100.0);
        assert_eq!(stages.k1, -1.0);
        assert_eq!(stages.k2, 0.0);
        assert_eq!(stages.k3, -0.5);
        assert_eq!(stages.k4, 0.0);

        let dm = stages.increment();
        assert_relative_eq!(dm, -2.0 / 3.0 * mass, max_relative = 1e-12);
        assert!(mass + dm > 0.0);
    }

    #[test]
    fn test_unclamped_when_loss_is_small() {
        let rho_atm = standard_atmosphere_density(100_000.0);
        let stages = mass_loss_stages(DT, K, SIGMA, MASS, rho_atm, VELOCITY);
        let k1 = DT * mass_loss_rate(K, SIGMA, MASS, rho_atm, VELOCITY);
        assert_eq!(stages.k1, k1);

        let k2 = DT * mass_loss_rate(K, SIGMA, MASS + k1 / 2.0, rho_atm, VELOCITY);
        assert_eq!(stages.k2, k2);
    }

    #[test]
    fn test_typical_meteoroid_step() {
        let rho_atm = standard_atmosphere_density(100_000.0);
        let dm = mass_loss_step(DT, K, SIGMA, MASS, rho_atm, VELOCITY);

        // About -2.2e-8 kg for this fragment
        assert!(dm < 0.0);
        assert!(dm > -1e-7, "dm = {dm}");

        let new_mass = MASS + dm;
        assert!(new_mass > 0.0 && new_mass < MASS);
    }
}
