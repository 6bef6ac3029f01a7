//! Per-step kernel evaluation for one fragment or many.
//!
//! Every call is independent, so a batch is evaluated with rayon's parallel
//! iterators. Only scalar snapshots cross into the workers; the fragment
//! records themselves stay with the driver.

use rayon::prelude::*;

use crate::ablation::mass_loss_step;
use crate::atmosphere::{atmosphere_density, DensityCoefficients};
use crate::deceleration::deceleration_step;
use crate::luminosity::luminous_efficiency;
use crate::params::FragmentState;

/// Scalar snapshot of everything one kernel step reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelInput {
    /// Shape-density coefficient K
    pub k: f64,
    /// Ablation coefficient σ (s²/m²)
    pub sigma: f64,
    /// Mass (kg)
    pub mass: f64,
    /// Atmosphere density at the fragment (kg/m³)
    pub rho_atm: f64,
    /// Speed (m/s)
    pub speed: f64,
}

/// Result of one kernel step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelOutput {
    /// Mass change over the step (kg)
    pub mass_change: f64,
    /// Step-averaged deceleration (m/s²)
    pub deceleration: f64,
    /// Luminous efficiency at the current speed
    pub luminous_efficiency: f64,
}

impl FragmentState {
    /// Snapshot the fragment for a kernel call at the given atmosphere density.
    #[inline]
    pub fn snapshot(&self, rho_atm: f64) -> KernelInput {
        KernelInput {
            k: self.k(),
            sigma: self.sigma,
            mass: self.mass,
            rho_atm,
            speed: self.speed,
        }
    }

    /// Snapshot the fragment at a height, sampling the atmosphere there.
    #[inline]
    pub fn snapshot_at_height(&self, height_m: f64, coeffs: &DensityCoefficients) -> KernelInput {
        self.snapshot(atmosphere_density(height_m, coeffs))
    }
}

/// Run both RK4 steps on one snapshot.
///
/// Mass and velocity are advanced from the same snapshot; neither step sees
/// the other's result.
#[inline]
pub fn evaluate(dt: f64, input: &KernelInput) -> KernelOutput {
    KernelOutput {
        mass_change: mass_loss_step(dt, input.k, input.sigma, input.mass, input.rho_atm, input.speed),
        deceleration: deceleration_step(dt, input.k, input.mass, input.rho_atm, input.speed),
        luminous_efficiency: luminous_efficiency(input.speed),
    }
}

/// Evaluate many snapshots in parallel. Output order matches input order.
pub fn evaluate_batch(dt: f64, inputs: &[KernelInput]) -> Vec<KernelOutput> {
    tracing::debug!(fragments = inputs.len(), dt, "evaluating kernel batch");
    inputs.par_iter().map(|input| evaluate(dt, input)).collect()
}
