//! Atmospheric density model for meteoroid ablation.
//!
//! Density is evaluated from a fifth-degree polynomial fit of log10 density
//! against height. The fit is only trustworthy inside the range it was
//! calibrated against (the meteor ablation zone, roughly 60 to 180 km);
//! outside it the result stays positive but drifts away from reality.

use crate::constants::{
    DENSITY_POLY_TERMS, G_CM3_TO_KG_M3, MAX_PROFILE_SAMPLES, M_TO_KM, STANDARD_DENSITY_COEFFS,
};

/// Ordered log-density polynomial coefficients, lowest degree first
pub type DensityCoefficients = [f64; DENSITY_POLY_TERMS];

/// Evaluate the log10 density polynomial at a height.
///
/// # Arguments
/// * `height_km` - Height in kilometers
/// * `coeffs` - Polynomial coefficients, lowest degree first
///
/// # Returns
/// log10 of density in g/cm³
#[inline(always)]
fn log_density(height_km: f64, coeffs: &DensityCoefficients) -> f64 {
    // Horner's scheme, highest degree first
    coeffs
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * height_km + c)
}

/// Atmospheric density at a given height.
///
/// Computes `10^(c0 + c1·h + c2·h² + c3·h³ + c4·h⁴ + c5·h⁵) × 1000` with `h`
/// the height in kilometers.
///
/// # Arguments
/// * `height_m` - Height above sea level in meters
/// * `coeffs` - Log-density fit coefficients (fit against height in km)
///
/// # Returns
/// Air density in kg/m³. Strictly positive for any finite input that does
/// not underflow the exponent.
#[inline]
pub fn atmosphere_density(height_m: f64, coeffs: &DensityCoefficients) -> f64 {
    let height_km = height_m * M_TO_KM;
    10f64.powf(log_density(height_km, coeffs)) * G_CM3_TO_KG_M3
}

/// Atmospheric density at a given height using the standard fit.
#[inline]
pub fn standard_atmosphere_density(height_m: f64) -> f64 {
    atmosphere_density(height_m, &STANDARD_DENSITY_COEFFS)
}

/// Sample the density over a height range.
///
/// # Arguments
/// * `start_m` - First height in meters
/// * `end_m` - Last height in meters (inclusive when reached exactly)
/// * `step_m` - Spacing between samples; its sign is ignored
/// * `coeffs` - Log-density fit coefficients
///
/// # Returns
/// Vector of (height_m, density_kg_m3) pairs ordered from `start_m` toward `end_m`.
/// Empty when `step_m` is zero or not finite, or when the range would need
/// more than `MAX_PROFILE_SAMPLES` samples.
pub fn density_profile(
    start_m: f64,
    end_m: f64,
    step_m: f64,
    coeffs: &DensityCoefficients,
) -> Vec<(f64, f64)> {
    let step = step_m.abs();
    if step == 0.0 || !step.is_finite() || !start_m.is_finite() || !end_m.is_finite() {
        return Vec::new();
    }

    let direction = if end_m >= start_m { 1.0 } else { -1.0 };
    let intervals = ((end_m - start_m).abs() / step).floor();
    if !intervals.is_finite() || intervals >= MAX_PROFILE_SAMPLES as f64 {
        return Vec::new();
    }
    let n_samples = match (intervals as usize).checked_add(1) {
        Some(n) => n,
        None => return Vec::new(),
    };

    (0..n_samples)
        .map(|i| {
            let height = start_m + direction * step * i as f64;
            (height, atmosphere_density(height, coeffs))
        })
        .collect()
}
