//! Simulation parameter records.
//!
//! [`SimulationConstants`] is built once per run and shared by reference.
//! [`FragmentState`] is owned by the driver, one per fragment, and is the
//! only record that changes between steps. The kernel functions take scalar
//! snapshots of both and never hold on to either.

use std::path::Path;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::atmosphere::DensityCoefficients;
use crate::constants::*;
use crate::error::{AblationError, Result};

/// Shape-density coefficient K = γ · A · ρ^(−2/3).
///
/// # Arguments
/// * `gamma` - Drag coefficient
/// * `shape_factor` - Shape factor A
/// * `bulk_density` - Meteoroid bulk density (kg/m³), must be positive
#[inline]
pub fn shape_density_coefficient(gamma: f64, shape_factor: f64, bulk_density: f64) -> f64 {
    gamma * shape_factor * bulk_density.powf(BULK_DENSITY_EXPONENT)
}

/// Run-wide simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConstants {
    /// Log-density polynomial, lowest degree first, fit against height in km
    pub density_coefficients: DensityCoefficients,
    /// Drag coefficient γ
    pub gamma: f64,
    /// Shape factor A
    pub shape_factor: f64,
    /// Integration time step (s)
    pub dt: f64,
    /// Main-body ablation coefficient σ (s²/m²)
    pub sigma: f64,
    /// Default bulk density for new fragments (kg/m³)
    pub rho: f64,

    // Consumed by the fragmentation driver only
    /// Height below which erosion starts (m)
    pub erosion_height_start: f64,
    /// Erosion coefficient (s²/m²)
    pub erosion_coeff: f64,
    /// Whether disruption is modeled
    pub disruption_on: bool,
    /// Compressive strength triggering disruption (Pa)
    pub compressive_strength: f64,
}

impl Default for SimulationConstants {
    fn default() -> Self {
        Self {
            density_coefficients: STANDARD_DENSITY_COEFFS,
            gamma: DEFAULT_GAMMA,
            shape_factor: DEFAULT_SHAPE_FACTOR,
            dt: DEFAULT_DT,
            sigma: DEFAULT_SIGMA,
            rho: DEFAULT_BULK_DENSITY,
            erosion_height_start: DEFAULT_EROSION_HEIGHT_START,
            erosion_coeff: DEFAULT_EROSION_COEFF,
            disruption_on: false,
            compressive_strength: DEFAULT_COMPRESSIVE_STRENGTH,
        }
    }
}

impl SimulationConstants {
    /// Parse constants from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let constants: Self = serde_json::from_str(json)?;
        constants.validate()?;
        tracing::debug!(
            dt = constants.dt,
            sigma = constants.sigma,
            rho = constants.rho,
            "loaded simulation constants"
        );
        Ok(constants)
    }

    /// Read and parse constants from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading simulation constants");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the parameters the kernel depends on.
    ///
    /// Only configuration-time checking: the kernel functions themselves stay
    /// unchecked.
    pub fn validate(&self) -> Result<()> {
        if let Some(i) = self.density_coefficients.iter().position(|c| !c.is_finite()) {
            return Err(AblationError::InvalidParameter(format!(
                "density coefficient {i} is not finite"
            )));
        }
        require_positive("dt", self.dt)?;
        require_positive("gamma", self.gamma)?;
        require_positive("shape_factor", self.shape_factor)?;
        require_positive("rho", self.rho)?;
        require_non_negative("sigma", self.sigma)?;
        require_non_negative("erosion_coeff", self.erosion_coeff)?;
        require_non_negative("compressive_strength", self.compressive_strength)?;
        if !self.erosion_height_start.is_finite() {
            return Err("erosion_height_start must be finite".into());
        }
        Ok(())
    }

    /// K for a fragment of the given bulk density under these constants
    #[inline]
    pub fn shape_density_coefficient(&self, bulk_density: f64) -> f64 {
        shape_density_coefficient(self.gamma, self.shape_factor, bulk_density)
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AblationError::InvalidParameter(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AblationError::InvalidParameter(format!(
            "{name} must be a non-negative finite number, got {value}"
        )))
    }
}

/// Per-fragment physical state, owned and mutated by the driver
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentState {
    /// Mass (kg), never negative
    pub mass: f64,
    /// Bulk density (kg/m³)
    rho: f64,
    /// Speed (m/s)
    pub speed: f64,
    /// Velocity components (m/s): x horizontal, y vertical
    pub velocity: Vector2<f64>,
    /// Shape-density coefficient, tied to `rho`
    k: f64,
    /// Whether the fragment still takes part in the simulation
    pub active: bool,
    /// Ablation coefficient σ (s²/m²)
    pub sigma: f64,
    /// Erosion coefficient (s²/m²)
    pub erosion_coeff: f64,
}

impl FragmentState {
    /// Create a fragment, inheriting σ and the erosion coefficient from the constants.
    ///
    /// # Arguments
    /// * `constants` - Run-wide constants
    /// * `mass` - Initial mass (kg), non-negative
    /// * `rho` - Bulk density (kg/m³), positive
    /// * `velocity` - Initial velocity components (m/s)
    pub fn new(
        constants: &SimulationConstants,
        mass: f64,
        rho: f64,
        velocity: Vector2<f64>,
    ) -> Result<Self> {
        require_non_negative("mass", mass)?;
        require_positive("rho", rho)?;
        if !velocity.iter().all(|c| c.is_finite()) {
            return Err("velocity components must be finite".into());
        }

        Ok(Self {
            mass,
            rho,
            speed: velocity.norm(),
            velocity,
            k: constants.shape_density_coefficient(rho),
            active: true,
            sigma: constants.sigma,
            erosion_coeff: constants.erosion_coeff,
        })
    }

    /// Bulk density (kg/m³)
    #[inline]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Shape-density coefficient K
    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Change the bulk density and recompute K.
    pub fn set_density(&mut self, constants: &SimulationConstants, rho: f64) -> Result<()> {
        require_positive("rho", rho)?;
        self.rho = rho;
        self.k = constants.shape_density_coefficient(rho);
        Ok(())
    }

    /// Replace the velocity components and refresh the speed.
    pub fn set_velocity(&mut self, velocity: Vector2<f64>) {
        self.velocity = velocity;
        self.speed = velocity.norm();
    }

    /// Apply a mass change returned by the ablation step.
    ///
    /// Mass is floored at zero and a fully ablated fragment is deactivated.
    pub fn apply_mass_change(&mut self, delta_mass: f64) {
        self.mass = (self.mass + delta_mass).max(0.0);
        if self.mass == 0.0 {
            self.active = false;
        }
    }
}
