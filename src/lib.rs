//! # Meteor Ablation
//!
//! Numerical kernel for meteoroid entry simulation: RK4 ablation and drag
//! steps, a polynomial atmosphere density fit, and luminous efficiency.
//!
//! Every kernel function is pure and works on scalar snapshots, so a driver
//! may evaluate any number of fragments in parallel.

// Re-export the main types and functions
pub use ablation::{mass_loss_rate, mass_loss_stages, mass_loss_step};
pub use atmosphere::{atmosphere_density, density_profile, standard_atmosphere_density, DensityCoefficients};
pub use batch::{evaluate, evaluate_batch, KernelInput, KernelOutput};
pub use deceleration::{deceleration_rate, deceleration_stages, deceleration_step};
pub use error::{AblationError, Result};
pub use integrator::{rk4_increment, rk4_stages, DepletionClamp, NoClamp, Rk4Stages, Stage, StageClamp};
pub use luminosity::luminous_efficiency;
pub use params::{shape_density_coefficient, FragmentState, SimulationConstants};

// Module declarations
pub mod constants;
pub mod error;
pub mod params;
mod atmosphere;
mod integrator;
mod ablation;
mod deceleration;
mod luminosity;
mod batch;
