//! Physical and model constants used by the ablation kernel

/// Number of coefficients in the atmospheric log-density polynomial
pub const DENSITY_POLY_TERMS: usize = 6;

/// Standard atmosphere log-density fit
///
/// Coefficients are ordered lowest to highest degree and fitted against
/// height in kilometers. The polynomial yields log10 of density in g/cm³;
/// `atmosphere_density` converts the result to kg/m³.
///
/// Calibrated range: roughly 0 to 180 km. Above that the fit diverges.
pub const STANDARD_DENSITY_COEFFS: [f64; DENSITY_POLY_TERMS] = [
    -9.02726494,
    0.108986696,
    -0.0005189,
    -2.0646e-5,
    1.93881e-7,
    -4.7231e-10,
];

/// Conversion factor: g/cm³ to kg/m³
pub const G_CM3_TO_KG_M3: f64 = 1000.0;

/// Conversion factor: meters to kilometers
pub const M_TO_KM: f64 = 1.0e-3;

/// Upper bound on the number of heights a density profile will sample
pub const MAX_PROFILE_SAMPLES: usize = 1_000_000;

/// Luminous efficiency placeholder
///
/// Value: 0.7% of kinetic energy loss radiated in the visible band.
/// A velocity-dependent model will replace this; until then every speed
/// maps to the same ratio.
pub const LUMINOUS_EFFICIENCY: f64 = 0.007;

// Default simulation parameters

/// Default drag coefficient (dimensionless)
pub const DEFAULT_GAMMA: f64 = 1.0;

/// Default shape factor A for a sphere (dimensionless)
///
/// A = S / V^(2/3) where S is the cross-section and V the volume.
/// For a sphere: π r² / (4/3 π r³)^(2/3) ≈ 1.21
pub const DEFAULT_SHAPE_FACTOR: f64 = 1.21;

/// Default integration time step (s)
pub const DEFAULT_DT: f64 = 0.005;

/// Default main-body ablation coefficient (s²/m²)
pub const DEFAULT_SIGMA: f64 = 2.3e-8;

/// Default meteoroid bulk density (kg/m³)
pub const DEFAULT_BULK_DENSITY: f64 = 1000.0;

/// Default height at which erosion begins (m)
pub const DEFAULT_EROSION_HEIGHT_START: f64 = 102_000.0;

/// Default erosion coefficient (s²/m²)
pub const DEFAULT_EROSION_COEFF: f64 = 0.33e-6;

/// Default compressive strength for disruption (Pa)
pub const DEFAULT_COMPRESSIVE_STRENGTH: f64 = 2000.0;

/// Exponent applied to bulk density when deriving K
pub const BULK_DENSITY_EXPONENT: f64 = -2.0 / 3.0;

/// Exponent applied to mass in the ablation equation
pub const ABLATION_MASS_EXPONENT: f64 = 2.0 / 3.0;

/// Exponent applied to mass in the drag equation
pub const DRAG_MASS_EXPONENT: f64 = -1.0 / 3.0;
