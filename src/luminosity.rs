//! Luminous efficiency lookup

use crate::constants::LUMINOUS_EFFICIENCY;

/// Fraction of kinetic energy loss radiated as visible light.
///
/// Placeholder model: returns 0.7% for every speed. The argument is kept so
/// the call sites stay unchanged once a velocity-dependent model lands.
#[inline(always)]
pub fn luminous_efficiency(_velocity: f64) -> f64 {
    LUMINOUS_EFFICIENCY
}
