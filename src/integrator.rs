//! Scalar fourth-order Runge-Kutta stepping.
//!
//! The ablation and drag equations are each integrated as an independent
//! scalar ODE over one outer time step. Both share the classic 4-stage RK4
//! scheme and differ only in how stage increments are stabilized, which is
//! expressed through the [`StageClamp`] policy.

/// Identifies one of the four RK4 stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    K1,
    K2,
    K3,
    K4,
}

/// Policy applied to each stage increment before it feeds the next stage.
///
/// `y0` is the state at the start of the step and `increment` is the raw
/// stage increment (`dt · rate`). The returned value replaces the increment.
pub trait StageClamp {
    fn clamp(&self, stage: Stage, increment: f64, y0: f64) -> f64;
}

/// Leaves every stage increment untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClamp;

impl StageClamp for NoClamp {
    #[inline(always)]
    fn clamp(&self, _stage: Stage, increment: f64, _y0: f64) -> f64 {
        increment
    }
}

/// Keeps intermediate stages from evaluating the rate at negative mass.
///
/// - `k1`, `k2`: the next stage samples `y0 + k/2`, so a loss with `−k/2 > y0`
///   is replaced by `−2·y0`.
/// - `k3`: the next stage samples `y0 + k3`, so a loss with `−k3 > y0` is
///   replaced by `−y0`.
/// - `k4`: not clamped.
///
/// The combined increment can still overshoot `−y0`; callers own that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepletionClamp;

impl StageClamp for DepletionClamp {
    #[inline(always)]
    fn clamp(&self, stage: Stage, increment: f64, y0: f64) -> f64 {
        match stage {
            Stage::K1 | Stage::K2 if -increment / 2.0 > y0 => -2.0 * y0,
            Stage::K3 if -increment > y0 => -y0,
            _ => increment,
        }
    }
}

/// The four stage increments of one RK4 step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4Stages {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    pub k4: f64,
}

impl Rk4Stages {
    /// Weighted RK4 combination `k1/6 + k2/3 + k3/3 + k4/6`
    #[inline(always)]
    pub fn increment(&self) -> f64 {
        self.k1 / 6.0 + self.k2 / 3.0 + self.k3 / 3.0 + self.k4 / 6.0
    }
}

/// Compute the four stage increments of a scalar RK4 step.
///
/// # Arguments
/// * `dt` - Step size
/// * `y0` - State at the start of the step
/// * `rate` - Right-hand side `dy/dt` as a function of the state only
/// * `clamp` - Stage stabilization policy
///
/// # Returns
/// Stage increments after clamping. `increment()` yields the state change.
#[inline]
pub fn rk4_stages<F, C>(dt: f64, y0: f64, rate: F, clamp: &C) -> Rk4Stages
where
    F: Fn(f64) -> f64,
    C: StageClamp + ?Sized,
{
    let k1 = clamp.clamp(Stage::K1, dt * rate(y0), y0);
    let k2 = clamp.clamp(Stage::K2, dt * rate(y0 + k1 / 2.0), y0);
    let k3 = clamp.clamp(Stage::K3, dt * rate(y0 + k2 / 2.0), y0);
    let k4 = clamp.clamp(Stage::K4, dt * rate(y0 + k3), y0);

    Rk4Stages { k1, k2, k3, k4 }
}

/// Single scalar RK4 step returning the state change over `dt`.
#[inline]
pub fn rk4_increment<F, C>(dt: f64, y0: f64, rate: F, clamp: &C) -> f64
where
    F: Fn(f64) -> f64,
    C: StageClamp + ?Sized,
{
    rk4_stages(dt, y0, rate, clamp).increment()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exponential_decay_accuracy() {
        // dy/dt = -y, exact solution y0·e^(-dt)
        let y0: f64 = 2.0;
        let dt: f64 = 0.1;
        let dy = rk4_increment(dt, y0, |y| -y, &NoClamp);

        let exact = y0 * (-dt).exp() - y0;
        assert!((dy - exact).abs() < 1e-6);
    }

    #[test]
    fn test_constant_rate_is_exact() {
        let stages = rk4_stages(0.5, 10.0, |_| 3.0, &NoClamp);
        assert_eq!(stages.k1, 1.5);
        assert_eq!(stages.k4, 1.5);
        assert_relative_eq!(stages.increment(), 1.5, epsilon = 1e-15);
    }

    #[test]
    fn test_polynomial_rate_matches_taylor() {
        // dy/dt = y², y(0)=1: exact y(t) = 1/(1-t)
        let dt: f64 = 0.01;
        let dy = rk4_increment(dt, 1.0, |y| y * y, &NoClamp);
        let exact = 1.0 / (1.0 - dt) - 1.0;
        assert!((dy - exact).abs() < 1e-9);
    }

    #[test]
    fn test_no_clamp_is_identity() {
        for stage in [Stage::K1, Stage::K2, Stage::K3, Stage::K4] {
            assert_eq!(NoClamp.clamp(stage, -1e9, 1.0), -1e9);
        }
    }

    #[test]
    fn test_depletion_clamp_thresholds() {
        let clamp = DepletionClamp;
        let y0 = 1.0;

        // k1/k2 clamp once half the increment exceeds the mass
        assert_eq!(clamp.clamp(Stage::K1, -1.9, y0), -1.9);
        assert_eq!(clamp.clamp(Stage::K1, -2.5, y0), -2.0);
        assert_eq!(clamp.clamp(Stage::K2, -2.0, y0), -2.0);
        assert_eq!(clamp.clamp(Stage::K2, -7.0, y0), -2.0);

        // k3 clamps at the full mass
        assert_eq!(clamp.clamp(Stage::K3, -0.9, y0), -0.9);
        assert_eq!(clamp.clamp(Stage::K3, -1.5, y0), -1.0);

        // k4 is never clamped
        assert_eq!(clamp.clamp(Stage::K4, -100.0, y0), -100.0);
    }

    #[test]
    fn test_depletion_clamp_keeps_stage_inputs_non_negative() {
        // Huge loss rate: every clamped stage lands exactly on zero mass
        let y0 = 1.0;
        let seen = std::cell::RefCell::new(Vec::new());
        let stages = rk4_stages(
            1.0,
            y0,
            |y| {
                seen.borrow_mut().push(y);
                -1e6 * y.max(0.0) - 1e6
            },
            &DepletionClamp,
        );

        assert_eq!(stages.k1, -2.0);
        assert_eq!(stages.k2, -2.0);
        assert_eq!(stages.k3, -1.0);
        assert!(seen.borrow().iter().all(|&y| y >= 0.0));
    }

    #[test]
    fn test_depletion_clamp_does_not_bound_combined_increment() {
        // Mass-independent loss of 1.5 per step: no stage trips the k1/k2 clamp,
        // k3 clamps to -1, k4 is free, and the sum removes more than y0.
        let y0 = 1.0;
        let stages = rk4_stages(1.0, y0, |_| -1.5, &DepletionClamp);
        assert_eq!(stages.k1, -1.5);
        assert_eq!(stages.k2, -1.5);
        assert_eq!(stages.k3, -1.0);
        assert_eq!(stages.k4, -1.5);
        assert!(y0 + stages.increment() < 0.0);
    }
}
