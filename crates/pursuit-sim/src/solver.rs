//! Collision-course solver.
//!
//! A launcher at fixed speed `s` from `L` meets a target moving from `P` at
//! constant velocity `v` at the smallest positive `t` where
//! `|P + v·t − L| = s·t`, i.e. the roots of
//!
//! ```text
//! (vx² + vy² − s²)·t² + 2·((P − L)·v)·t + |P − L|² = 0
//! ```

use pursuit_core::enums::InfeasibleReason;
use pursuit_core::types::{Point2D, Velocity2D};

/// Why no intercept course could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveFailure {
    /// Zero-length radar baseline, or the sample already sits on the
    /// estimated impact point.
    DegenerateObservation,
    /// Negative discriminant.
    NoRealIntercept,
    /// No strictly positive, finite root.
    NoPositiveRoot,
}

impl From<SolveFailure> for InfeasibleReason {
    fn from(failure: SolveFailure) -> Self {
        match failure {
            SolveFailure::DegenerateObservation => InfeasibleReason::DegenerateObservation,
            SolveFailure::NoRealIntercept => InfeasibleReason::NoRealIntercept,
            SolveFailure::NoPositiveRoot => InfeasibleReason::NoPositiveRoot,
        }
    }
}

/// Roots of `a·t² + b·t + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    /// `a == 0`: the single solution `−c / b` (non-finite when `b == 0`).
    Linear(f64),
    /// Negative discriminant.
    Complex,
    /// `plus = (−b + √disc) / 2a`, `minus = (−b − √disc) / 2a`.
    Real { plus: f64, minus: f64 },
}

/// Solve `a·t² + b·t + c = 0`.
///
/// The real roots are computed in the cancellation-free form
/// `q = −(b + sign(b)·√disc) / 2`, `{q / a, c / q}` and then labelled so
/// `plus` and `minus` match the textbook `±` branches. This matters when
/// the launcher and projectile speeds are nearly equal and `a` is tiny.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> QuadraticRoots {
    if a == 0.0 {
        return QuadraticRoots::Linear(-(c / b));
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return QuadraticRoots::Complex;
    }

    let root = discriminant.sqrt();
    if b >= 0.0 {
        // −b − √disc = 2q
        let q = -0.5 * (b + root);
        let minus = q / a;
        let plus = if q != 0.0 { c / q } else { -b / (2.0 * a) };
        QuadraticRoots::Real { plus, minus }
    } else {
        // −b + √disc = 2q
        let q = -0.5 * (b - root);
        let plus = q / a;
        let minus = c / q;
        QuadraticRoots::Real { plus, minus }
    }
}

/// The `+√disc` root; `−c/b` when linear, `0` when there is no real root.
pub fn solve_quadratic_plus(a: f64, b: f64, c: f64) -> f64 {
    match quadratic_roots(a, b, c) {
        QuadraticRoots::Linear(t) => t,
        QuadraticRoots::Complex => 0.0,
        QuadraticRoots::Real { plus, .. } => plus,
    }
}

/// The `−√disc` root; `−c/b` when linear, `0` when there is no real root.
pub fn solve_quadratic_minus(a: f64, b: f64, c: f64) -> f64 {
    match quadratic_roots(a, b, c) {
        QuadraticRoots::Linear(t) => t,
        QuadraticRoots::Complex => 0.0,
        QuadraticRoots::Real { minus, .. } => minus,
    }
}

/// Pick the intercept time from the two roots.
///
/// A single positive root wins outright; with two, the earlier one. Neither
/// positive (or non-finite) means there is no future intercept.
pub fn select_intercept_time(plus: f64, minus: f64) -> Option<f64> {
    let plus_ok = plus.is_finite() && plus > 0.0;
    let minus_ok = minus.is_finite() && minus > 0.0;
    match (plus_ok, minus_ok) {
        (true, true) => Some(plus.min(minus)),
        (true, false) => Some(plus),
        (false, true) => Some(minus),
        (false, false) => None,
    }
}

/// Coefficients of the intercept-time quadratic for one encounter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptQuadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl InterceptQuadratic {
    pub fn new(
        projectile: Point2D,
        projectile_velocity: Velocity2D,
        launcher: Point2D,
        launcher_speed: f64,
    ) -> Self {
        let dx = projectile.x - launcher.x;
        let dy = projectile.y - launcher.y;
        let v = projectile_velocity;
        Self {
            a: v.x * v.x + v.y * v.y - launcher_speed * launcher_speed,
            b: 2.0 * (dx * v.x + dy * v.y),
            c: dx * dx + dy * dy,
        }
    }

    pub fn roots(&self) -> QuadraticRoots {
        quadratic_roots(self.a, self.b, self.c)
    }

    /// `a·t² + b·t + c`.
    pub fn evaluate(&self, t: f64) -> f64 {
        (self.a * t + self.b) * t + self.c
    }

    /// Earliest feasible intercept time.
    pub fn intercept_time(&self) -> Result<f64, SolveFailure> {
        match self.roots() {
            QuadraticRoots::Complex => Err(SolveFailure::NoRealIntercept),
            QuadraticRoots::Linear(t) => select_intercept_time(t, t).ok_or(SolveFailure::NoPositiveRoot),
            QuadraticRoots::Real { plus, minus } => {
                select_intercept_time(plus, minus).ok_or(SolveFailure::NoPositiveRoot)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn residual_ok(a: f64, b: f64, c: f64, t: f64) -> bool {
        let residual = (a * t * t + b * t + c).abs();
        let scale = (a * t * t).abs() + (b * t).abs() + c.abs();
        residual <= 1e-9 * scale + 1e-9
    }

    proptest! {
        #[test]
        fn prop_real_roots_satisfy_equation(
            a in prop_oneof![-100.0f64..-1e-3, 1e-3f64..100.0],
            b in -1000.0f64..1000.0,
            c in -1000.0f64..1000.0,
        ) {
            prop_assume!(b * b - 4.0 * a * c >= 0.0);
            let plus = solve_quadratic_plus(a, b, c);
            let minus = solve_quadratic_minus(a, b, c);
            prop_assert!(residual_ok(a, b, c, plus), "plus root {plus} fails for ({a}, {b}, {c})");
            prop_assert!(residual_ok(a, b, c, minus), "minus root {minus} fails for ({a}, {b}, {c})");
        }

        #[test]
        fn prop_linear_roots_agree(b in prop_oneof![-1000.0f64..-1e-3, 1e-3f64..1000.0], c in -1000.0f64..1000.0) {
            let expected = -c / b;
            prop_assert_eq!(solve_quadratic_plus(0.0, b, c), expected);
            prop_assert_eq!(solve_quadratic_minus(0.0, b, c), expected);
        }

        #[test]
        fn prop_complex_roots_return_zero(
            a in 1e-3f64..100.0,
            b in -100.0f64..100.0,
            c in 1e-3f64..1000.0,
        ) {
            prop_assume!(b * b - 4.0 * a * c < 0.0);
            prop_assert_eq!(solve_quadratic_plus(a, b, c), 0.0);
            prop_assert_eq!(solve_quadratic_minus(a, b, c), 0.0);
        }

        #[test]
        fn prop_selected_time_is_positive_and_earliest(
            plus in -100.0f64..100.0,
            minus in -100.0f64..100.0,
        ) {
            match select_intercept_time(plus, minus) {
                Some(t) => {
                    prop_assert!(t > 0.0);
                    prop_assert!(t == plus || t == minus);
                    if plus > 0.0 && minus > 0.0 {
                        prop_assert_eq!(t, plus.min(minus));
                    }
                }
                None => prop_assert!(plus <= 0.0 && minus <= 0.0),
            }
        }
    }

    #[test]
    fn test_matches_textbook_formula_when_well_conditioned() {
        // (t - 2)(t - 5) = t² - 7t + 10, a = 1
        assert!((solve_quadratic_plus(1.0, -7.0, 10.0) - 5.0).abs() < 1e-12);
        assert!((solve_quadratic_minus(1.0, -7.0, 10.0) - 2.0).abs() < 1e-12);
        // negative a flips which branch is larger
        assert!((solve_quadratic_plus(-1.0, 7.0, -10.0) - 2.0).abs() < 1e-12);
        assert!((solve_quadratic_minus(-1.0, 7.0, -10.0) - 5.0).abs() < 1e-12);
        // b >= 0 branch
        assert!((solve_quadratic_plus(1.0, 7.0, 10.0) + 2.0).abs() < 1e-12);
        assert!((solve_quadratic_minus(1.0, 7.0, 10.0) + 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_double_root_at_zero() {
        assert_eq!(
            quadratic_roots(2.0, 0.0, 0.0),
            QuadraticRoots::Real {
                plus: 0.0,
                minus: 0.0
            }
        );
    }

    #[test]
    fn test_linear_case_returns_same_value() {
        assert_eq!(solve_quadratic_plus(0.0, -4.0, 10.0), 2.5);
        assert_eq!(solve_quadratic_minus(0.0, -4.0, 10.0), 2.5);
    }

    #[test]
    fn test_negative_discriminant_returns_exact_zero() {
        assert_eq!(quadratic_roots(1.0, 0.0, 1.0), QuadraticRoots::Complex);
        assert_eq!(solve_quadratic_plus(1.0, 0.0, 1.0), 0.0);
        assert_eq!(solve_quadratic_minus(1.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_selection_prefers_single_positive_root() {
        assert_eq!(select_intercept_time(3.0, -1.0), Some(3.0));
        assert_eq!(select_intercept_time(-1.0, 4.0), Some(4.0));
        assert_eq!(select_intercept_time(0.0, 4.0), Some(4.0));
        assert_eq!(select_intercept_time(6.0, 2.0), Some(2.0));
        assert_eq!(select_intercept_time(-6.0, -2.0), None);
        assert_eq!(select_intercept_time(0.0, 0.0), None);
        assert_eq!(select_intercept_time(f64::INFINITY, 2.0), Some(2.0));
        assert_eq!(select_intercept_time(f64::NAN, f64::NAN), None);
    }

    #[test]
    fn test_nearly_equal_speeds_stay_accurate() {
        // a is rounding noise; the finite root must still solve the equation.
        let q = InterceptQuadratic {
            a: 7.275957614183426e-12,
            b: -136835.13724281502,
            c: 503164.862757185,
        };
        let t = q.intercept_time().unwrap();
        assert!((t - 3.6771612386686554).abs() < 1e-9, "got {t}");
    }

    #[test]
    fn test_intercept_quadratic_coefficients() {
        let q = InterceptQuadratic::new(
            Point2D::new(10.0, 20.0),
            Velocity2D::new(3.0, -4.0),
            Point2D::new(0.0, 0.0),
            10.0,
        );
        assert_eq!(q.a, 25.0 - 100.0);
        assert_eq!(q.b, 2.0 * (10.0 * 3.0 + 20.0 * -4.0));
        assert_eq!(q.c, 500.0);
        let t = q.intercept_time().unwrap();
        assert!(q.evaluate(t).abs() < 1e-9);
    }

    #[test]
    fn test_failures_map_to_infeasible_reasons() {
        let q = InterceptQuadratic {
            a: 1.0,
            b: 0.0,
            c: 1.0,
        };
        assert_eq!(q.intercept_time(), Err(SolveFailure::NoRealIntercept));

        // roots at -2 and -5
        let q = InterceptQuadratic {
            a: 1.0,
            b: 7.0,
            c: 10.0,
        };
        assert_eq!(q.intercept_time(), Err(SolveFailure::NoPositiveRoot));

        // linear with b == 0 has no finite root
        let q = InterceptQuadratic {
            a: 0.0,
            b: 0.0,
            c: 4.0,
        };
        assert_eq!(q.intercept_time(), Err(SolveFailure::NoPositiveRoot));

        assert_eq!(
            InfeasibleReason::from(SolveFailure::NoPositiveRoot),
            InfeasibleReason::NoPositiveRoot
        );
    }
}
