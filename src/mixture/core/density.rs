//! Component densities and the two-component Bayes posterior.
//!
//! Both densities are evaluated at integer bin values and are written in
//! closed form rather than through `statrs` distribution objects: those reject
//! `sigma <= 0` and clamp the exponential to zero for negative `x`, while the
//! fitting loop needs the raw formula so that invalid parameters surface as
//! inf/NaN and are reported by the driver.
use statrs::consts::SQRT_2PI;

/// Below this magnitude the weighted evidence of the two components is
/// treated as balanced and the posterior is exactly one half.
pub const BALANCE_EPS: f64 = 1e-14;

/// Gaussian density `exp(-½((x−μ)/σ)²) / (σ√(2π))` at integer `x`.
///
/// `sigma <= 0` is not guarded; the result is inf/NaN or negative and is
/// left to propagate.
#[inline]
pub fn normal_pdf(x: i64, mu: f64, sigma: f64) -> f64 {
    let z = (x as f64 - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * SQRT_2PI)
}

/// Exponential density `λ·exp(−λx)` at integer `x`, unclamped for `x < 0`.
#[inline]
pub fn exp_pdf(x: i64, lambda: f64) -> f64 {
    lambda * (-lambda * x as f64).exp()
}

/// Posterior probability that a bin belongs to the normal component.
///
/// Parameters
/// ----------
/// - `normal`: normal density at the bin.
/// - `exp`: exponential density at the bin.
/// - `alpha`: prior mixing weight of the normal component.
///
/// Returns
/// -------
/// `0.5` when `|α·n − (1−α)·e| < 1e-14`, otherwise `α·n / (α·n + (1−α)·e)`.
#[inline]
pub fn bayes(normal: f64, exp: f64, alpha: f64) -> f64 {
    let signal = alpha * normal;
    let background = (1.0 - alpha) * exp;
    if (signal - background).abs() < BALANCE_EPS {
        return 0.5;
    }
    signal / (signal + background)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use statrs::distribution::{Continuous, Exp, Normal};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the closed-form pdfs with `statrs` on valid parameters.
    // - Propagation of invalid sigma and unclamped negative x.
    // - The balanced-evidence rule and range of `bayes`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Closed forms match the reference distributions on a grid of bins.
    //
    // Given
    // -----
    // - N(50, 5) and Exp(0.05) evaluated on x = 0..120.
    //
    // Expect
    // ------
    // - Relative agreement to 1e-12.
    fn pdfs_match_statrs_on_valid_parameters() {
        let normal = Normal::new(50.0, 5.0).unwrap();
        let exp = Exp::new(0.05).unwrap();

        for x in 0..120_i64 {
            assert_relative_eq!(
                normal_pdf(x, 50.0, 5.0),
                normal.pdf(x as f64),
                max_relative = 1e-12
            );
            assert_relative_eq!(exp_pdf(x, 0.05), exp.pdf(x as f64), max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Invalid parameters are not clamped.
    //
    // Given
    // -----
    // - sigma = 0 at x == mu, and an exponential at x = -2.
    //
    // Expect
    // ------
    // - A non-finite normal density; the exponential grows past lambda.
    fn invalid_inputs_propagate() {
        assert!(!normal_pdf(3, 3.0, 0.0).is_finite());
        assert!(normal_pdf(3, 3.0, -1.0) < 0.0);

        let value = exp_pdf(-2, 0.5);
        assert_relative_eq!(value, 0.5 * 1.0_f64.exp(), max_relative = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Balanced evidence yields exactly one half.
    //
    // Given
    // -----
    // - alpha = 0.5 with equal densities; alpha = 0.75 with n = 1, e = 3.
    //
    // Expect
    // ------
    // - `bayes == 0.5` in both cases.
    fn bayes_is_half_on_balanced_evidence() {
        assert_eq!(bayes(0.2, 0.2, 0.5), 0.5);
        assert_eq!(bayes(1.0, 3.0, 0.75), 0.5);
        assert_eq!(bayes(0.0, 0.0, 0.3), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Unbalanced evidence gives a proper probability in (0, 1).
    //
    // Given
    // -----
    // - Several positive density pairs and alphas strictly inside (0, 1).
    //
    // Expect
    // ------
    // - `0 < bayes < 1`, and a larger normal density raises the posterior.
    fn bayes_is_strictly_inside_unit_interval() {
        for &(n, e, a) in &[(0.3, 0.1, 0.75), (0.01, 0.2, 0.4), (2.0, 1e-3, 0.1)] {
            let r = bayes(n, e, a);
            assert!(r > 0.0 && r < 1.0, "bayes({n}, {e}, {a}) = {r}");
        }
        assert!(bayes(0.4, 0.1, 0.5) > bayes(0.2, 0.1, 0.5));
    }
}
