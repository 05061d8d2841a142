//! Theta — parameter set of the Normal + Exponential mixture.
//!
//! Purpose
//! -------
//! Carry the four mixture parameters together with the KL divergence scored
//! by the M-step that produced them. The divergence travels with the
//! parameters because it is both the convergence signal of a single EM run and
//! the selection criterion across restarts.
//!
//! Conventions
//! -----------
//! - `mixing_weight` is the prior probability of the normal component.
//! - A freshly drawn theta carries [`DIVERGENCE_SENTINEL`]; the value is not a
//!   score, only a starting point any real fit improves on.
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Mixing weight assigned to a randomly drawn theta.
pub const DEFAULT_MIXING_WEIGHT: f64 = 0.75;

/// Divergence assigned before the first M-step.
pub const DIVERGENCE_SENTINEL: f64 = 1000.0;

/// Theta — `(μ, σ, λ, α)` plus the divergence of the fitted mixture.
///
/// Fields
/// ------
/// - `mu`: normal mean.
/// - `sigma`: normal standard deviation (`> 0` for a meaningful fit).
/// - `lambda`: exponential rate (`> 0` for a meaningful fit).
/// - `mixing_weight`: prior probability of the normal component, in `[0, 1]`.
/// - `divergence`: `KL(data ‖ fitted)` from the most recent M-step.
///
/// Invariants
/// ----------
/// None are enforced here; the EM driver checks finiteness after every
/// M-step and reports violations as errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theta {
    pub mu: f64,
    pub sigma: f64,
    pub lambda: f64,
    pub mixing_weight: f64,
    pub divergence: f64,
}

impl Theta {
    pub fn new(mu: f64, sigma: f64, lambda: f64, mixing_weight: f64, divergence: f64) -> Self {
        Theta { mu, sigma, lambda, mixing_weight, divergence }
    }

    /// Draw `mu`, `sigma`, `lambda` independently from Uniform[0, 1).
    ///
    /// The mixing weight is [`DEFAULT_MIXING_WEIGHT`] and the divergence is
    /// [`DIVERGENCE_SENTINEL`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mu = rng.gen::<f64>();
        let sigma = rng.gen::<f64>();
        let lambda = rng.gen::<f64>();
        Theta::new(mu, sigma, lambda, DEFAULT_MIXING_WEIGHT, DIVERGENCE_SENTINEL)
    }

    /// Rescale `mu` and `sigma` from the unit interval to the bin axis.
    ///
    /// Random draws live in `[0, 1)` while the mean and spread live on the
    /// scale of the bin values; multiplying by the number of bins gives the
    /// first E-step a usable starting point.
    pub fn scaled_to_bins(self, n_bins: usize) -> Self {
        let scale = n_bins as f64;
        Theta { mu: self.mu * scale, sigma: self.sigma * scale, ..self }
    }

    /// Name and value of the first non-finite parameter, if any.
    ///
    /// The divergence is not inspected.
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        [
            ("mu", self.mu),
            ("sigma", self.sigma),
            ("lambda", self.lambda),
            ("mixing_weight", self.mixing_weight),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
    }

    /// `true` when every parameter (not the divergence) is finite.
    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }
}

impl Default for Theta {
    /// A zeroed theta carrying the sentinel divergence.
    fn default() -> Self {
        Theta::new(0.0, 0.0, 0.0, DEFAULT_MIXING_WEIGHT, DIVERGENCE_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    // Purpose
    // -------
    // Random draws honour the documented ranges and defaults.
    //
    // Given
    // -----
    // - 200 draws from a seeded ChaCha8 generator.
    //
    // Expect
    // ------
    // - mu, sigma, lambda in [0, 1); mixing 0.75; divergence 1000.
    fn random_theta_respects_ranges_and_defaults() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let t = Theta::random(&mut rng);
            for v in [t.mu, t.sigma, t.lambda] {
                assert!((0.0..1.0).contains(&v));
            }
            assert_eq!(t.mixing_weight, DEFAULT_MIXING_WEIGHT);
            assert_eq!(t.divergence, DIVERGENCE_SENTINEL);
        }
    }

    #[test]
    // Purpose
    // -------
    // The same seed yields the same draw.
    //
    // Given
    // -----
    // - Two generators seeded with 42.
    //
    // Expect
    // ------
    // - Identical thetas.
    fn random_theta_is_reproducible_from_seed() {
        let a = Theta::random(&mut ChaCha8Rng::seed_from_u64(42));
        let b = Theta::random(&mut ChaCha8Rng::seed_from_u64(42));

        assert_eq!(a, b);
    }

    #[test]
    // Purpose
    // -------
    // Bin scaling touches only mu and sigma.
    //
    // Given
    // -----
    // - Theta(0.5, 0.25, 0.1, 0.75, 1000) scaled to 200 bins.
    //
    // Expect
    // ------
    // - mu = 100, sigma = 50; other fields unchanged.
    fn scaled_to_bins_only_rescales_location_and_spread() {
        let t = Theta::new(0.5, 0.25, 0.1, 0.75, 1000.0).scaled_to_bins(200);

        assert_eq!(t, Theta::new(100.0, 50.0, 0.1, 0.75, 1000.0));
    }

    #[test]
    // Purpose
    // -------
    // Non-finite detection reports the first offending parameter and ignores
    // the divergence.
    //
    // Given
    // -----
    // - A theta with NaN lambda; a theta with NaN divergence only.
    //
    // Expect
    // ------
    // - `("lambda", NaN)` for the first; the second is finite.
    fn first_non_finite_names_parameter() {
        let bad = Theta::new(1.0, 1.0, f64::NAN, 0.5, 0.1);
        let (name, value) = bad.first_non_finite().unwrap();
        assert_eq!(name, "lambda");
        assert!(value.is_nan());

        assert!(Theta::new(1.0, 1.0, 1.0, 0.5, f64::NAN).is_finite());
    }
}
