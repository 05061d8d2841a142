//! Single restart: seeded initialization and one EM run.
//!
//! Restart `k` draws its starting theta from a ChaCha8 generator seeded with
//! the search seed and positioned on stream `k`. Streams are independent, so a
//! restart's draw depends only on `(seed, k)` and never on which thread ran it
//! or in what order.
use crate::{
    histogram::data::Histogram,
    mixture::{core::theta::Theta, models::mixture_model::MixtureModel},
    optimization::{
        em_driver::{run::run_em, traits::EmOutcome, traits::EmTolerances},
        errors::OptResult,
    },
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator for restart `index` under the search seed `seed`.
pub fn restart_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Starting theta for restart `index`: a uniform draw rescaled to the bin axis.
pub fn initial_theta(seed: u64, index: usize, n_bins: usize) -> Theta {
    Theta::random(&mut restart_rng(seed, index)).scaled_to_bins(n_bins)
}

/// Run restart `index` on normalized `data`.
pub fn run_restart(
    data: &Histogram, seed: u64, index: usize, tols: &EmTolerances, verbose: bool,
) -> OptResult<EmOutcome> {
    let theta0 = initial_theta(seed, index, data.len());
    run_em(&MixtureModel, data, theta0, tols, verbose)
}
