//! histogram — binned data, normalization, KL divergence, and text input.
//!
//! Purpose
//! -------
//! Provide the value type shared by every fitting stage ([`Histogram`]), the
//! distribution utilities the EM loop relies on ([`normalize`],
//! [`kl_divergence`]), and the reader that turns whitespace-separated
//! `(bin, weight)` pairs into a histogram.
//!
//! Key behaviors
//! -------------
//! - Validate weights once at construction; derived histograms reuse the bin
//!   column of their source so positional alignment holds by construction.
//! - Reject unnormalized or misaligned inputs to the divergence with typed
//!   [`HistError`] values in every build profile.
//! - Drop zero-weight pairs at load time.
//!
//! Downstream usage
//! ----------------
//! - `mixture` builds responsibilities and fitted mixtures as histograms
//!   aligned with the data and scores them with [`kl_divergence`].
//! - Front-ends call [`read_histogram`] and hand the result to
//!   `mixture::models::search::find_theta`.

pub mod data;
pub mod divergence;
pub mod errors;
pub mod reader;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{Histogram, NORMALIZATION_TOL, normalize};
pub use self::divergence::kl_divergence;
pub use self::errors::{HistError, HistResult};
pub use self::reader::{parse_histogram, read_histogram, read_histogram_from};

pub mod prelude {
    pub use super::data::{Histogram, normalize};
    pub use super::divergence::kl_divergence;
    pub use super::errors::{HistError, HistResult};
    pub use super::reader::read_histogram;
}
