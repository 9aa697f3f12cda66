//! Error type shared by the crate.

use derive_more::{Display, Error};

/// Errors returned by the driver.
///
/// Misconfigured timing (a pulse that maps to a reload count of zero, or one that
/// does not fit the reload register) is not an [`Error`]. It is a build-time
/// mistake and panics when the configuration is evaluated.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// More LEDs were requested than one frame can carry.
    #[display("frame has {requested} LEDs but at most {max} fit in one frame")]
    TooManyLeds {
        /// Number of LEDs in the rejected frame.
        requested: usize,
        /// Largest supported frame.
        max: usize,
    },

    /// A frame with no LEDs was submitted.
    #[display("frame has no LEDs")]
    EmptyFrame,
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
