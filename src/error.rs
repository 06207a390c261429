//! Errors raised while converting between color spaces.

use crate::{color::Space, strategy::StrategyKey};

/// A failed conversion.
///
/// Numeric edge cases are never errors. Only conversions that depend on a
/// caller supplied strategy, or that have no path at all, can fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The registry has no entry for the requested pair of color spaces.
    #[error("no conversion strategy registered for {0}")]
    StrategyNotFound(StrategyKey),

    /// The registry has an entry for the pair, but it can not be used.
    #[error("conversion strategy for {key} is invalid: {reason}")]
    InvalidStrategy {
        /// The pair of color spaces that was looked up.
        key: StrategyKey,
        /// What was found instead of a usable strategy.
        reason: String,
    },

    /// No chain of conversions leads from one color space to the other.
    #[error("can not convert from {from} to {to}")]
    NoConversionPath {
        /// The color space of the sample.
        from: Space,
        /// The requested color space.
        to: Space,
    },
}

/// A specialized result for conversions.
pub type Result<T> = std::result::Result<T, Error>;
