//! The contract shared by all models and the base model conversions are
//! routed through.

use crate::{
    color::{OutOfRange, Space},
    error::Result,
    models::CieXyz,
    provenance::DataSource,
    strategy::Strategies,
};

/// The model every other model can be converted to, directly or through one
/// hop.
pub type Base = CieXyz;

/// Implemented by every color sample.
pub trait ConvertibleColor {
    /// The color space of this sample.
    fn space(&self) -> Space;

    /// The sample this one was derived from, if it was recorded.
    fn data_source(&self) -> Option<&DataSource>;

    /// Report which parts of this sample lie outside its color space.
    ///
    /// With `high_precision`, the exact bounds of the color space apply.
    /// Otherwise values within a small tolerance of a bound are accepted, to
    /// absorb rounding errors of earlier computations.
    fn out_of_range(&self, high_precision: bool) -> OutOfRange;

    /// Determine whether this sample lies inside its color space.
    fn is_inside_color_space(&self, high_precision: bool) -> bool {
        self.out_of_range(high_precision).is_empty()
    }

    /// Convert this sample to the base model.
    ///
    /// Only samples without a closed-form conversion consult the strategies;
    /// for all others this never fails.
    fn to_base(&self, strategies: &Strategies) -> Result<Base>;
}
