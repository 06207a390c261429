//! Models are the color samples of each supported color space. Conversions
//! are only implemented on models they make sense for; everything else is
//! routed through the base model, CIE XYZ.

use crate::color::Component;

mod base;
mod hsv;
mod rgb;
mod spectrum;
mod xyz;

pub use base::{Base, ConvertibleColor};
pub use hsv::Hsv;
pub use rgb::{Srgb, ToSmallSpaceStrategy, ToSrgb};
pub use spectrum::LightSpectrum;
pub use xyz::{CieXyz, ToCieXyz};

/// Slack granted to values on the edge of a color space when validating
/// without high precision.
pub(crate) const TOLERANCE: Component = 1.0e-6;
