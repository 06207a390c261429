//! Model a color in the CIE XYZ color space.

use crate::{
    color::{Component, HasSpace, OutOfRange, Space},
    error::Result,
    models::{base::ConvertibleColor, Base, TOLERANCE},
    provenance::DataSource,
    strategy::Strategies,
};

/// Specify that a model converts to CIE XYZ without outside help.
pub trait ToCieXyz {
    /// Convert this color to CIE XYZ.
    fn to_ciexyz(&self) -> CieXyz;
}

chromata_macros::gen_model! {
    /// A color in the CIE 1931 XYZ color space.
    ///
    /// Components converted from sRGB are relative to a D65 white with a
    /// luminance of 1. Components integrated from a spectrum carry whatever
    /// scale the matching functions produce, so there is no upper bound.
    pub struct CieXyz {
        /// The X component of the color.
        x: Component,
        /// The Y component, the luminance, of the color.
        y: Component,
        /// The Z component of the color.
        z: Component,
    }
}

impl HasSpace for CieXyz {
    const SPACE: Space = Space::CieXyz;
}

impl ToCieXyz for CieXyz {
    fn to_ciexyz(&self) -> CieXyz {
        self.clone()
    }
}

impl ConvertibleColor for CieXyz {
    fn space(&self) -> Space {
        Self::SPACE
    }

    fn data_source(&self) -> Option<&DataSource> {
        self.data_source.as_ref()
    }

    /// Components must be finite and not negative. Without high precision,
    /// negative values within the tolerance are accepted.
    fn out_of_range(&self, high_precision: bool) -> OutOfRange {
        let lower = if high_precision { 0.0 } else { -TOLERANCE };
        let check = |value: Component, flag: OutOfRange| {
            if value.is_finite() && value >= lower {
                OutOfRange::empty()
            } else {
                flag
            }
        };

        check(self.x, OutOfRange::C0) | check(self.y, OutOfRange::C1) | check(self.z, OutOfRange::C2)
    }

    fn to_base(&self, _strategies: &Strategies) -> Result<Base> {
        Ok(self.to_ciexyz())
    }
}
