//! Model a color in the sRGB color space with 8-bit channels.

use crate::{
    color::{Component, Components, HasSpace, OutOfRange, Space},
    error::Result,
    math::{normalize_hue, transform, transform_3x3, unit_to_byte, unit_to_byte_truncated, Transform},
    models::{base::ConvertibleColor, Base, CieXyz, Hsv, ToCieXyz},
    provenance::DataSource,
    strategy::Strategies,
};

/// How to reduce a color from a larger color space into sRGB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToSmallSpaceStrategy {
    /// Clip every linear channel into the unit interval, then round each
    /// encoded channel to the nearest byte.
    #[default]
    Default,
    /// Clip like [`ToSmallSpaceStrategy::Default`], but truncate the encoded
    /// channels instead of rounding them.
    ForceLowTruncate,
    /// If any linear channel exceeds 1, scale all channels down by the
    /// largest one so the hue survives. Negative channels are clipped.
    ForceHighStretch,
}

impl ToSmallSpaceStrategy {
    /// Reduce linear light channels to encoded bytes.
    fn reduce(self, linear: Components) -> (u8, u8, u8) {
        let clip = |v: Component| v.clamp(0.0, 1.0);

        let (linear, to_byte): (Components, fn(Component) -> u8) = match self {
            Self::Default => (linear.map(clip), unit_to_byte),
            Self::ForceLowTruncate => (linear.map(clip), unit_to_byte_truncated),
            Self::ForceHighStretch => {
                let max = linear.max();
                let stretched = if max > 1.0 {
                    linear.map(|v| v / max)
                } else {
                    linear
                };
                (stretched.map(clip), unit_to_byte)
            }
        };

        let Components(red, green, blue) = to_gamma_encoded(&linear);
        (to_byte(red), to_byte(green), to_byte(blue))
    }
}

/// Specify that a model converts to sRGB, possibly losing information.
pub trait ToSrgb {
    /// Convert this color to sRGB, reducing it with the given strategy where
    /// the conversion is lossy.
    fn to_srgb(&self, strategy: ToSmallSpaceStrategy) -> Srgb;
}

fn to_gamma_encoded(from: &Components) -> Components {
    from.map(|value| {
        let abs = value.abs();

        if abs > 0.0031308 {
            value.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
        } else {
            12.92 * value
        }
    })
}

fn to_linear_light(from: &Components) -> Components {
    from.map(|value| {
        let abs = value.abs();

        if abs < 0.04045 {
            value / 12.92
        } else {
            value.signum() * ((abs + 0.055) / 1.055).powf(2.4)
        }
    })
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const TO_XYZ: Transform = transform_3x3(
    0.4123907992659595,  0.21263900587151036, 0.01933081871559185,
    0.35758433938387796, 0.7151686787677559,  0.11919477979462599,
    0.1804807884018343,  0.07219231536073371, 0.9505321522496606,
);

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const FROM_XYZ: Transform = transform_3x3(
     3.2409699419045213, -0.9692436362808798,  0.05563007969699361,
    -1.5373831775700935,  1.8759675015077206, -0.20397695888897657,
    -0.4986107602930033,  0.04155505740717561, 1.0569715142428786,
);

chromata_macros::gen_model! {
    /// A color in HP's and Microsoft's 1996 sRGB color space.
    pub struct Srgb {
        /// The red channel.
        red: u8,
        /// The green channel.
        green: u8,
        /// The blue channel.
        blue: u8,
    }
}

impl HasSpace for Srgb {
    const SPACE: Space = Space::Srgb;
}

impl Srgb {
    /// Return the channels scaled to the unit interval.
    fn to_unit(&self) -> Components {
        Components(
            Component::from(self.red) / 255.0,
            Component::from(self.green) / 255.0,
            Component::from(self.blue) / 255.0,
        )
    }

    /// Convert this color to the HSV notation.
    ///
    /// Grays have no hue; they get a hue of 0 and a saturation of 0.
    pub fn to_hsv(&self) -> Hsv {
        let Components(red, green, blue) = self.to_unit();

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let delta = max - min;

        let saturation = if max == 0.0 { 0.0 } else { delta / max };
        let hue = if delta == 0.0 {
            0.0
        } else if max == red {
            60.0 * ((green - blue) / delta)
        } else if max == green {
            60.0 * ((blue - red) / delta + 2.0)
        } else {
            60.0 * ((red - green) / delta + 4.0)
        };

        Hsv::new(normalize_hue(hue), saturation, max)
    }
}

impl ToCieXyz for Srgb {
    fn to_ciexyz(&self) -> CieXyz {
        let Components(x, y, z) = transform(&TO_XYZ, to_linear_light(&self.to_unit()));
        CieXyz::new(x, y, z)
    }
}

impl ToSrgb for Srgb {
    /// sRGB is already as small as it gets, so the strategy does not matter.
    fn to_srgb(&self, _strategy: ToSmallSpaceStrategy) -> Srgb {
        self.clone()
    }
}

impl ToSrgb for CieXyz {
    fn to_srgb(&self, strategy: ToSmallSpaceStrategy) -> Srgb {
        let (x, y, z) = self.components();
        let linear = transform(&FROM_XYZ, Components(x, y, z));
        Srgb::from(strategy.reduce(linear))
    }
}

impl ConvertibleColor for Srgb {
    fn space(&self) -> Space {
        Self::SPACE
    }

    fn data_source(&self) -> Option<&DataSource> {
        self.data_source.as_ref()
    }

    /// Every combination of bytes is an sRGB color, so nothing is ever out of
    /// range, with or without high precision.
    fn out_of_range(&self, _high_precision: bool) -> OutOfRange {
        OutOfRange::empty()
    }

    fn to_base(&self, _strategies: &Strategies) -> Result<Base> {
        Ok(self.to_ciexyz())
    }
}
