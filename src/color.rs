//! Shared vocabulary for all color samples: the component type, the color
//! space tags and the out-of-range report.

use bitflags::bitflags;

#[cfg(not(feature = "f64"))]
/// A 32-bit floating point value that all components are stored as.
pub type Component = f32;

#[cfg(feature = "f64")]
/// A 64-bit floating point value that all components are stored as.
pub type Component = f64;

/// Represent three floating point components of a color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Components(pub Component, pub Component, pub Component);

impl Components {
    /// Return new components with each component mapped with the given
    /// function.
    pub fn map(&self, f: impl Fn(Component) -> Component) -> Self {
        Self(f(self.0), f(self.1), f(self.2))
    }

    /// Return the largest of the three components.
    pub fn max(&self) -> Component {
        self.0.max(self.1).max(self.2)
    }
}

bitflags! {
    /// Flags marking which parts of a sample lie outside its color space.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct OutOfRange : u8 {
        /// Set when the first component is out of range.
        const C0 = 1 << 0;
        /// Set when the second component is out of range.
        const C1 = 1 << 1;
        /// Set when the third component is out of range.
        const C2 = 1 << 2;
        /// Set when a spectrum's wavelength bounds or step are unusable.
        const WAVELENGTHS = 1 << 3;
        /// Set when a spectrum holds a negative or non-finite amplitude.
        const AMPLITUDES = 1 << 4;
    }
}

/// The color spaces a sample can be expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Space {
    /// HP's and Microsoft's 1996 sRGB color space with 8-bit channels.
    Srgb = 0,
    /// The hue, saturation, value notation of the sRGB color space.
    Hsv = 1,
    /// The device independent CIE 1931 XYZ color space. Every other space
    /// reaches it directly or through one hop.
    CieXyz = 2,
    /// A sampled distribution of light over wavelengths.
    LightSpectrum = 3,
}

impl Space {
    /// Return a human readable name for this color space.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Srgb => "sRGB",
            Self::Hsv => "HSV",
            Self::CieXyz => "CIE XYZ",
            Self::LightSpectrum => "light spectrum",
        }
    }
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Implemented by every model to name its color space at compile time.
pub trait HasSpace {
    /// The color space of the model.
    const SPACE: Space;
}

/// Seed for the component hash (179 * 181).
pub(crate) const HASH_SEED: u64 = 32399;

/// Odd multiplier mixing each further component into the hash.
pub(crate) const HASH_MULTIPLIER: u64 = 181;

/// Bits of a component that feed a sample's hash.
///
/// Values that compare equal must produce the same bits, so both zeros of a
/// float map to the same value.
pub(crate) trait HashBits {
    fn hash_bits(&self) -> u64;
}

impl HashBits for u8 {
    fn hash_bits(&self) -> u64 {
        u64::from(*self)
    }
}

impl HashBits for Component {
    fn hash_bits(&self) -> u64 {
        if *self == 0.0 {
            0
        } else {
            u64::from(self.to_bits())
        }
    }
}

impl HashBits for [Component] {
    fn hash_bits(&self) -> u64 {
        self.iter().fold(HASH_SEED, |hash, value| {
            hash.wrapping_mul(HASH_MULTIPLIER)
                .wrapping_add(value.hash_bits())
        })
    }
}
