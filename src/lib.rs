//! chromata converts color samples between sRGB, HSV, CIE XYZ and sampled
//! light spectra.
//!
//! Every model converts to CIE XYZ, directly or through one hop. Conversions
//! that can not be hard-coded, like integrating a spectrum, take their
//! parameters from a [`Strategies`] registry supplied by the caller.
//!
//! ```rust
//! use chromata::{Hsv, Srgb, ToSmallSpaceStrategy, ToSrgb};
//!
//! let green = Hsv::new(120.0, 1.0, 1.0).to_srgb(ToSmallSpaceStrategy::Default);
//! assert_eq!(green, Srgb::new(0, 255, 0));
//! ```

#![deny(missing_docs)]

mod color;
mod error;
mod matching;
mod math;
mod models;
mod provenance;
mod sample;
mod strategy;

pub use color::{Component, Components, HasSpace, OutOfRange, Space};
pub use error::{Error, Result};
pub use matching::{convolve_with, MatchingFunction, StandardObserver, TabularMatchingFunction};
pub use models::{
    Base, CieXyz, ConvertibleColor, Hsv, LightSpectrum, Srgb, ToCieXyz, ToSmallSpaceStrategy,
    ToSrgb,
};
pub use provenance::{DataSource, SharedColor};
pub use sample::Sample;
pub use strategy::{Strategies, Strategy, StrategyKey};
