//! A color sample in any of the supported color spaces, and conversions
//! between them.
//!
//! Conversions between models one hop apart are done directly. Everything
//! else is routed through the base model, CIE XYZ.
//!
//! ```rust
//! use std::sync::Arc;
//! use chromata::{ConvertibleColor, Hsv, Sample, Space, Strategies};
//!
//! let green = Arc::new(Sample::from(Hsv::new(120.0, 1.0, 1.0)));
//! let srgb = green.convert(Space::Srgb, Strategies::standard()).unwrap();
//! assert_eq!(srgb.as_srgb().unwrap().components(), (0, 255, 0));
//! assert!(srgb.data_source().unwrap().points_to(&green));
//! ```

use std::sync::Arc;

use crate::{
    color::{HasSpace, OutOfRange, Space},
    error::{Error, Result},
    models::{
        Base, CieXyz, ConvertibleColor, Hsv, LightSpectrum, Srgb, ToSmallSpaceStrategy, ToSrgb,
    },
    provenance::DataSource,
    strategy::{Strategies, StrategyKey},
};

/// A color sample tagged with its color space.
#[derive(Clone, Debug, PartialEq, Hash)]
pub enum Sample {
    /// A color in the sRGB color space.
    Srgb(Srgb),
    /// A color in the HSV notation.
    Hsv(Hsv),
    /// A color in the CIE XYZ color space.
    CieXyz(CieXyz),
    /// A sampled light spectrum.
    LightSpectrum(LightSpectrum),
}

macro_rules! impl_from_model {
    ($($model:ident),*) => {
        $(
            impl From<$model> for Sample {
                fn from(value: $model) -> Self {
                    Self::$model(value)
                }
            }
        )*
    };
}

impl_from_model!(Srgb, Hsv, CieXyz, LightSpectrum);

macro_rules! dispatch {
    ($sample:expr, $color:ident => $body:expr) => {
        match $sample {
            Sample::Srgb($color) => $body,
            Sample::Hsv($color) => $body,
            Sample::CieXyz($color) => $body,
            Sample::LightSpectrum($color) => $body,
        }
    };
}

impl Sample {
    /// Return the sRGB color if this sample is one.
    pub fn as_srgb(&self) -> Option<&Srgb> {
        match self {
            Self::Srgb(srgb) => Some(srgb),
            _ => None,
        }
    }

    /// Return the HSV color if this sample is one.
    pub fn as_hsv(&self) -> Option<&Hsv> {
        match self {
            Self::Hsv(hsv) => Some(hsv),
            _ => None,
        }
    }

    /// Return the CIE XYZ color if this sample is one.
    pub fn as_ciexyz(&self) -> Option<&CieXyz> {
        match self {
            Self::CieXyz(xyz) => Some(xyz),
            _ => None,
        }
    }

    /// Return the spectrum if this sample is one.
    pub fn as_light_spectrum(&self) -> Option<&LightSpectrum> {
        match self {
            Self::LightSpectrum(spectrum) => Some(spectrum),
            _ => None,
        }
    }

    /// Convert this sample to the given color space.
    ///
    /// The result carries no data source; use [`Sample::convert`] on a
    /// shared sample to record one. Converting to the sample's own space
    /// returns a copy. Nothing converts into a light spectrum.
    pub fn to_space(&self, space: Space, strategies: &Strategies) -> Result<Sample> {
        use Space as S;

        let from = self.space();
        if from == space {
            return Ok(self.clone());
        }

        if space == S::LightSpectrum {
            tracing::trace!(%from, to = %space, "no conversion path");
            return Err(Error::NoConversionPath { from, to: space });
        }

        // Handle direct conversions.
        match self {
            Self::Hsv(hsv) if space == S::Srgb => {
                // HSV covers exactly the sRGB gamut, so no reduction applies.
                tracing::trace!("direct conversion from HSV to sRGB");
                return Ok(hsv.to_srgb(ToSmallSpaceStrategy::Default).into());
            }
            Self::Srgb(srgb) if space == S::Hsv => {
                tracing::trace!("direct conversion from sRGB to HSV");
                return Ok(srgb.to_hsv().into());
            }
            _ => {}
        }

        // The rest goes through the base model.
        tracing::trace!(%from, to = %space, "converting through {}", Base::SPACE);
        let base = self.to_base(strategies)?;

        if space == S::CieXyz {
            return Ok(base.into());
        }

        let strategy = strategies.reduction_or_default(StrategyKey::new(Base::SPACE, S::Srgb))?;
        let srgb = base.to_srgb(strategy);
        Ok(match space {
            S::Hsv => srgb.to_hsv().into(),
            _ => srgb.into(),
        })
    }

    /// Convert this shared sample to the given color space, recording it as
    /// the data source of the result.
    pub fn convert(self: &Arc<Self>, space: Space, strategies: &Strategies) -> Result<Sample> {
        Ok(self
            .to_space(space, strategies)?
            .with_data_source(DataSource::new(self)))
    }

    fn with_data_source(self, source: DataSource) -> Self {
        match self {
            Self::Srgb(srgb) => Self::Srgb(srgb.with_data_source(source)),
            Self::Hsv(hsv) => Self::Hsv(hsv.with_data_source(source)),
            Self::CieXyz(xyz) => Self::CieXyz(xyz.with_data_source(source)),
            Self::LightSpectrum(spectrum) => {
                Self::LightSpectrum(spectrum.with_data_source(source))
            }
        }
    }
}

impl ConvertibleColor for Sample {
    fn space(&self) -> Space {
        dispatch!(self, color => color.space())
    }

    fn data_source(&self) -> Option<&DataSource> {
        dispatch!(self, color => ConvertibleColor::data_source(color))
    }

    fn out_of_range(&self, high_precision: bool) -> OutOfRange {
        dispatch!(self, color => color.out_of_range(high_precision))
    }

    fn to_base(&self, strategies: &Strategies) -> Result<Base> {
        dispatch!(self, color => color.to_base(strategies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assert_component_eq,
        matching::{MatchingFunction, TabularMatchingFunction},
        models::ToCieXyz,
        strategy::Strategy,
        Component,
    };

    fn spectral_strategies() -> (Strategies, Vec<Arc<dyn MatchingFunction>>) {
        let ramp = |slope: Component| -> Arc<dyn MatchingFunction> {
            let values = (0..31).map(|i| slope * i as Component / 30.0).collect();
            Arc::new(TabularMatchingFunction::new(400.0, 10.0, values))
        };
        let functions = vec![ramp(1.0), ramp(0.5), ramp(0.25)];

        let strategies = Strategies::new().with(
            StrategyKey::new(Space::LightSpectrum, Space::CieXyz),
            Strategy::MatchingFunctions(functions.clone()),
        );
        (strategies, functions)
    }

    #[test]
    fn spectrum_to_xyz_convolves_and_records_the_source() {
        let (strategies, functions) = spectral_strategies();
        let amplitudes: Vec<Component> = (0..31).map(|i| 1.0 + i as Component / 10.0).collect();
        let spectrum = LightSpectrum::new(400.0, 700.0, amplitudes);
        let expected: Vec<Component> = functions.iter().map(|f| f.convolve(&spectrum)).collect();

        let original = Arc::new(Sample::from(spectrum));
        let converted = original.convert(Space::CieXyz, &strategies).unwrap();
        let xyz = converted.as_ciexyz().unwrap();

        assert_eq!(xyz.x(), expected[0]);
        assert_eq!(xyz.y(), expected[1]);
        assert_eq!(xyz.z(), expected[2]);
        assert!(xyz.data_source().unwrap().points_to(&original));
    }

    #[test]
    fn spectrum_without_strategies_fails() {
        let spectrum = Arc::new(Sample::from(LightSpectrum::new(
            400.0,
            700.0,
            vec![1.0; 31],
        )));
        assert_eq!(
            spectrum.convert(Space::Srgb, &Strategies::new()).unwrap_err(),
            Error::StrategyNotFound(StrategyKey::new(Space::LightSpectrum, Space::CieXyz))
        );
    }

    #[test]
    fn spectrum_through_the_standard_observer() {
        // Equal energy is slightly warmer than the D65 white of sRGB.
        let equal_energy = Sample::from(LightSpectrum::new(380.0, 780.0, vec![0.009; 401]));
        let srgb = equal_energy
            .to_space(Space::Srgb, Strategies::standard())
            .unwrap();
        let (red, green, blue) = srgb.as_srgb().unwrap().components();
        assert!(red >= green && green >= blue);
        assert!(blue > 230);
    }

    #[test]
    fn direct_conversions() {
        let hsv = Sample::from(Hsv::new(120.0, 1.0, 1.0));
        let srgb = hsv.to_space(Space::Srgb, &Strategies::new()).unwrap();
        assert_eq!(srgb, Sample::from(Srgb::new(0, 255, 0)));

        let back = srgb.to_space(Space::Hsv, &Strategies::new()).unwrap();
        assert_eq!(back, hsv);
    }

    #[test]
    fn indirect_conversions_go_through_xyz() {
        let xyz = CieXyz::new(0.2, 0.3, 0.4);
        let srgb = xyz.to_srgb(ToSmallSpaceStrategy::Default);

        let hsv = Sample::from(xyz)
            .to_space(Space::Hsv, &Strategies::new())
            .unwrap();
        assert_eq!(hsv, Sample::from(srgb.to_hsv()));

        let to_xyz = Sample::from(srgb.to_hsv())
            .to_space(Space::CieXyz, &Strategies::new())
            .unwrap();
        assert_eq!(to_xyz, Sample::from(srgb.to_ciexyz()));
    }

    #[test]
    fn registered_reduction_is_used() {
        let (x, y, z) = Srgb::new(255, 128, 0).to_ciexyz().components();
        let bright = Sample::from(CieXyz::new(3.0 * x, 3.0 * y, 3.0 * z));

        let stretching = Strategies::new().with(
            StrategyKey::new(Space::CieXyz, Space::Srgb),
            Strategy::Reduction(ToSmallSpaceStrategy::ForceHighStretch),
        );
        let srgb = bright.to_space(Space::Srgb, &stretching).unwrap();
        assert_eq!(srgb, Sample::from(Srgb::new(255, 128, 0)));
        assert_ne!(bright.to_space(Space::Srgb, &Strategies::new()).unwrap(), srgb);
    }

    #[test]
    fn hsv_ignores_reduction_entries() {
        let malformed = Strategies::new().with(
            StrategyKey::new(Space::Hsv, Space::Srgb),
            Strategy::MatchingFunctions(Vec::new()),
        );
        let hsv = Sample::from(Hsv::new(200.0, 0.5, 0.5));

        let srgb = hsv.to_space(Space::Srgb, &malformed).unwrap();
        assert_eq!(srgb, hsv.to_space(Space::Srgb, &Strategies::new()).unwrap());
        assert!(hsv.to_space(Space::CieXyz, &malformed).is_ok());
    }

    #[test]
    fn same_space_is_a_copy() {
        let original = Arc::new(Sample::from(CieXyz::new(0.1, 0.2, 0.3)));
        let copy = original.convert(Space::CieXyz, &Strategies::new()).unwrap();
        assert_eq!(&copy, original.as_ref());
        assert!(copy.data_source().unwrap().points_to(&original));
        assert!(original.data_source().is_none());
    }

    #[test]
    fn nothing_converts_into_a_spectrum() {
        let srgb = Sample::from(Srgb::new(1, 2, 3));
        assert_eq!(
            srgb.to_space(Space::LightSpectrum, Strategies::standard())
                .unwrap_err(),
            Error::NoConversionPath {
                from: Space::Srgb,
                to: Space::LightSpectrum,
            }
        );
    }

    #[test]
    fn samples_delegate_to_their_models() {
        let hsv = Sample::from(Hsv::new(400.0, 0.5, 0.5));
        assert_eq!(hsv.space(), Space::Hsv);
        assert_eq!(hsv.out_of_range(true), OutOfRange::C0);
        assert!(!hsv.is_inside_color_space(false));

        let xyz = Sample::from(CieXyz::new(0.5, 0.5, 0.5));
        assert!(xyz.as_hsv().is_none());
        assert!(xyz.as_srgb().is_none());
        assert!(xyz.as_light_spectrum().is_none());
        assert_component_eq!(xyz.to_base(&Strategies::new()).unwrap().y(), 0.5);
    }

    #[test]
    fn equal_samples_hash_equal() {
        use std::{
            collections::hash_map::DefaultHasher,
            hash::{Hash, Hasher},
        };

        let hash = |sample: &Sample| {
            let mut hasher = DefaultHasher::new();
            sample.hash(&mut hasher);
            hasher.finish()
        };

        let a = Sample::from(Srgb::new(1, 2, 3));
        let b = Sample::from(Srgb::new(1, 2, 3));
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
        assert_ne!(a, Sample::from(Hsv::new(1.0, 2.0, 3.0)));
    }
}
