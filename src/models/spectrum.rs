//! Model a sampled distribution of light over wavelengths.

use std::sync::Arc;

use crate::{
    color::{Component, HasSpace, HashBits, OutOfRange, Space, HASH_MULTIPLIER, HASH_SEED},
    error::Result,
    matching::MatchingFunction,
    math::interpolate,
    models::{base::ConvertibleColor, Base, CieXyz, TOLERANCE},
    provenance::DataSource,
    strategy::{Strategies, StrategyKey},
};

/// A light spectrum sampled at evenly spaced wavelengths.
///
/// The minimum wavelength, maximum wavelength and step between samples
/// determine each other. Each constructor takes two of them and derives the
/// third, so they can not disagree.
#[derive(Clone, Debug)]
pub struct LightSpectrum {
    min_wavelength: Component,
    max_wavelength: Component,
    nm_per_step: Component,
    amplitudes: Vec<Component>,
    data_source: Option<DataSource>,
}

impl HasSpace for LightSpectrum {
    const SPACE: Space = Space::LightSpectrum;
}

impl LightSpectrum {
    /// Create a spectrum spanning `min_wavelength..=max_wavelength`, deriving
    /// the step from the number of amplitudes.
    ///
    /// A spectrum needs at least two amplitudes to have a step. With fewer,
    /// the step is 0 and the spectrum is reported as outside its color space.
    pub fn new(
        min_wavelength: Component,
        max_wavelength: Component,
        amplitudes: Vec<Component>,
    ) -> Self {
        let nm_per_step = if amplitudes.len() < 2 {
            0.0
        } else {
            (max_wavelength - min_wavelength) / (amplitudes.len() - 1) as Component
        };

        Self {
            min_wavelength,
            max_wavelength,
            nm_per_step,
            amplitudes,
            data_source: None,
        }
    }

    /// Create a spectrum starting at `min_wavelength` with the given step,
    /// deriving the maximum wavelength from the number of amplitudes.
    pub fn with_step(
        min_wavelength: Component,
        amplitudes: Vec<Component>,
        nm_per_step: Component,
    ) -> Self {
        let steps = amplitudes.len().saturating_sub(1) as Component;

        Self {
            min_wavelength,
            max_wavelength: min_wavelength + nm_per_step * steps,
            nm_per_step,
            amplitudes,
            data_source: None,
        }
    }

    /// Record the sample this one was derived from.
    #[must_use]
    pub fn with_data_source(mut self, source: DataSource) -> Self {
        self.data_source = Some(source);
        self
    }

    /// Return the sample this one was derived from, if it was recorded.
    pub fn data_source(&self) -> Option<&DataSource> {
        self.data_source.as_ref()
    }

    /// The wavelength of the first amplitude in nanometers.
    pub fn min_wavelength(&self) -> Component {
        self.min_wavelength
    }

    /// The wavelength of the last amplitude in nanometers.
    pub fn max_wavelength(&self) -> Component {
        self.max_wavelength
    }

    /// The distance between two consecutive amplitudes in nanometers.
    pub fn nm_per_step(&self) -> Component {
        self.nm_per_step
    }

    /// The amplitudes, ordered by increasing wavelength.
    pub fn amplitudes(&self) -> &[Component] {
        &self.amplitudes
    }

    /// The number of amplitudes.
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Determine whether this spectrum has no amplitudes.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// The wavelength of the amplitude with the given index.
    pub fn wavelength(&self, index: usize) -> Component {
        self.min_wavelength + self.nm_per_step * index as Component
    }

    /// Iterate over `(wavelength, amplitude)` pairs.
    pub fn samples(&self) -> impl Iterator<Item = (Component, Component)> + '_ {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(index, amplitude)| (self.wavelength(index), *amplitude))
    }

    /// The amplitude at an arbitrary wavelength, interpolated linearly
    /// between the neighboring samples.
    ///
    /// Wavelengths outside the spectrum have an amplitude of 0.
    pub fn amplitude_at(&self, wavelength: Component) -> Component {
        interpolate(
            &self.amplitudes,
            self.min_wavelength,
            self.nm_per_step,
            wavelength,
        )
    }

    /// Convert this shared spectrum to CIE XYZ, recording the spectrum as
    /// the data source of the result.
    ///
    /// There is no closed-form conversion, so the matching functions for the
    /// X, Y and Z components are looked up in `strategies` under
    /// `(LightSpectrum, CieXyz)`. Each component is the convolution of this
    /// spectrum with its matching function.
    pub fn to_ciexyz(self: &Arc<Self>, strategies: &Strategies) -> Result<CieXyz> {
        Ok(self
            .integrate(strategies)?
            .with_data_source(DataSource::new(self)))
    }

    fn integrate(&self, strategies: &Strategies) -> Result<CieXyz> {
        let key = StrategyKey::new(Self::SPACE, Space::CieXyz);
        let [x, y, z] = strategies.matching_functions(key)?;

        Ok(CieXyz::new(
            x.convolve(self),
            y.convolve(self),
            z.convolve(self),
        ))
    }

    /// Return a hash of the spectrum that is consistent with `==`.
    pub fn hash_code(&self) -> u64 {
        let mut hash = HASH_SEED.wrapping_add(self.min_wavelength.hash_bits());
        for value in [self.max_wavelength, self.nm_per_step] {
            hash = hash
                .wrapping_mul(HASH_MULTIPLIER)
                .wrapping_add(value.hash_bits());
        }
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(self.amplitudes.as_slice().hash_bits())
    }
}

impl PartialEq for LightSpectrum {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.min_wavelength == other.min_wavelength
                && self.max_wavelength == other.max_wavelength
                && self.nm_per_step == other.nm_per_step
                && self.amplitudes == other.amplitudes)
    }
}

impl std::hash::Hash for LightSpectrum {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl ConvertibleColor for LightSpectrum {
    fn space(&self) -> Space {
        Self::SPACE
    }

    fn data_source(&self) -> Option<&DataSource> {
        self.data_source.as_ref()
    }

    /// The spectrum needs at least two samples, finite wavelengths with a
    /// positive step, and finite amplitudes that are not negative. Without
    /// high precision, negative amplitudes within the tolerance are accepted.
    fn out_of_range(&self, high_precision: bool) -> OutOfRange {
        let mut flags = OutOfRange::empty();

        let wavelengths_valid = self.amplitudes.len() >= 2
            && self.min_wavelength.is_finite()
            && self.max_wavelength.is_finite()
            && self.nm_per_step.is_finite()
            && self.nm_per_step > 0.0
            && self.max_wavelength > self.min_wavelength;
        if !wavelengths_valid {
            flags |= OutOfRange::WAVELENGTHS;
        }

        let lower = if high_precision { 0.0 } else { -TOLERANCE };
        if !self
            .amplitudes
            .iter()
            .all(|value| value.is_finite() && *value >= lower)
        {
            flags |= OutOfRange::AMPLITUDES;
        }

        flags
    }

    fn to_base(&self, strategies: &Strategies) -> Result<Base> {
        self.integrate(strategies)
    }
}
