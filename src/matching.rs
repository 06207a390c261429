//! Matching functions reduce a light spectrum to a single tristimulus value.
//!
//! Converting a [`LightSpectrum`] to CIE XYZ takes three of them, one per
//! component. They are supplied through a
//! [`Strategies`](crate::Strategies) registry because the right choice of
//! observer depends on the caller.

use std::sync::Arc;

use crate::{color::Component, models::LightSpectrum};

/// A function reducing a light spectrum to a single value by convolution.
///
/// How the spectrum's samples are aligned with the function's own response
/// curve, and whether the result is normalized, is up to the implementation.
pub trait MatchingFunction: std::fmt::Debug + Send + Sync {
    /// Convolve the spectrum with this function's response curve.
    fn convolve(&self, spectrum: &LightSpectrum) -> Component;
}

/// Sum the spectrum's amplitudes weighted by `response` at each sample's
/// wavelength, scaled by the spectrum's step.
///
/// The response is only ever evaluated at the spectrum's own wavelengths, so
/// functions sampled at a different step need to interpolate.
pub fn convolve_with(
    spectrum: &LightSpectrum,
    response: impl Fn(Component) -> Component,
) -> Component {
    let sum: Component = spectrum
        .samples()
        .map(|(wavelength, amplitude)| amplitude * response(wavelength))
        .sum();
    sum * spectrum.nm_per_step()
}

/// A matching function given as a table of evenly spaced response values.
///
/// Between table entries the response is interpolated linearly. Outside the
/// table the response is 0, so only the overlap of spectrum and table
/// contributes.
#[derive(Clone, Debug, PartialEq)]
pub struct TabularMatchingFunction {
    min_wavelength: Component,
    nm_per_step: Component,
    values: Vec<Component>,
}

impl TabularMatchingFunction {
    /// Create a new table starting at `min_wavelength` with one value every
    /// `nm_per_step` nanometers.
    pub fn new(min_wavelength: Component, nm_per_step: Component, values: Vec<Component>) -> Self {
        Self {
            min_wavelength,
            nm_per_step,
            values,
        }
    }

    /// The wavelength of the first value.
    pub fn min_wavelength(&self) -> Component {
        self.min_wavelength
    }

    /// The wavelength of the last value.
    pub fn max_wavelength(&self) -> Component {
        self.min_wavelength + self.nm_per_step * self.values.len().saturating_sub(1) as Component
    }

    /// The response at the given wavelength.
    pub fn response(&self, wavelength: Component) -> Component {
        crate::math::interpolate(
            &self.values,
            self.min_wavelength,
            self.nm_per_step,
            wavelength,
        )
    }
}

impl MatchingFunction for TabularMatchingFunction {
    fn convolve(&self, spectrum: &LightSpectrum) -> Component {
        convolve_with(spectrum, |wavelength| self.response(wavelength))
    }
}

/// The CIE 1931 2º standard observer, approximated analytically.
///
/// Uses the piecewise Gaussian fits by Wyman, Sloan and Shirley,
/// <https://research.nvidia.com/publication/2013-07_simple-analytic-approximations-cie-xyz-color-matching-functions>.
/// Results are not normalized; an equal-energy spectrum of amplitude 1 over
/// the visible range has a Y of roughly 107.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardObserver {
    /// The x̄ curve.
    X,
    /// The ȳ curve, the luminous efficiency.
    Y,
    /// The z̄ curve.
    Z,
}

impl StandardObserver {
    /// The response of this curve at the given wavelength.
    pub fn response(&self, wavelength: Component) -> Component {
        let gauss = |peak: Component, below: Component, above: Component| {
            let t = (wavelength - peak) * if wavelength < peak { below } else { above };
            (-0.5 * t * t).exp()
        };

        match self {
            Self::X => {
                0.362 * gauss(442.0, 0.0624, 0.0374) + 1.056 * gauss(599.8, 0.0264, 0.0323)
                    - 0.065 * gauss(501.1, 0.0490, 0.0382)
            }
            Self::Y => 0.821 * gauss(568.8, 0.0213, 0.0247) + 0.286 * gauss(530.9, 0.0613, 0.0322),
            Self::Z => 1.217 * gauss(437.0, 0.0845, 0.0278) + 0.681 * gauss(459.0, 0.0385, 0.0725),
        }
    }

    /// The three curves in X, Y, Z order, ready for a strategy registry.
    pub fn functions() -> Vec<Arc<dyn MatchingFunction>> {
        vec![Arc::new(Self::X), Arc::new(Self::Y), Arc::new(Self::Z)]
    }
}

impl MatchingFunction for StandardObserver {
    fn convolve(&self, spectrum: &LightSpectrum) -> Component {
        convolve_with(spectrum, |wavelength| self.response(wavelength))
    }
}
