//! Model a color with the HSV notation in the sRGB color space.

use num_traits::ToPrimitive;

use crate::{
    color::{Component, HasSpace, OutOfRange, Space},
    error::Result,
    math::{normalize_hue, unit_to_byte},
    models::{base::ConvertibleColor, Base, CieXyz, Srgb, ToCieXyz, ToSmallSpaceStrategy, ToSrgb, TOLERANCE},
    provenance::DataSource,
    strategy::Strategies,
};

chromata_macros::gen_model! {
    /// A color specified with the HSV notation in the sRGB color space.
    ///
    /// Components outside their ranges are accepted on construction and
    /// reported by [`ConvertibleColor::out_of_range`]. Conversions still
    /// produce a best-effort color for them.
    pub struct Hsv {
        /// The hue in degrees, `0..=360`.
        hue: Component,
        /// The saturation, `0..=1`.
        saturation: Component,
        /// The value, `0..=1`.
        value: Component,
    }
}

impl HasSpace for Hsv {
    const SPACE: Space = Space::Hsv;
}

impl Hsv {
    /// Return this color, which already uses the HSV notation.
    pub fn to_hsv(&self) -> Hsv {
        self.clone()
    }
}

impl ToSrgb for Hsv {
    /// Convert to sRGB using the six hue sectors. HSV covers exactly the sRGB
    /// gamut, so all strategies give the same result. Channels are rounded
    /// half away from zero.
    fn to_srgb(&self, _strategy: ToSmallSpaceStrategy) -> Srgb {
        let (saturation, value) = (self.saturation, self.value);
        let mut hue = normalize_hue(self.hue) / 360.0;

        if saturation.is_nan() || saturation <= 0.0 {
            let gray = unit_to_byte(value);
            return Srgb::new(gray, gray, gray);
        }

        // 360° is the same hue as 0°.
        if hue.is_finite() && hue >= 1.0 {
            hue = 0.0;
        }
        hue *= 6.0;

        let sector = hue.floor();
        let fraction = hue - sector;

        let a = unit_to_byte(value * (1.0 - saturation));
        let b = unit_to_byte(value * (1.0 - saturation * fraction));
        let c = unit_to_byte(value * (1.0 - saturation * (1.0 - fraction)));
        let d = unit_to_byte(value);

        match sector.to_u8() {
            Some(0) => Srgb::new(d, c, a),
            Some(1) => Srgb::new(b, d, a),
            Some(2) => Srgb::new(a, d, c),
            Some(3) => Srgb::new(a, b, d),
            Some(4) => Srgb::new(c, a, d),
            Some(5) => Srgb::new(d, a, b),
            _ => Srgb::new(0, 0, 0),
        }
    }
}

impl ToCieXyz for Hsv {
    fn to_ciexyz(&self) -> CieXyz {
        self.to_srgb(ToSmallSpaceStrategy::Default).to_ciexyz()
    }
}

impl ConvertibleColor for Hsv {
    fn space(&self) -> Space {
        Self::SPACE
    }

    fn data_source(&self) -> Option<&DataSource> {
        self.data_source.as_ref()
    }

    /// The hue must lie in `0..=360`, saturation and value in `0..=1`.
    /// Without high precision each bound is widened by the tolerance, scaled
    /// to the component's range.
    fn out_of_range(&self, high_precision: bool) -> OutOfRange {
        let slack = if high_precision { 0.0 } else { TOLERANCE };
        let check = |value: Component, max: Component, flag: OutOfRange| {
            let slack = slack * max;
            if -slack <= value && value <= max + slack {
                OutOfRange::empty()
            } else {
                flag
            }
        };

        check(self.hue, 360.0, OutOfRange::C0)
            | check(self.saturation, 1.0, OutOfRange::C1)
            | check(self.value, 1.0, OutOfRange::C2)
    }

    fn to_base(&self, _strategies: &Strategies) -> Result<Base> {
        Ok(self.to_ciexyz())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn srgb(hue: Component, saturation: Component, value: Component) -> Srgb {
        Hsv::new(hue, saturation, value).to_srgb(ToSmallSpaceStrategy::Default)
    }

    #[test]
    fn pure_green() {
        assert_eq!(srgb(120.0, 1.0, 1.0), Srgb::new(0, 255, 0));
    }

    #[test]
    fn mid_gray() {
        assert_eq!(srgb(0.0, 0.0, 0.5), Srgb::new(128, 128, 128));
    }

    #[test]
    fn primaries_and_secondaries() {
        assert_eq!(srgb(0.0, 1.0, 1.0), Srgb::new(255, 0, 0));
        assert_eq!(srgb(60.0, 1.0, 1.0), Srgb::new(255, 255, 0));
        assert_eq!(srgb(180.0, 1.0, 1.0), Srgb::new(0, 255, 255));
        assert_eq!(srgb(240.0, 1.0, 1.0), Srgb::new(0, 0, 255));
        assert_eq!(srgb(300.0, 1.0, 1.0), Srgb::new(255, 0, 255));
        assert_eq!(srgb(360.0, 1.0, 1.0), Srgb::new(255, 0, 0));
    }

    #[test]
    fn each_sector_assigns_its_channels() {
        // Hues whose sector fraction is exact in binary.
        assert_eq!(srgb(45.0, 1.0, 1.0), Srgb::new(255, 191, 0));
        assert_eq!(srgb(90.0, 1.0, 1.0), Srgb::new(128, 255, 0));
        assert_eq!(srgb(135.0, 1.0, 1.0), Srgb::new(0, 255, 64));
        assert_eq!(srgb(225.0, 1.0, 1.0), Srgb::new(0, 64, 255));
        assert_eq!(srgb(270.0, 1.0, 1.0), Srgb::new(128, 0, 255));
        assert_eq!(srgb(315.0, 1.0, 1.0), Srgb::new(255, 0, 191));
    }

    #[test]
    fn zero_saturation_is_gray_for_any_hue() {
        for hue in [0.0, 45.0, 200.0, 359.0, -720.0, 1000.0] {
            for value in [0.0, 0.2, 0.5, 0.73, 1.0] {
                let gray = unit_to_byte(value);
                assert_eq!(srgb(hue, 0.0, value), Srgb::new(gray, gray, gray));
            }
        }
    }

    #[test]
    fn negative_saturation_is_gray() {
        assert_eq!(srgb(100.0, -0.5, 1.0), Srgb::new(255, 255, 255));
    }

    #[test]
    fn hue_wraps_around() {
        for hue in [0.0, 17.5, 60.0, 123.25, 299.0, 359.5] {
            let expected = srgb(hue, 0.8, 0.6);
            for turns in [-3.0, -1.0, 1.0, 2.0, 5.0] {
                assert_eq!(srgb(hue + 360.0 * turns, 0.8, 0.6), expected);
            }
        }
    }

    #[test]
    fn seam_is_continuous() {
        let below = srgb(359.999, 1.0, 1.0);
        let at = srgb(0.0, 1.0, 1.0);
        let above = srgb(0.001, 1.0, 1.0);

        for (x, y) in [(below, at.clone()), (at, above)] {
            assert!(x.red().abs_diff(y.red()) <= 1);
            assert!(x.green().abs_diff(y.green()) <= 1);
            assert!(x.blue().abs_diff(y.blue()) <= 1);
        }
    }

    #[test]
    fn out_of_range_values_still_convert() {
        // Channels are clamped instead of wrapping around.
        assert_eq!(srgb(0.0, 1.0, 2.0), Srgb::new(255, 0, 0));
        assert_eq!(srgb(0.0, 2.0, 1.0), Srgb::new(255, 0, 0));
        assert_eq!(srgb(0.0, 0.0, -1.0), Srgb::new(0, 0, 0));
    }

    #[test]
    fn non_finite_hue_is_black() {
        assert_eq!(srgb(Component::NAN, 1.0, 1.0), Srgb::new(0, 0, 0));
        assert_eq!(srgb(Component::INFINITY, 1.0, 1.0), Srgb::new(0, 0, 0));
    }

    #[test]
    fn deterministic_for_the_whole_domain() {
        for hue in (0..360).step_by(7) {
            for step in 0..=10 {
                let unit = step as Component / 10.0;
                let hsv = Hsv::new(hue as Component, unit, 1.0 - unit);
                assert_eq!(
                    hsv.to_srgb(ToSmallSpaceStrategy::Default),
                    hsv.to_srgb(ToSmallSpaceStrategy::Default)
                );
            }
        }
    }

    #[test]
    fn strategy_does_not_matter() {
        let hsv = Hsv::new(200.0, 0.3, 0.7);
        let expected = hsv.to_srgb(ToSmallSpaceStrategy::Default);
        assert_eq!(hsv.to_srgb(ToSmallSpaceStrategy::ForceLowTruncate), expected);
        assert_eq!(hsv.to_srgb(ToSmallSpaceStrategy::ForceHighStretch), expected);
    }

    #[test]
    fn to_hsv_is_identity() {
        let hsv = Hsv::new(42.0, 0.25, 0.75);
        assert_eq!(hsv.to_hsv(), hsv);
    }

    #[test]
    fn to_ciexyz_goes_through_srgb() {
        let hsv = Hsv::new(30.0, 0.5, 0.9);
        assert_eq!(
            hsv.to_ciexyz(),
            hsv.to_srgb(ToSmallSpaceStrategy::Default).to_ciexyz()
        );
    }

    #[test]
    fn range_checks() {
        assert!(Hsv::new(0.0, 0.0, 0.0).is_inside_color_space(true));
        assert!(Hsv::new(360.0, 1.0, 1.0).is_inside_color_space(true));
        assert_eq!(
            Hsv::new(-1.0, 1.5, 0.5).out_of_range(true),
            OutOfRange::C0 | OutOfRange::C1
        );
        assert_eq!(
            Hsv::new(0.0, 0.0, Component::NAN).out_of_range(false),
            OutOfRange::C2
        );

        let barely_over = Hsv::new(360.0, 1.0 + 1.0e-9, 1.0);
        assert!(barely_over.is_inside_color_space(false));
        assert!(!barely_over.is_inside_color_space(true));
    }

    #[test]
    fn equality_and_hash() {
        let a = Hsv::new(10.0, 0.5, 0.5);
        let b = Hsv::new(10.0, 0.5, 0.5);
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_ne!(a, Hsv::new(10.0, 0.5, 0.6));

        // Order matters.
        assert_ne!(
            Hsv::new(0.5, 10.0, 0.5).hash_code(),
            Hsv::new(10.0, 0.5, 0.5).hash_code()
        );

        // Both zeros compare and hash equal.
        let zero = Hsv::new(0.0, 0.0, 0.0);
        let negative_zero = Hsv::new(-0.0, 0.0, -0.0);
        assert_eq!(zero, negative_zero);
        assert_eq!(zero.hash_code(), negative_zero.hash_code());

        let set: HashSet<u64> = [a.hash_code(), b.hash_code()].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
