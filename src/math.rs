//! Math utility functions.

use euclid::default::{Transform3D, Vector3D};
use num_traits::Float;

use crate::color::{Component, Components};

/// A 3D transform holding a color space conversion matrix.
pub type Transform = Transform3D<Component>;

type Vector = Vector3D<Component>;

/// Build a transform from a 3x3 matrix given in row-vector order, i.e. each
/// row holds the contribution of one input component to the three outputs.
#[allow(clippy::too_many_arguments)]
pub const fn transform_3x3(
    m11: Component,
    m12: Component,
    m13: Component,
    m21: Component,
    m22: Component,
    m23: Component,
    m31: Component,
    m32: Component,
    m33: Component,
) -> Transform {
    Transform::new(
        m11, m12, m13, 0.0, //
        m21, m22, m23, 0.0, //
        m31, m32, m33, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Multiply the given matrix in `transform` with the 3 components.
pub fn transform(transform: &Transform, components: Components) -> Components {
    let Components(x, y, z) = components;
    let Vector { x, y, z, .. } = transform.transform_vector3d(Vector::new(x, y, z));
    Components(x, y, z)
}

/// Bring a hue in degrees into `[0, 360)`.
///
/// Whole turns are removed first, which is exact for floats. Any hue still
/// outside the range is then shifted by whole turns until it fits. Any
/// number of wraps in either direction lands on the same hue. NaN and
/// infinities are returned as is.
pub fn normalize_hue(hue: Component) -> Component {
    if !hue.is_finite() {
        return hue;
    }

    let mut hue = hue % 360.0;
    while hue < 0.0 {
        hue += 360.0;
    }
    while hue >= 360.0 {
        hue -= 360.0;
    }
    hue
}

/// Linearly interpolate between `a` and `b`.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Linearly interpolate evenly spaced `values` starting at `start` at the
/// given `position`. Positions outside the values yield 0.
pub fn interpolate(
    values: &[Component],
    start: Component,
    step: Component,
    position: Component,
) -> Component {
    if values.is_empty() || step.is_nan() || step <= 0.0 {
        return 0.0;
    }

    let offset = (position - start) / step;
    let last = (values.len() - 1) as Component;
    if !(0.0..=last).contains(&offset) {
        return 0.0;
    }

    let index = offset.floor();
    let lower = num_traits::cast::<Component, usize>(index).unwrap_or(0);
    match values.get(lower + 1) {
        Some(&upper) => lerp(values[lower], upper, offset - index),
        None => values[lower],
    }
}

/// Convert a unit interval value to an 8-bit channel, rounding half away from
/// zero and clamping to `0..=255`. NaN becomes 0.
pub fn unit_to_byte(value: Component) -> u8 {
    to_byte((255.0 * value).round())
}

/// Convert a unit interval value to an 8-bit channel, truncating toward zero
/// and clamping to `0..=255`. NaN becomes 0.
pub fn unit_to_byte_truncated(value: Component) -> u8 {
    to_byte((255.0 * value).trunc())
}

fn to_byte(value: Component) -> u8 {
    num_traits::cast::<Component, u8>(value.clamp(0.0, 255.0)).unwrap_or(0)
}
