//! Small helpers for working in the horizontal `x`/`z` plane.
use glam::Vec3;

/// Drops the vertical component of `vector`.
#[must_use]
pub const fn flatten(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z)
}

/// Returns the horizontal unit vector pointing from `from` to `to`.
///
/// Non-finite input and coincident points yield [`Vec3::ZERO`].
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use grovefire::vector_math::horizontal_direction;
/// let dir = horizontal_direction(Vec3::ZERO, Vec3::new(3.0, 7.0, 4.0));
/// assert!((dir.x - 0.6).abs() < 1e-6);
/// assert!(dir.y.abs() < 1e-6);
/// assert!((dir.z - 0.8).abs() < 1e-6);
///
/// assert_eq!(horizontal_direction(Vec3::ONE, Vec3::ONE), Vec3::ZERO);
/// ```
#[must_use]
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Vec3 {
    let offset = flatten(to - from);
    if !offset.is_finite() {
        return Vec3::ZERO;
    }
    offset.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Returns the unit vector in the direction of `vector`, or zero when the
/// input is degenerate.
#[must_use]
pub fn normalize_or_zero(vector: Vec3) -> Vec3 {
    if !vector.is_finite() {
        return Vec3::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Rotates `vector` about the vertical axis by `radians`.
///
/// Positive angles turn `+x` towards `+z`.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use grovefire::vector_math::rotate_about_y;
/// let turned = rotate_about_y(Vec3::X, std::f32::consts::FRAC_PI_2);
/// assert!(turned.x.abs() < 1e-6);
/// assert!((turned.z - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn rotate_about_y(vector: Vec3, radians: f32) -> Vec3 {
    let (sin, cos) = radians.sin_cos();
    Vec3::new(
        vector.x * cos - vector.z * sin,
        vector.y,
        vector.x * sin + vector.z * cos,
    )
}

/// Distance between two points ignoring height.
#[must_use]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(a - b).length()
}
